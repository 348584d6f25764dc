//! Admin console: dashboard counters and gated access to the resource pages.

use tracing::error;

use crate::listing::{render_detail, Resource, ResourceList};
use crate::models::AdminStats;
use crate::session::{Gate, SessionManager};
use crate::ui::{Console, View};
use crate::ClientState;

pub const STATS_PATH: &str = "/admin/stats";

pub struct AdminConsole<'a> {
    state: &'a ClientState,
}

impl<'a> AdminConsole<'a> {
    pub fn new(state: &'a ClientState) -> Self {
        Self { state }
    }

    /// Load and render the dashboard counters.
    ///
    /// Failures are only logged; the dashboard then stays empty.
    pub async fn dashboard(&self) -> Option<AdminStats> {
        let gate = SessionManager::new(self.state).require_auth(&View::AdminDashboard);
        let token = match gate {
            Gate::Proceed(Some(token)) => token,
            _ => return None,
        };

        match self.state.api.get::<AdminStats>(STATS_PATH, Some(&token)).await {
            Ok(stats) => {
                self.state.ui.show(&render_stats(&stats));
                Some(stats)
            }
            Err(e) => {
                error!(error = %e, "Failed to load stats");
                None
            }
        }
    }

    /// Open an admin resource page, or `None` if the gate redirected away
    pub fn page<R: Resource>(&self, view: View) -> Option<ResourceList<'a, R>> {
        match SessionManager::new(self.state).require_auth(&view) {
            Gate::Proceed(_) => Some(ResourceList::new(self.state, Console::Admin)),
            Gate::Redirected => None,
        }
    }
}

pub fn render_stats(stats: &AdminStats) -> String {
    let mut fields = vec![
        ("Users", stats.total_users.to_string()),
        ("Places", stats.total_places.to_string()),
        ("Reviews", stats.total_reviews.to_string()),
        ("Amenities", stats.total_amenities.to_string()),
    ];
    if let Some(admins) = stats.admin_users {
        fields.push(("Admins", admins.to_string()));
    }
    format!("=== HBnB Admin Dashboard ===\n\n{}", render_detail(&fields))
}
