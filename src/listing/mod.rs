//! Generic list / detail / create / delete flow shared by every resource.
//!
//! A resource type only describes itself through [`Resource`]: where it lives,
//! whether its endpoint needs a token and how a record renders as a row.
//! [`ResourceList`] does the rest. Every mutation is followed by a fresh fetch
//! of the collection; nothing is updated optimistically.

mod cards;
mod detail;
mod resources;
mod table;

pub use cards::{browse_places, PlaceCard, PlaceCards, PriceFilter};
pub use detail::{PlaceDetail, PlaceDetailPage};
pub use table::{render_detail, render_table};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{error, info, warn};

use crate::api::ClientError;
use crate::ui::Console;
use crate::ClientState;

pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Body posted to create a record
    type Draft: Serialize + Send + Sync;

    const SINGULAR: &'static str;
    const PLURAL: &'static str;
    /// Collection path, with trailing slash
    const ENDPOINT: &'static str;
    /// Whether a 401 from this endpoint means the stored session is dead
    const AUTH_REQUIRED: bool;

    fn id(&self) -> &str;
    fn columns() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
    fn detail(&self) -> Vec<(&'static str, String)>;

    fn item_path(id: &str) -> String {
        format!("{}{}", Self::ENDPOINT, id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered(usize),
    Empty,
    Failed,
    /// The backend rejected the token; the session was cleared
    SessionExpired,
}

pub struct ResourceList<'a, R: Resource> {
    state: &'a ClientState,
    console: Console,
    _resource: PhantomData<R>,
}

impl<'a, R: Resource> ResourceList<'a, R> {
    pub fn new(state: &'a ClientState, console: Console) -> Self {
        Self {
            state,
            console,
            _resource: PhantomData,
        }
    }

    /// GET the collection, attaching the token when there is one
    pub async fn fetch(&self, token: Option<&str>) -> Result<Vec<R>, ClientError> {
        self.state.api.get(R::ENDPOINT, token).await
    }

    /// Fetch the collection and render it
    pub async fn load(&self) -> LoadOutcome {
        let token = self.state.session.token();
        self.load_with(token.as_deref()).await
    }

    async fn load_with(&self, token: Option<&str>) -> LoadOutcome {
        let ui = &self.state.ui;

        match self.fetch(token).await {
            Ok(records) if records.is_empty() => {
                ui.show(&format!("No {} found", R::PLURAL));
                LoadOutcome::Empty
            }
            Ok(records) => {
                ui.show(&render_table(&records));
                LoadOutcome::Rendered(records.len())
            }
            Err(e) if R::AUTH_REQUIRED && token.is_some() && e.is_unauthorized() => {
                self.expire_session();
                LoadOutcome::SessionExpired
            }
            Err(e) if e.is_network() => {
                error!(error = %e, resource = R::PLURAL, "Error loading resources");
                ui.show(&format!("Error loading {}", R::PLURAL));
                LoadOutcome::Failed
            }
            Err(e) => {
                warn!(error = %e, resource = R::PLURAL, "Failed to load resources");
                ui.show(&format!("Failed to load {}", R::PLURAL));
                LoadOutcome::Failed
            }
        }
    }

    fn expire_session(&self) {
        if let Err(e) = self.state.session.clear() {
            error!(error = %e, "Failed to clear expired session");
        }
        self.state.ui.alert("Your session has expired. Please login again.");
        self.state.ui.redirect(&self.console.login_view());
    }

    /// Fetch a single record and render its fields
    pub async fn show(&self, id: &str) -> Result<R, ClientError> {
        let token = self.state.session.token();

        match self.state.api.get::<R>(&R::item_path(id), token.as_deref()).await {
            Ok(record) => {
                self.state.ui.show(&render_detail(&record.detail()));
                Ok(record)
            }
            Err(e) => {
                warn!(error = %e, resource = R::SINGULAR, id, "Failed to load resource");
                self.state
                    .ui
                    .alert(&format!("Failed to load {}: {}", R::SINGULAR, e));
                Err(e)
            }
        }
    }

    /// POST a new record, then reload the collection
    pub async fn create(&self, draft: &R::Draft) -> Result<(), ClientError> {
        let ui = &self.state.ui;
        let token = self.state.session.token();

        let result = self
            .state
            .api
            .post::<_, serde_json::Value>(R::ENDPOINT, draft, token.as_deref())
            .await;

        match result {
            Ok(_) => {
                info!(resource = R::SINGULAR, "Created");
                ui.alert(&format!("{} created successfully!", capitalize(R::SINGULAR)));
                self.load_with(token.as_deref()).await;
                Ok(())
            }
            Err(e @ ClientError::Api { .. }) => {
                ui.alert(&format!("Failed to create {}: {}", R::SINGULAR, e));
                Err(e)
            }
            Err(e) => {
                error!(error = %e, resource = R::SINGULAR, "Error creating resource");
                ui.alert(&format!(
                    "An error occurred while creating the {}.",
                    R::SINGULAR
                ));
                Err(e)
            }
        }
    }

    /// Confirm, DELETE by id, then reload the collection.
    ///
    /// Returns `Ok(false)` when the user declines the confirmation.
    pub async fn delete(&self, id: &str) -> Result<bool, ClientError> {
        let ui = &self.state.ui;

        if !ui.confirm(&format!("Are you sure you want to delete this {}?", R::SINGULAR)) {
            return Ok(false);
        }

        let token = self.state.session.token();

        match self.state.api.delete(&R::item_path(id), token.as_deref()).await {
            Ok(()) => {
                info!(resource = R::SINGULAR, id, "Deleted");
                ui.alert(&format!("{} deleted successfully!", capitalize(R::SINGULAR)));
                self.load_with(token.as_deref()).await;
                Ok(true)
            }
            Err(e) if e.is_network() => {
                error!(error = %e, resource = R::SINGULAR, id, "Error deleting resource");
                ui.alert(&format!(
                    "An error occurred while deleting the {}.",
                    R::SINGULAR
                ));
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, resource = R::SINGULAR, id, "Delete rejected");
                ui.alert(&format!("Failed to delete {}", R::SINGULAR));
                Err(e)
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
