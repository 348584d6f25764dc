//! User-facing surface of the client.
//!
//! Handlers never print directly. They talk to a [`Ui`]: `alert` for
//! notifications, `confirm` before destructive actions, `redirect` to move the
//! user to another view and `show` to replace the rendered content.

mod recording;
mod terminal;

pub use recording::{RecordingUi, UiEvent};
pub use terminal::TerminalUi;

use std::fmt;

/// Which front end a view belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Console {
    Public,
    Admin,
}

impl Console {
    pub fn login_view(self) -> View {
        match self {
            Console::Public => View::Login,
            Console::Admin => View::AdminLogin,
        }
    }

    pub fn home_view(self) -> View {
        match self {
            Console::Public => View::Index,
            Console::Admin => View::AdminDashboard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Index,
    Login,
    PlaceDetail(String),
    AddReview(String),
    AdminLogin,
    AdminDashboard,
    AdminUsers,
    AdminPlaces,
    AdminReviews,
    AdminAmenities,
}

impl View {
    pub fn console(&self) -> Console {
        match self {
            View::Index | View::Login | View::PlaceDetail(_) | View::AddReview(_) => {
                Console::Public
            }
            _ => Console::Admin,
        }
    }

    pub fn is_login(&self) -> bool {
        matches!(self, View::Login | View::AdminLogin)
    }

    /// Views that cannot be shown without a stored token
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            View::Index | View::Login | View::PlaceDetail(_) | View::AdminLogin
        )
    }

    /// The command that opens this view
    pub fn command(&self) -> String {
        match self {
            View::Index => "hbnb places list".to_string(),
            View::Login => "hbnb login".to_string(),
            View::PlaceDetail(id) => format!("hbnb places show {}", id),
            View::AddReview(id) => format!("hbnb reviews add {} --text <TEXT> --rating <1-5>", id),
            View::AdminLogin => "hbnb admin login".to_string(),
            View::AdminDashboard => "hbnb admin stats".to_string(),
            View::AdminUsers => "hbnb admin users list".to_string(),
            View::AdminPlaces => "hbnb admin places list".to_string(),
            View::AdminReviews => "hbnb admin reviews list".to_string(),
            View::AdminAmenities => "hbnb admin amenities list".to_string(),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Index => "places",
            View::Login => "login",
            View::PlaceDetail(_) => "place detail",
            View::AddReview(_) => "add review",
            View::AdminLogin => "admin login",
            View::AdminDashboard => "admin dashboard",
            View::AdminUsers => "admin users",
            View::AdminPlaces => "admin places",
            View::AdminReviews => "admin reviews",
            View::AdminAmenities => "admin amenities",
        };
        f.write_str(name)
    }
}

pub trait Ui: Send + Sync {
    fn alert(&self, message: &str);
    fn confirm(&self, question: &str) -> bool;
    fn redirect(&self, view: &View);
    fn show(&self, content: &str);
}
