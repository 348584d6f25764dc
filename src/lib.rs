pub mod admin;
pub mod api;
pub mod cli;
pub mod config;
pub mod listing;
pub mod models;
pub mod session;
pub mod ui;

pub use api::{ApiClient, ClientError};

use std::sync::Arc;
use std::time::Duration;

use config::Config;
use session::{FileSessionStore, SessionStore};
use ui::Ui;

/// Everything a handler needs: the API, the session and the user surface.
///
/// Handlers read the token from `session` once when they start and never
/// re-read it mid-action.
pub struct ClientState {
    pub api: ApiClient,
    pub session: Arc<dyn SessionStore>,
    pub ui: Arc<dyn Ui>,
    pub session_ttl: Duration,
}

impl ClientState {
    pub fn new(
        api: ApiClient,
        session: Arc<dyn SessionStore>,
        ui: Arc<dyn Ui>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            api,
            session,
            ui,
            session_ttl,
        }
    }

    /// State backed by the session file named in the configuration
    pub fn from_config(config: &Config, ui: Arc<dyn Ui>) -> Result<Self, ClientError> {
        let api = ApiClient::from_config(&config.api)?;
        let session = Arc::new(FileSessionStore::new(&config.session.file));
        Ok(Self::new(api, session, ui, config.session.ttl()))
    }
}
