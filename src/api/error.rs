//! Error handling for calls against the HBnB API.
//!
//! The backend reports failures as JSON bodies carrying either an `error` or a
//! `message` key depending on the API revision. [`ErrorBody`] reads both, and
//! [`ClientError`] is the single error type handed back to callers.

use reqwest::StatusCode;
use serde::Deserialize;

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Pick the backend-provided message, `error` first, then `message`.
    pub fn into_message(self) -> Option<String> {
        self.error
            .filter(|m| !m.is_empty())
            .or(self.message.filter(|m| !m.is_empty()))
    }
}

/// Build the user-facing message for a failed response: the backend's own
/// message when it sent one, otherwise the HTTP reason phrase.
pub fn response_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string())
        })
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The backend answered 2xx with a body we could not read
    #[error("invalid response: {0}")]
    Decode(String),

    /// Persisting or reading the local session failed
    #[error("session storage error: {0}")]
    Session(String),

    #[error("malformed access token: {0}")]
    MalformedToken(String),

    #[error("Access denied. Admin privileges required.")]
    NotAdmin,

    #[error("{0}")]
    Validation(String),

    /// A protected action was attempted without a stored token
    #[error("authentication required")]
    NotLoggedIn,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Network(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Whether the failure happened before any HTTP response arrived
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Session(e.to_string())
    }
}
