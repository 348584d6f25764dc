//! Reading the payload of a JWT access token.
//!
//! SECURITY: the signature is never checked. The claims are whatever the
//! holder of the token says they are, so they are only fit for choosing what
//! to display. The backend remains the authority on every request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::ClientError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// Identity of the user; the backend may encode it as a string or a number
    #[serde(default)]
    pub sub: Option<serde_json::Value>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Decode the second dot-separated segment of `token` as base64url JSON
    pub fn decode_unverified(token: &str) -> Result<Self, ClientError> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) if !payload.is_empty() => payload,
            _ => {
                return Err(ClientError::MalformedToken(
                    "expected three dot-separated segments".to_string(),
                ))
            }
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| ClientError::MalformedToken(format!("payload is not base64url: {}", e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::MalformedToken(format!("payload is not JSON: {}", e)))
    }

    pub fn subject(&self) -> Option<String> {
        match &self.sub {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}
