//! Where the access token lives between actions.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::api::ClientError;

/// Storage for the bearer token.
///
/// A token stored with a TTL reads as absent once the TTL has elapsed.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str, ttl: Duration) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Token persisted as a small JSON file, readable only by the owner on unix
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read(&self) -> Option<StoredSession> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read session file");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }
}

fn wall_clock_expiry(ttl: Duration) -> Result<DateTime<Utc>, ClientError> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| ClientError::Session(format!("session lifetime out of range: {:?}", ttl)))
}

fn monotonic_expiry(ttl: Duration) -> Result<Instant, ClientError> {
    Instant::now()
        .checked_add(ttl)
        .ok_or_else(|| ClientError::Session(format!("session lifetime out of range: {:?}", ttl)))
}

#[cfg(unix)]
fn owner_only_file(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn owner_only_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        let session = self.read()?;
        if session.expires_at <= Utc::now() {
            debug!(expired_at = %session.expires_at, "Stored session has expired");
            return None;
        }
        Some(session.token)
    }

    fn set_token(&self, token: &str, ttl: Duration) -> Result<(), ClientError> {
        let session = StoredSession {
            token: token.to_string(),
            expires_at: wall_clock_expiry(ttl)?,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string(&session)
            .map_err(|e| ClientError::Session(e.to_string()))?;

        // Owner-only temp file renamed over the session file
        let tmp = self.tmp_path();
        match std::fs::remove_file(&tmp) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        let mut file = owner_only_file(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), expires_at = %session.expires_at, "Session stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process token storage
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<(String, Instant)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token valid for `ttl`. A lifetime too long to
    /// represent leaves the store empty.
    pub fn with_token(token: &str, ttl: Duration) -> Self {
        let store = Self::new();
        if let Err(e) = store.set_token(token, ttl) {
            warn!(error = %e, "Session not seeded");
        }
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        match &*self.inner.lock() {
            Some((token, expires_at)) if Instant::now() < *expires_at => Some(token.clone()),
            _ => None,
        }
    }

    fn set_token(&self, token: &str, ttl: Duration) -> Result<(), ClientError> {
        let expires_at = monotonic_expiry(ttl)?;
        *self.inner.lock() = Some((token.to_string(), expires_at));
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.inner.lock() = None;
        Ok(())
    }
}
