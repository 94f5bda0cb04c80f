//! Session store trait

use async_trait::async_trait;
use crate::error::SessionError;
use crate::session::SessionData;

/// Trait for session storage backends
///
/// This is the store interface a session middleware drives, modelled on the
/// express-session store contract (`get`, `set`, `destroy`, `touch`).
/// Implementations hold no per-session state between calls.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Load a session by ID
    ///
    /// Returns `Ok(None)` if the session doesn't exist or has expired.
    async fn load(&self, sid: &str) -> Result<Option<SessionData>, SessionError>;

    /// Save a session, replacing any stored value
    ///
    /// The TTL is derived by the store from the session cookie.
    async fn save(&self, sid: &str, session: &SessionData) -> Result<(), SessionError>;

    /// Destroy a session, returning how many records were removed
    ///
    /// Destroying a missing session succeeds and removes nothing.
    async fn destroy(&self, sid: &str) -> Result<u64, SessionError>;

    /// Touch a session - update its TTL without modifying data
    ///
    /// This is called when the session is accessed but not modified.
    /// Returns the backend's answer to whether a record was refreshed.
    async fn touch(&self, sid: &str, session: &SessionData) -> Result<bool, SessionError>;

    /// Clear all sessions (optional)
    async fn clear(&self) -> Result<(), SessionError> {
        Err(SessionError::StoreError("clear not implemented".to_string()))
    }

    /// Get the count of all sessions (optional)
    async fn length(&self) -> Result<usize, SessionError> {
        Err(SessionError::StoreError("length not implemented".to_string()))
    }

    /// Get all session IDs (optional)
    async fn ids(&self) -> Result<Vec<String>, SessionError> {
        Err(SessionError::StoreError("ids not implemented".to_string()))
    }

    /// Get all sessions (optional)
    async fn all(&self) -> Result<Vec<SessionData>, SessionError> {
        Err(SessionError::StoreError("all not implemented".to_string()))
    }
}
