//! Session store error types

use std::fmt;

/// Errors that can occur during session store operations
///
/// A missing session is not an error: lookups return `Ok(None)` for keys
/// that never existed or have expired.
#[derive(Debug)]
pub enum SessionError {
    /// The key-value backend reported a failure
    StoreError(String),
    /// A session record could not be encoded, or a stored value could not be decoded
    SerializationError(String),
    /// Store or connection options were rejected at construction time
    InvalidConfig(String),
    /// Redis error (when redis-store feature is enabled)
    #[cfg(feature = "redis-store")]
    RedisError(redis::RedisError),
}

impl SessionError {
    /// Whether this error came from the backend (transport, command or auth failure)
    pub fn is_store_error(&self) -> bool {
        match self {
            SessionError::StoreError(_) => true,
            #[cfg(feature = "redis-store")]
            SessionError::RedisError(_) => true,
            _ => false,
        }
    }

    /// Whether this error came from encoding or decoding a session record
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, SessionError::SerializationError(_))
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::StoreError(msg) => write!(f, "Session store error: {}", msg),
            SessionError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            SessionError::InvalidConfig(msg) => write!(f, "Invalid store configuration: {}", msg),
            #[cfg(feature = "redis-store")]
            SessionError::RedisError(e) => write!(f, "Redis error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "redis-store")]
            SessionError::RedisError(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "redis-store")]
impl From<redis::RedisError> for SessionError {
    fn from(err: redis::RedisError) -> Self {
        SessionError::RedisError(err)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::SerializationError(err.to_string())
    }
}
