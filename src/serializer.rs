//! Pluggable session record codecs
//!
//! Whatever the serializer produces is the wire format of stored values.
//! The default is JSON, which is what connect-redis writes.

use std::fmt;

use crate::error::SessionError;
use crate::session::SessionData;

/// Encodes session records into store values and back
///
/// Implementations must be pure: the same input always yields the same
/// output, and no shared state is touched.
pub trait Serializer: fmt::Debug + Send + Sync + 'static {
    /// Encode a record into the string stored under the session key
    fn encode(&self, session: &SessionData) -> Result<String, SessionError>;

    /// Decode a stored string back into a record
    ///
    /// A failure here means the stored value is corrupt; it must never be
    /// treated as a missing session.
    fn decode(&self, raw: &str) -> Result<SessionData, SessionError>;
}

/// JSON codec, compatible with `JSON.stringify` / `JSON.parse`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn encode(&self, session: &SessionData) -> Result<String, SessionError> {
        Ok(serde_json::to_string(session)?)
    }

    fn decode(&self, raw: &str) -> Result<SessionData, SessionError> {
        Ok(serde_json::from_str(raw)?)
    }
}
