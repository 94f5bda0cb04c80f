//! In-memory key-value client
//!
//! This is primarily for development and testing.
//! For production, use RedisClient or another shared backend.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::KvClient;
use crate::error::SessionError;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(exp) => exp > now,
            None => true,
        }
    }
}

/// In-memory client with Redis-like expiry semantics
///
/// Expired keys read as absent and are purged lazily. Clones share the same
/// map, so a test can keep a handle while a store owns another.
///
/// Warning: not suitable for production use because:
/// - Values are lost on restart
/// - Values are not shared across server instances
#[derive(Clone, Default)]
pub struct MemoryClient {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryClient {
    /// Create an empty client
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired key
    pub fn cleanup_expired(&self) {
        let now = Instant::now();
        self.entries.write().retain(|_, entry| entry.is_live(now));
    }

    /// Remaining time to live of a key; `None` if it is absent or never expires
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let entries = self.entries.read();
        let entry = entries.get(key).filter(|e| e.is_live(now))?;
        entry.expires_at.map(|exp| exp - now)
    }

    fn write(&self, key: &str, value: &str, expires_at: Option<Instant>) {
        let entry = Entry {
            value: value.to_string(),
            expires_at,
        };
        self.entries.write().insert(key.to_string(), entry);
    }
}

#[async_trait]
impl KvClient for MemoryClient {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let entries = self.entries.read();
        Ok(entries
            .get(key)
            .filter(|e| e.is_live(Instant::now()))
            .map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.write(key, value, None);
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), SessionError> {
        if ttl_secs == 0 {
            return Err(SessionError::StoreError(
                "invalid expire time in 'setex' command".to_string(),
            ));
        }
        self.write(key, value, Some(Instant::now() + Duration::from_secs(ttl_secs)));
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<u64, SessionError> {
        let removed = self.entries.write().remove(key);
        Ok(match removed {
            Some(entry) if entry.is_live(Instant::now()) => 1,
            _ => 0,
        })
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool, SessionError> {
        let now = Instant::now();
        let mut entries = self.entries.write();

        if !entries.get(key).is_some_and(|e| e.is_live(now)) {
            return Ok(false);
        }

        if ttl_secs == 0 {
            entries.remove(key);
        } else if let Some(entry) = entries.get_mut(key) {
            entry.expires_at = Some(now + Duration::from_secs(ttl_secs));
        }
        Ok(true)
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, SessionError> {
        self.cleanup_expired();
        let entries = self.entries.read();
        Ok(entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
