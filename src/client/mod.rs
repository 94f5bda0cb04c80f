//! Key-value clients the session store issues commands against

mod memory;

pub use memory::MemoryClient;

#[cfg(feature = "redis-store")]
mod redis_client;

#[cfg(feature = "redis-store")]
pub use redis_client::RedisClient;

use async_trait::async_trait;

use crate::error::SessionError;

/// Commands a key-value backend must support to hold sessions
///
/// Every command completes asynchronously with either a value or a backend
/// error. Implementations own their connection handling; the store never
/// retries or times out a command itself.
#[async_trait]
pub trait KvClient: Send + Sync + 'static {
    /// Read a value; `None` when the key does not exist or has expired
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Write a value with no expiry
    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Write a value and its expiry in one atomic command
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), SessionError>;

    /// Delete a key, returning how many keys were removed
    async fn del(&self, key: &str) -> Result<u64, SessionError>;

    /// Reset the expiry of a key, returning whether the key existed
    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool, SessionError>;

    /// List every live key starting with `prefix`
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, SessionError>;
}
