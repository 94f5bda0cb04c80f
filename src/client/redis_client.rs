//! Redis client backed by a multiplexed connection manager
//!
//! `AUTH` and `SELECT` are part of the connection handshake built from
//! [`ConnectOptions`], so the connection manager replays both on every
//! reconnect and the selected database survives connection loss.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult};
use std::sync::Arc;

use super::KvClient;
use crate::config::ConnectOptions;
use crate::error::SessionError;
use crate::observer::{StoreObserver, TracingObserver};

const SCAN_COUNT: usize = 100;

/// Redis client used by [`RedisStore`](crate::RedisStore)
///
/// Cloning is cheap; clones share the underlying multiplexed connection.
///
/// # Example
///
/// ```rust,ignore
/// use redis_session_store::{ConnectOptions, RedisClient, TracingObserver};
///
/// let options = ConnectOptions::new().with_host("127.0.0.1").with_db(2);
/// let client = RedisClient::connect(&options, Arc::new(TracingObserver)).await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    observer: Arc<dyn StoreObserver>,
}

impl RedisClient {
    /// Connect using the first configured target
    ///
    /// Fails if the server cannot be reached or rejects the password; a
    /// client is never returned in a half-authenticated state.
    pub async fn connect(
        options: &ConnectOptions,
        observer: Arc<dyn StoreObserver>,
    ) -> Result<Self, SessionError> {
        let info = options.connection_info()?;
        let target = info.addr.to_string();
        let client = redis::Client::open(info)?;

        match ConnectionManager::new(client).await {
            Ok(conn) => {
                observer.connected(&target);
                Ok(Self { conn, observer })
            }
            Err(e) => {
                let err = SessionError::from(e);
                observer.connection_error(&err);
                Err(err)
            }
        }
    }

    /// Connect from a connection string
    pub async fn from_url(url: &str) -> Result<Self, SessionError> {
        let options = ConnectOptions::new().with_url(url);
        Self::connect(&options, Arc::new(TracingObserver)).await
    }

    /// Wrap a connection manager the caller already set up
    pub fn from_connection_manager(
        conn: ConnectionManager,
        observer: Arc<dyn StoreObserver>,
    ) -> Self {
        Self { conn, observer }
    }

    fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// Convert a command result, reporting transport failures to the observer
    fn check<T>(&self, result: RedisResult<T>) -> Result<T, SessionError> {
        result.map_err(|e| {
            let transport = e.is_connection_dropped() || e.is_io_error() || e.is_timeout();
            let err = SessionError::from(e);
            if transport {
                self.observer.connection_error(&err);
            }
            err
        })
    }
}

#[async_trait]
impl KvClient for RedisClient {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let mut conn = self.connection();
        self.check(conn.get(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut conn = self.connection();
        self.check(conn.set::<_, _, ()>(key, value).await)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), SessionError> {
        let mut conn = self.connection();
        self.check(conn.set_ex::<_, _, ()>(key, value, ttl_secs).await)
    }

    async fn del(&self, key: &str) -> Result<u64, SessionError> {
        let mut conn = self.connection();
        self.check(conn.del::<_, u64>(key).await)
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool, SessionError> {
        let mut conn = self.connection();
        self.check(conn.expire::<_, bool>(key, expire_seconds(ttl_secs)).await)
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, SessionError> {
        let mut conn = self.connection();
        let pattern = format!("{}*", escape_glob(prefix));

        let mut keys = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = self.check(
                redis::cmd("SCAN")
                    .arg(cursor)
                    .arg("MATCH")
                    .arg(&pattern)
                    .arg("COUNT")
                    .arg(SCAN_COUNT)
                    .query_async(&mut conn)
                    .await,
            )?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may return a key more than once
        keys.sort();
        keys.dedup();
        Ok(keys)
    }
}

/// EXPIRE takes a signed count; a negative one would delete the key
fn expire_seconds(ttl_secs: u64) -> i64 {
    i64::try_from(ttl_secs).unwrap_or(i64::MAX)
}

/// Escape glob metacharacters so a prefix matches literally in `SCAN MATCH`
fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for ch in prefix.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
