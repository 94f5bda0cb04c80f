//! Redis session store compatible with connect-redis
//!
//! This store uses the same storage format as connect-redis:
//! - Key: `prefix + session_id` (default prefix: "sess:")
//! - Value: session data as produced by the serializer (JSON by default)
//! - TTL: fixed override, else the session cookie's remaining lifetime, else one day

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use super::SessionStore;
use crate::client::KvClient;
use crate::config::StoreOptions;
use crate::error::SessionError;
use crate::observer::Command;
use crate::session::SessionData;
use crate::ttl::session_ttl;

#[cfg(feature = "redis-store")]
use crate::client::RedisClient;
#[cfg(feature = "redis-store")]
use crate::config::ConnectOptions;

/// Session store over any [`KvClient`], compatible with connect-redis
///
/// This store uses the same format as the Node.js connect-redis package,
/// allowing seamless session sharing between Rust and Node.js applications.
/// It keeps no session state of its own: every call is a single command
/// against the client, and the backend is the only source of truth.
///
/// # Example
///
/// ```rust,ignore
/// use redis_session_store::{ConnectOptions, RedisStore, StoreOptions};
///
/// let connect = ConnectOptions::new().with_host("127.0.0.1").with_db(1);
/// let store = RedisStore::connect(&connect, StoreOptions::new().with_prefix("app:")).await?;
/// ```
pub struct RedisStore<C> {
    client: Arc<C>,
    options: StoreOptions,
}

impl<C: KvClient> RedisStore<C> {
    /// Create a store over an already connected client with default options
    ///
    /// - Prefix: "sess:"
    /// - TTL: cookie lifetime, else 86400 seconds (1 day)
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
            options: StoreOptions::default(),
        }
    }

    /// Create a store over an already connected client
    pub fn with_client(client: C, options: StoreOptions) -> Result<Self, SessionError> {
        options.validate()?;
        Ok(Self {
            client: Arc::new(client),
            options,
        })
    }

    /// The client commands are issued against
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The options this store was built with
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Make a storage key from session ID
    fn make_key(&self, sid: &str) -> String {
        format!("{}{}", self.options.prefix, sid)
    }

    /// TTL in seconds for a session, as of the store clock
    pub fn ttl_for(&self, session: &SessionData) -> u64 {
        session_ttl(self.options.ttl, &session.cookie, (self.options.clock)())
    }

    /// Run one client command, reporting its latency to the observer
    async fn timed<T, F>(&self, command: Command, fut: F) -> Result<T, SessionError>
    where
        F: Future<Output = Result<T, SessionError>>,
    {
        let started = Instant::now();
        let result = fut.await;
        self.options
            .observer
            .command_completed(command, started.elapsed(), result.is_ok());
        result
    }

    async fn keys(&self) -> Result<Vec<String>, SessionError> {
        self.timed(Command::Scan, self.client.scan_prefix(&self.options.prefix))
            .await
    }
}

#[cfg(feature = "redis-store")]
impl RedisStore<RedisClient> {
    /// Connect to Redis and build a store
    ///
    /// Options are validated before any connection is attempted. A rejected
    /// password fails construction.
    pub async fn connect(
        connect: &ConnectOptions,
        options: StoreOptions,
    ) -> Result<Self, SessionError> {
        options.validate()?;
        let client = RedisClient::connect(connect, Arc::clone(&options.observer)).await?;
        Ok(Self {
            client: Arc::new(client),
            options,
        })
    }

    /// Create a new Redis store from a connection string
    pub async fn from_url(url: &str) -> Result<Self, SessionError> {
        Self::connect(&ConnectOptions::new().with_url(url), StoreOptions::default()).await
    }
}

impl<C> Clone for RedisStore<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            options: self.options.clone(),
        }
    }
}

#[async_trait]
impl<C: KvClient> SessionStore for RedisStore<C> {
    async fn load(&self, sid: &str) -> Result<Option<SessionData>, SessionError> {
        let key = self.make_key(sid);

        let raw = self.timed(Command::Get, self.client.get(&key)).await?;

        match raw {
            Some(raw) => match self.options.serializer.decode(&raw) {
                Ok(session) => Ok(Some(session)),
                Err(e) => {
                    tracing::warn!(key = %key, "stored session could not be decoded: {}", e);
                    Err(e)
                }
            },
            None => Ok(None),
        }
    }

    async fn save(&self, sid: &str, session: &SessionData) -> Result<(), SessionError> {
        let key = self.make_key(sid);

        // Encode before touching the backend so a bad record never half-writes
        let value = self.options.serializer.encode(session)?;

        if self.options.disable_ttl {
            return self
                .timed(Command::Set, self.client.set(&key, &value))
                .await;
        }

        let ttl = self.ttl_for(session);
        if ttl == 0 {
            // SETEX rejects a zero expiry; the cookie is already dead
            tracing::debug!(key = %key, "session cookie expired, removing instead of saving");
            self.timed(Command::Del, self.client.del(&key)).await?;
            return Ok(());
        }

        self.timed(Command::SetEx, self.client.set_ex(&key, &value, ttl))
            .await
    }

    async fn destroy(&self, sid: &str) -> Result<u64, SessionError> {
        let key = self.make_key(sid);
        self.timed(Command::Del, self.client.del(&key)).await
    }

    async fn touch(&self, sid: &str, session: &SessionData) -> Result<bool, SessionError> {
        // Nothing can expire, so there is nothing to refresh
        if self.options.disable_ttl {
            return Ok(true);
        }

        let key = self.make_key(sid);
        let ttl = self.ttl_for(session);

        // EXPIRE's answer is passed through: false means the key is gone
        self.timed(Command::Expire, self.client.expire(&key, ttl))
            .await
    }

    async fn clear(&self) -> Result<(), SessionError> {
        for key in self.keys().await? {
            self.timed(Command::Del, self.client.del(&key)).await?;
        }
        Ok(())
    }

    async fn length(&self) -> Result<usize, SessionError> {
        Ok(self.keys().await?.len())
    }

    async fn ids(&self) -> Result<Vec<String>, SessionError> {
        let prefix = &self.options.prefix;
        Ok(self
            .keys()
            .await?
            .into_iter()
            .filter_map(|k| k.strip_prefix(prefix.as_str()).map(str::to_string))
            .collect())
    }

    async fn all(&self) -> Result<Vec<SessionData>, SessionError> {
        let mut sessions = Vec::new();
        for key in self.keys().await? {
            // A key can expire between SCAN and GET
            if let Some(raw) = self.timed(Command::Get, self.client.get(&key)).await? {
                sessions.push(self.options.serializer.decode(&raw)?);
            }
        }
        Ok(sessions)
    }
}
