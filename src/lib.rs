//! # redis-session-store
//!
//! connect-redis compatible session store for Rust session middleware.
//!
//! Sessions are written with the same key layout and value format as the
//! Node.js connect-redis package, so Rust and Node.js services can share one
//! Redis keyspace of sessions.
//!
//! ## Features
//!
//! - **Connect-redis compatible storage**: `prefix + sid` keys holding JSON session records
//! - **Expiry from the session cookie**: TTL follows `cookie.maxAge`, with a fixed override or no expiry at all
//! - **Pluggable serializers and clients**: swap the codec, or run against the in-memory client in tests
//! - **Injected observability**: command latency and connection events go to a [`StoreObserver`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use redis_session_store::{ConnectOptions, RedisStore, SessionData, SessionStore, StoreOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), redis_session_store::SessionError> {
//!     let connect = ConnectOptions::new().with_host("127.0.0.1").with_port(6379);
//!     let store = RedisStore::connect(&connect, StoreOptions::new()).await?;
//!
//!     let mut session = SessionData::new(3600);
//!     session.set("user", "alice");
//!     store.save("some-session-id", &session).await?;
//!
//!     let loaded = store.load("some-session-id").await?;
//!     assert_eq!(loaded.and_then(|s| s.get::<String>("user")), Some("alice".into()));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod observer;
pub mod serializer;
pub mod session;
pub mod store;
pub mod ttl;

pub use client::{KvClient, MemoryClient};
pub use config::{ConnectOptions, StoreOptions};
pub use error::SessionError;
pub use observer::{Command, StoreObserver, TracingObserver};
pub use serializer::{JsonSerializer, Serializer};
pub use session::{SessionCookie, SessionData};
pub use store::{RedisStore, SessionStore};

#[cfg(feature = "redis-store")]
pub use client::RedisClient;
