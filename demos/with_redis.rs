//! Redis session store example compatible with connect-redis
//!
//! Writes a session the way connect-redis would, reads it back, refreshes its
//! expiry and destroys it. Sessions written here can be read by a Node.js
//! application using express-session + connect-redis, and vice versa.
//!
//! Run with a local Redis:
//!
//! ```text
//! REDIS_URL=redis://127.0.0.1:6379/ cargo run --example with_redis
//! ```

use redis_session_store::{
    ConnectOptions, RedisStore, SessionData, SessionError, SessionStore, StoreOptions,
};

#[tokio::main]
async fn main() -> Result<(), SessionError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string());
    let connect = ConnectOptions::new().with_url(url);
    let store = RedisStore::connect(&connect, StoreOptions::new()).await?;

    let sid = "demo-session";

    let mut session = SessionData::new(3600);
    session.set("user", "alice");
    session.set("views", 1);
    store.save(sid, &session).await?;
    println!("saved sess:{} with ttl {}s", sid, store.ttl_for(&session));

    match store.load(sid).await? {
        Some(loaded) => println!(
            "loaded user={:?} views={:?}",
            loaded.get::<String>("user"),
            loaded.get::<i32>("views")
        ),
        None => println!("session vanished before it could be read"),
    }

    let refreshed = store.touch(sid, &session).await?;
    println!("touched: {}", refreshed);

    println!("sessions under prefix: {}", store.length().await?);

    let removed = store.destroy(sid).await?;
    println!("destroyed {} key(s)", removed);

    Ok(())
}
