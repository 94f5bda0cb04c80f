//! Session store implementations

mod redis_store;
mod traits;

pub use redis_store::RedisStore;
pub use traits::SessionStore;
