//! Lock Store Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`InMemoryLockStore`] | Local | Single-process store, also used in tests |
//! | [`RedisLockStore`] | Distributed | Redis-backed for multi-instance coordination |

#[cfg(feature = "store-memory")]
pub mod memory;
#[cfg(feature = "store-redis")]
pub mod redis;
#[cfg(feature = "store-redis")]
pub mod scripts;

#[cfg(feature = "store-memory")]
pub use memory::InMemoryLockStore;
#[cfg(feature = "store-redis")]
pub use redis::RedisLockStore;
