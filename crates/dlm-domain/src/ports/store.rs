//! Lock Store Port
//!
//! Contract for the shared key-value store that holds lock keys. Each
//! operation is one indivisible round trip on the store side; the
//! coordinator never combines a read with a later write.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Atomic operations on a single store connection
///
/// Boolean results report whether the store acted. `Err` is reserved for
/// transport failures; implementations report an expired command deadline
/// as [`Error::Timeout`](crate::error::Error::Timeout).
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Set `key` to `token` with a `ttl` expiry only if `key` is absent
    async fn set_if_absent(&self, key: &str, token: &str, ttl: Duration) -> Result<bool>;

    /// Extend `key` if it already holds `token`, otherwise set it if absent
    async fn acquire_or_refresh(&self, key: &str, token: &str, ttl: Duration) -> Result<bool>;

    /// Delete `key` only if it holds `token`
    async fn compare_and_delete(&self, key: &str, token: &str) -> Result<bool>;

    /// Reset the expiry of `key` to `ttl` only if it holds `token`
    async fn compare_and_extend(&self, key: &str, token: &str, ttl: Duration) -> Result<bool>;

    /// Backend name, for logging
    fn provider_name(&self) -> &str;
}

/// Store client selection
///
/// `get_client(None)` returns the default connection; a name selects a
/// configured named connection.
pub trait LockStoreProvider: Send + Sync {
    /// Resolve a store client by name
    fn get_client(&self, name: Option<&str>) -> Result<Arc<dyn LockStore>>;
}
