//! Redis lock store
//!
//! Lock store backed by a single logical Redis endpoint. Conditional
//! operations run as Lua scripts so each one is a single atomic round trip.
//!
//! ## Features
//!
//! - `SET NX PX` for plain acquisition
//! - Cached scripts (`EVALSHA` with `EVAL` fallback) for the compare-and-act set
//! - Shared auto-reconnecting connection via `ConnectionManager`
//! - Per-command deadline reported as a timeout error
//!
//! ## Example
//!
//! ```ignore
//! use dlm_providers::store::RedisLockStore;
//!
//! let store = RedisLockStore::new("redis://localhost:6379")?;
//! // Or with host/port
//! let store = RedisLockStore::with_host_port("localhost", 6379)?;
//! ```

use crate::constants::{DEFAULT_COMMAND_TIMEOUT_MS, DEFAULT_REDIS_URI};
use crate::store::scripts;
use async_trait::async_trait;
use dlm_domain::error::{Error, Result};
use dlm_domain::ports::LockStore;
use redis::aio::ConnectionManager;
use redis::{Client, RedisResult, Script};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Compiled lock scripts; hashing happens once per store
struct LockScripts {
    acquire_or_refresh: Script,
    compare_and_delete: Script,
    compare_and_extend: Script,
}

impl LockScripts {
    fn new() -> Self {
        Self {
            acquire_or_refresh: Script::new(scripts::ACQUIRE_OR_REFRESH),
            compare_and_delete: Script::new(scripts::COMPARE_AND_DELETE),
            compare_and_extend: Script::new(scripts::COMPARE_AND_EXTEND),
        }
    }
}

fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)
}

/// Redis lock store
#[derive(Clone)]
pub struct RedisLockStore {
    client: Client,
    connection: Arc<OnceCell<ConnectionManager>>,
    scripts: Arc<LockScripts>,
    command_timeout: Duration,
}

impl RedisLockStore {
    /// Create a new Redis lock store with connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| Error::Infrastructure {
            message: format!("Failed to create Redis client: {}", e),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            connection: Arc::new(OnceCell::new()),
            scripts: Arc::new(LockScripts::new()),
            command_timeout: Duration::from_millis(DEFAULT_COMMAND_TIMEOUT_MS),
        })
    }

    /// Create a new Redis lock store with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{}:{}", host, port))
    }

    /// Set the deadline applied to every command
    pub fn with_command_timeout(mut self, command_timeout: Duration) -> Self {
        self.command_timeout = command_timeout;
        self
    }

    /// Deadline applied to every command
    pub fn command_timeout(&self) -> Duration {
        self.command_timeout
    }

    /// Run a Redis future under the command deadline
    async fn with_deadline<T, F>(&self, operation: &str, future: F) -> Result<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.command_timeout, future).await {
            Err(_) => Err(Error::timeout()),
            Ok(Err(e)) if e.is_timeout() => Err(Error::timeout()),
            Ok(Err(e)) => Err(Error::store_with_source(
                format!("Redis {} failed: {}", operation, e),
                e,
            )),
            Ok(Ok(value)) => Ok(value),
        }
    }

    /// Get the shared connection, connecting on first use
    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| {
                self.with_deadline("CONNECT", ConnectionManager::new(self.client.clone()))
            })
            .await?;
        Ok(manager.clone())
    }

    async fn run_script(
        &self,
        operation: &str,
        script: &Script,
        key: &str,
        token: &str,
        ttl: Option<Duration>,
    ) -> Result<bool> {
        let mut conn = self.connection().await?;
        let mut invocation = script.key(key);
        invocation.arg(token);
        if let Some(ttl) = ttl {
            invocation.arg(ttl_millis(ttl));
        }

        let reply: i64 = self
            .with_deadline(operation, invocation.invoke_async(&mut conn))
            .await?;
        debug!(key, operation, reply, "Redis lock script executed");
        Ok(reply == 1)
    }
}

#[async_trait]
impl LockStore for RedisLockStore {
    async fn set_if_absent(&self, key: &str, token: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.connection().await?;
        let reply: Option<String> = self
            .with_deadline(
                "SET",
                redis::cmd("SET")
                    .arg(key)
                    .arg(token)
                    .arg("NX")
                    .arg("PX")
                    .arg(ttl_millis(ttl))
                    .query_async(&mut conn),
            )
            .await?;
        Ok(reply.is_some())
    }

    async fn acquire_or_refresh(&self, key: &str, token: &str, ttl: Duration) -> Result<bool> {
        self.run_script(
            "ACQUIRE",
            &self.scripts.acquire_or_refresh,
            key,
            token,
            Some(ttl),
        )
        .await
    }

    async fn compare_and_delete(&self, key: &str, token: &str) -> Result<bool> {
        self.run_script(
            "UNLOCK",
            &self.scripts.compare_and_delete,
            key,
            token,
            None,
        )
        .await
    }

    async fn compare_and_extend(&self, key: &str, token: &str, ttl: Duration) -> Result<bool> {
        self.run_script(
            "PEXPIRE",
            &self.scripts.compare_and_extend,
            key,
            token,
            Some(ttl),
        )
        .await
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisLockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisLockStore")
            .field("connected", &self.connection.initialized())
            .field("command_timeout", &self.command_timeout)
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use dlm_application::ports::registry::{LOCK_STORES, LockStoreConfig, LockStoreEntry};

/// Factory function for creating Redis lock store instances.
fn redis_store_factory(config: &LockStoreConfig) -> std::result::Result<Arc<dyn LockStore>, String> {
    let uri = config
        .uri
        .clone()
        .unwrap_or_else(|| DEFAULT_REDIS_URI.to_string());

    let mut store =
        RedisLockStore::new(&uri).map_err(|e| format!("Failed to create Redis store: {e}"))?;
    if let Some(timeout_ms) = config.command_timeout_ms {
        store = store.with_command_timeout(Duration::from_millis(timeout_ms));
    }

    Ok(Arc::new(store))
}

#[linkme::distributed_slice(LOCK_STORES)]
static REDIS_STORE: LockStoreEntry = LockStoreEntry {
    name: "redis",
    description: "Redis lock store (SET NX PX + Lua compare-and-act scripts)",
    factory: redis_store_factory,
};
