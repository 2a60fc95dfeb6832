//! Lock Store Registry
//!
//! Auto-registration system for lock store backends.
//! Providers register a [`LockStoreEntry`] in the [`LOCK_STORES`] linkme
//! slice and are discovered at runtime by name.

use std::sync::Arc;

use dlm_domain::ports::LockStore;

/// Configuration for lock store creation
///
/// Providers use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct LockStoreConfig {
    /// Provider name (e.g., "redis", "memory")
    pub provider: String,
    /// Connection URI (for network stores)
    pub uri: Option<String>,
    /// Per-command deadline in milliseconds
    pub command_timeout_ms: Option<u64>,
}

impl LockStoreConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the command timeout in milliseconds
    pub fn with_command_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.command_timeout_ms = Some(timeout_ms);
        self
    }
}

/// Registry entry for lock store providers
pub struct LockStoreEntry {
    /// Unique provider name (e.g., "redis", "memory")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create a store instance
    pub factory: fn(&LockStoreConfig) -> Result<Arc<dyn LockStore>, String>,
}

/// Lock stores registered at link time
#[linkme::distributed_slice]
pub static LOCK_STORES: [LockStoreEntry] = [..];

/// Resolve a lock store by provider name from the registry
///
/// # Returns
/// * `Ok(Arc<dyn LockStore>)` - Created store instance
/// * `Err(String)` - Provider not found or creation failed
pub fn resolve_lock_store(config: &LockStoreConfig) -> Result<Arc<dyn LockStore>, String> {
    if let Some(entry) = LOCK_STORES.iter().find(|e| e.name == config.provider) {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = LOCK_STORES.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown lock store provider '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered lock stores as (name, description) pairs
pub fn list_lock_stores() -> Vec<(&'static str, &'static str)> {
    LOCK_STORES.iter().map(|e| (e.name, e.description)).collect()
}
