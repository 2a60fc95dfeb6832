//! Store client configuration

use crate::constants::DEFAULT_STORE_PROVIDER;
use dlm_application::ports::registry::LockStoreConfig;
use serde::{Deserialize, Serialize};

/// One named store client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Registered provider name ("redis", "memory")
    pub provider: String,

    /// Connection URI, for network stores
    pub uri: Option<String>,

    /// Per-command deadline (milliseconds)
    pub command_timeout_ms: Option<u64>,
}

impl StoreConfig {
    /// Store config for `provider` with no URI
    pub fn new<S: Into<String>>(provider: S) -> Self {
        Self {
            provider: provider.into(),
            uri: None,
            command_timeout_ms: None,
        }
    }

    /// Set the URI
    pub fn with_uri<S: Into<String>>(mut self, uri: S) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Registry request for this client
    pub fn to_registry_config(&self) -> LockStoreConfig {
        let mut config = LockStoreConfig::new(self.provider.clone());
        if let Some(uri) = &self.uri {
            config = config.with_uri(uri.clone());
        }
        if let Some(timeout_ms) = self.command_timeout_ms {
            config = config.with_command_timeout_ms(timeout_ms);
        }
        config
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_PROVIDER)
    }
}
