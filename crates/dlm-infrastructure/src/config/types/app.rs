//! Main application configuration

use super::{LockConfig, LoggingConfig, StoreConfig};
use crate::constants::DEFAULT_STORE_NAME;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Lock protocol defaults
    #[serde(default)]
    pub lock: LockConfig,

    /// Store clients by name; `default` is required
    #[serde(default)]
    pub stores: BTreeMap<String, StoreConfig>,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Configuration of the default store client
    pub fn default_store(&self) -> Option<&StoreConfig> {
        self.stores.get(DEFAULT_STORE_NAME)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut stores = BTreeMap::new();
        stores.insert(DEFAULT_STORE_NAME.to_string(), StoreConfig::default());
        Self {
            lock: LockConfig::default(),
            stores,
            logging: LoggingConfig::default(),
        }
    }
}
