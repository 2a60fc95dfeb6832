//! Store client selection
//!
//! [`LockStoreClients`] maps client names to store connections and
//! implements the `get_client(name?)` contract used by the coordinator.

use crate::constants::DEFAULT_CLIENT_NAME;
use dlm_domain::error::{Error, Result};
use dlm_domain::ports::{LockStore, LockStoreProvider};
use std::collections::HashMap;
use std::sync::Arc;

/// Default store connection plus named alternatives
#[derive(Clone)]
pub struct LockStoreClients {
    default: Arc<dyn LockStore>,
    named: HashMap<String, Arc<dyn LockStore>>,
}

impl LockStoreClients {
    /// Client set with only a default connection
    pub fn new(default: Arc<dyn LockStore>) -> Self {
        Self {
            default,
            named: HashMap::new(),
        }
    }

    /// Register a named connection
    pub fn with_client(mut self, name: impl Into<String>, store: Arc<dyn LockStore>) -> Self {
        self.named.insert(name.into(), store);
        self
    }

    /// Names of the registered named connections, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.named.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl LockStoreProvider for LockStoreClients {
    fn get_client(&self, name: Option<&str>) -> Result<Arc<dyn LockStore>> {
        match name {
            None => Ok(Arc::clone(&self.default)),
            Some(name) => match self.named.get(name) {
                Some(store) => Ok(Arc::clone(store)),
                None if name == DEFAULT_CLIENT_NAME => Ok(Arc::clone(&self.default)),
                None => Err(Error::not_found(format!("lock store client '{name}'"))),
            },
        }
    }
}

impl std::fmt::Debug for LockStoreClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockStoreClients")
            .field("default", &self.default.provider_name())
            .field("named", &self.names())
            .finish()
    }
}
