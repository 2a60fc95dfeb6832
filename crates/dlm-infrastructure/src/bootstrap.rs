//! Bootstrap
//!
//! Turns an [`AppConfig`] into a ready [`LockService`]: every configured
//! store is resolved by provider name through the registry and collected
//! into a [`LockStoreClients`] set.

use crate::config::AppConfig;
use crate::constants::DEFAULT_STORE_NAME;
use dlm_application::LockService;
use dlm_application::ports::registry::resolve_lock_store;
use dlm_domain::error::{Error, Result};
use dlm_domain::ports::LockStore;
use dlm_providers::LockStoreClients;
use std::sync::Arc;
use tracing::info;

fn resolve(name: &str, config: &crate::config::StoreConfig) -> Result<Arc<dyn LockStore>> {
    let store = resolve_lock_store(&config.to_registry_config())
        .map_err(|e| Error::config(format!("Store '{}': {}", name, e)))?;
    info!(client = name, provider = store.provider_name(), "Lock store ready");
    Ok(store)
}

/// Build the client set from the configured stores
pub fn build_store_clients(config: &AppConfig) -> Result<LockStoreClients> {
    let default_config = config.default_store().ok_or_else(|| {
        Error::config(format!("A store named '{}' is required", DEFAULT_STORE_NAME))
    })?;

    let mut clients = LockStoreClients::new(resolve(DEFAULT_STORE_NAME, default_config)?);
    for (name, store_config) in &config.stores {
        if name == DEFAULT_STORE_NAME {
            continue;
        }
        clients = clients.with_client(name.clone(), resolve(name, store_config)?);
    }
    Ok(clients)
}

/// Build a lock service from configuration
///
/// # Example
///
/// ```ignore
/// let config = ConfigLoader::new().load()?;
/// let service = build_lock_service(&config)?;
/// let handle = service.lock(config.lock.acquire_params("job-42")).await.into_result()?;
/// ```
pub fn build_lock_service(config: &AppConfig) -> Result<LockService> {
    let clients = build_store_clients(config)?;
    Ok(LockService::new(
        Arc::new(clients),
        config.lock.to_options(),
    ))
}
