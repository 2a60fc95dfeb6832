//! Provider Registry
//!
//! Link-time registration of lock store backends.

/// Lock store registry
pub mod store;

pub use store::{
    LOCK_STORES, LockStoreConfig, LockStoreEntry, list_lock_stores, resolve_lock_store,
};
