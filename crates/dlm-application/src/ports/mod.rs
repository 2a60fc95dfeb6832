//! Application Ports
//!
//! Store contracts come from `dlm_domain::ports`; this module adds the
//! registry through which providers make themselves discoverable.

pub mod registry;

pub use dlm_domain::ports::{LockStore, LockStoreProvider};
pub use registry::{LockStoreConfig, LockStoreEntry, list_lock_stores, resolve_lock_store};
