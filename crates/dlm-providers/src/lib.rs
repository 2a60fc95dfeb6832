//! # dlm - Lock Store Providers
//!
//! Implementations of the `LockStore` port defined in `dlm-domain`, and the
//! named client set implementing `LockStoreProvider`.
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Store | `LockStore` | Redis, InMemory |
//! | Client selection | `LockStoreProvider` | `LockStoreClients` |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! dlm-providers = { version = "0.1", default-features = false, features = ["store-redis"] }
//! ```
//!
//! Each store registers itself in the `dlm_application` store registry, so
//! it can be resolved by name from configuration.

// Re-export dlm-domain types commonly used with providers
pub use dlm_domain::error::{Error, Result};
pub use dlm_domain::ports::{LockStore, LockStoreProvider};

/// Provider-specific constants
pub mod constants;

/// Named store client selection
pub mod clients;

/// Lock store implementations
pub mod store;

pub use clients::LockStoreClients;
