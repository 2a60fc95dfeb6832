//! # dlm
//!
//! Distributed mutual-exclusion locks over a shared key-value store.
//!
//! A lock is a store key (`<prefix>:<name>`) holding a random ownership
//! token with a lease. Acquisition is an atomic set-if-absent; release and
//! extension are atomic compare-and-act commands that only touch the key
//! while it still holds the caller's token. A background renewal task can
//! keep a lease alive for long critical sections.
//!
//! ## Example
//!
//! ```ignore
//! use dlm::infrastructure::{ConfigLoader, build_lock_service};
//!
//! let config = ConfigLoader::new().load()?;
//! let service = build_lock_service(&config)?;
//!
//! let handle = service
//!     .lock(config.lock.acquire_params("nightly-report"))
//!     .await
//!     .into_result()?;
//! let renewal = service.spawn_auto_renew(handle.clone(), config.lock.renew_params());
//! // critical section
//! service.unlock(&handle).await?;
//! renewal.join().await.ok();
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Lock handles, outcomes, store ports, token generation
//! - `application` - Lock service, retry and renewal policy, store registry
//! - `providers` - Redis and in-memory stores, named client set
//! - `infrastructure` - Configuration, logging and bootstrap

/// Domain layer - lock types and store ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use dlm_domain::*;
}

/// Application layer - lock service and registry
pub mod application {
    pub use dlm_application::*;
}

/// Store providers
pub mod providers {
    pub use dlm_providers::*;
}

/// Infrastructure layer - config, logging and bootstrap
pub mod infrastructure {
    pub use dlm_infrastructure::*;
}

/// Command line interface
pub mod cli;

pub use dlm_application::{LockService, RenewalTask};
pub use dlm_domain::entities::{HandleState, LockHandle};
pub use dlm_domain::value_objects::{
    AcquireOnceParams, AcquireParams, Acquisition, LockFailure, LockOptions, LockResult,
    RenewParams,
};
