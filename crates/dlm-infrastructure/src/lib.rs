//! # dlm - Infrastructure Layer
//!
//! Cross-cutting technical concerns for the lock manager.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered configuration (defaults, TOML file, environment) |
//! | [`constants`] | Configuration and logging constants |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers for domain errors |
//! | [`bootstrap`] | Builds a ready `LockService` from configuration |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{build_lock_service, build_store_clients};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
