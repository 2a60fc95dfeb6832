//! Configuration
//!
//! Typed configuration sections and the layered loader.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LockConfig, LoggingConfig, StoreConfig};
