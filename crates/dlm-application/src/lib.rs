//! Application Layer - dlm
//!
//! Orchestrates the lock protocol on top of the store ports defined in
//! `dlm-domain`. Owns all retry, backoff and error-classification policy.
//!
//! ## Modules
//!
//! - `use_cases`: [`LockService`] and [`RenewalTask`]
//! - `ports`: store ports and the linkme store registry
//! - `utils`: cooperative delays
//!
//! ## Dependencies
//!
//! This crate depends only on `dlm-domain` and async runtime libraries;
//! concrete stores live in `dlm-providers`.

pub mod ports;
pub mod use_cases;
pub mod utils;

pub use use_cases::{LockService, RenewalTask};
