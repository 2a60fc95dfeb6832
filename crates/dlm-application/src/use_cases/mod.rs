//! Use Cases
//!
//! | Use Case | Description |
//! |----------|-------------|
//! | [`LockService`] | Acquire, release, extend and auto-renew locks |
//! | [`RenewalTask`] | Handle to a background auto-renewal loop |

pub mod lock_service;
pub mod renewal;

pub use lock_service::LockService;
pub use renewal::RenewalTask;
