//! Domain Value Objects
//!
//! Immutable values describing lock calls and their outcomes.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`LockOptions`] | Namespace prefix and store client selection |
//! | [`AcquireOnceParams`] | Single acquisition attempt |
//! | [`AcquireParams`] | Retrying acquisition policy |
//! | [`RenewParams`] | Auto-renewal lease and interval |
//! | [`Acquisition`] | Acquisition outcome with its handle |
//! | [`LockFailure`] | Failure classes and reason strings |

/// Coordinator options
pub mod options;
/// Call outcomes
pub mod outcome;
/// Call parameters
pub mod params;

pub use options::LockOptions;
pub use outcome::{Acquisition, LockFailure, LockResult};
pub use params::{AcquireOnceParams, AcquireParams, RenewParams};
