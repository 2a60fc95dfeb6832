//! Domain Entities
//!
//! | Entity | Description |
//! |--------|-------------|
//! | [`LockHandle`] | Ownership of one acquisition, used for release/extend/renew |

/// Lock handle entity
pub mod lock_handle;

pub use lock_handle::{HandleState, LockHandle};
