//! # dlm Domain Layer
//!
//! Core types of the distributed lock protocol.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`entities`] | [`LockHandle`] with its one-way stopped flag |
//! | [`value_objects`] | Options, call parameters and outcomes |
//! | [`ports`] | [`LockStore`] and [`LockStoreProvider`] contracts |
//! | [`token`] | Ownership token generator |
//! | [`constants`] | Defaults and reason strings |
//! | [`error`] | Infrastructure [`Error`] type |

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod token;
pub mod value_objects;

pub use entities::{HandleState, LockHandle};
pub use error::{Error, Result};
pub use ports::{LockStore, LockStoreProvider};
pub use value_objects::{
    AcquireOnceParams, AcquireParams, Acquisition, LockFailure, LockOptions, LockResult,
    RenewParams,
};
