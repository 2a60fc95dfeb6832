//! Domain Port Interfaces
//!
//! Boundary contracts implemented by the providers layer. The coordinator
//! depends only on these traits, never on a concrete store client.

/// Store ports
pub mod store;

pub use store::{LockStore, LockStoreProvider};
