//! Lock Handle Entity
//!
//! A [`LockHandle`] is the in-process proof of one acquisition attempt: the
//! namespaced key, the ownership token written under it, and a one-way
//! live → stopped flag.
//!
//! ## Business Rules
//!
//! - `key` and `token` never change after creation
//! - The stopped flag is set at most once and never reset
//! - A stopped handle is rejected locally by release, extend and renew
//! - Clones share the stopped flag, so a renewal loop running on another
//!   task observes a stop issued through any clone

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Lifecycle state of a [`LockHandle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleState {
    /// The handle may still be used to release, extend or renew
    Live,
    /// The handle was released or abandoned and is permanently unusable
    Stopped,
}

/// Entity: ownership of one lock acquisition
///
/// # Example
///
/// ```
/// use dlm_domain::entities::{HandleState, LockHandle};
///
/// let handle = LockHandle::new("lock:job-42", "token-1");
/// assert_eq!(handle.state(), HandleState::Live);
///
/// handle.stop();
/// assert!(handle.is_stopped());
/// ```
#[derive(Clone)]
pub struct LockHandle {
    key: String,
    token: String,
    stopped: Arc<AtomicBool>,
}

impl LockHandle {
    /// Create a live handle bound to `(key, token)`
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            token: token.into(),
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Fully namespaced store key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Ownership token written under the key
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether either the key or the token is empty
    pub fn has_empty_field(&self) -> bool {
        self.key.is_empty() || self.token.is_empty()
    }

    /// Current lifecycle state
    pub fn state(&self) -> HandleState {
        if self.stopped.load(Ordering::Acquire) {
            HandleState::Stopped
        } else {
            HandleState::Live
        }
    }

    /// Whether the handle has been stopped
    pub fn is_stopped(&self) -> bool {
        self.state() == HandleState::Stopped
    }

    /// Mark the handle stopped
    ///
    /// Returns `true` only for the call that performed the live → stopped
    /// transition. The store is never contacted; an abandoned lock simply
    /// expires with its lease.
    pub fn stop(&self) -> bool {
        !self.stopped.swap(true, Ordering::AcqRel)
    }
}

impl fmt::Debug for LockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockHandle")
            .field("key", &self.key)
            .field("token", &self.token)
            .field("state", &self.state())
            .finish()
    }
}

impl PartialEq for LockHandle {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.token == other.token
    }
}

impl Eq for LockHandle {}
