//! Lock Outcome Value Objects
//!
//! Every public lock operation reports a structured outcome instead of
//! raising. [`LockFailure`] names the failure classes; its `Display` text is
//! the reason string handed back to callers.

use crate::constants::{
    LOCK_EXIST, LOCK_FIELD_EMPTY, LOCK_NOT_EXIST, LOCK_STOP, RENEW_CANCELLED, RENEW_STOP,
};
use crate::entities::LockHandle;
use crate::error::Error;
use thiserror::Error;

/// Why a lock operation did not succeed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockFailure {
    /// Handle key or token is empty; detected locally
    #[error("{}", LOCK_FIELD_EMPTY)]
    FieldEmpty,

    /// Handle was already stopped; detected locally
    #[error("{}", LOCK_STOP)]
    Stopped,

    /// Key is held by another token
    #[error("{}", LOCK_EXIST)]
    AlreadyExists,

    /// Stored value differs from the token, or the key has expired
    #[error("{}", LOCK_NOT_EXIST)]
    NotMatched,

    /// Store call itself failed
    #[error("{message}")]
    Transport {
        /// Error message reported by the store client
        message: String,
        /// Whether the failure was an expired command deadline
        timed_out: bool,
    },

    /// Renewal loop found the handle stopped
    #[error("{}", RENEW_STOP)]
    RenewalStopped,

    /// Renewal loop was cancelled from outside
    #[error("{}", RENEW_CANCELLED)]
    Cancelled,
}

impl LockFailure {
    /// Whether this is the transient deadline case retried by auto-renewal
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { timed_out: true, .. })
    }

    /// Whether the store reported contention rather than an error
    pub fn is_contention(&self) -> bool {
        matches!(self, Self::AlreadyExists | Self::NotMatched)
    }
}

impl From<Error> for LockFailure {
    fn from(error: Error) -> Self {
        Self::Transport {
            timed_out: error.is_timeout(),
            message: error.to_string(),
        }
    }
}

/// Outcome of release, extend and renew
pub type LockResult<T = ()> = std::result::Result<T, LockFailure>;

/// Outcome of an acquisition attempt
///
/// The handle is returned on failure too, so a caller can retry with the
/// same `(key, token)` pair.
#[derive(Debug, Clone)]
pub struct Acquisition {
    /// Handle bound to the attempted key and token
    pub handle: LockHandle,
    /// Whether the lock is now held
    pub result: LockResult,
}

impl Acquisition {
    /// Successful acquisition
    pub fn acquired(handle: LockHandle) -> Self {
        Self {
            handle,
            result: Ok(()),
        }
    }

    /// Failed acquisition carrying the attempted handle
    pub fn failed(handle: LockHandle, failure: LockFailure) -> Self {
        Self {
            handle,
            result: Err(failure),
        }
    }

    /// Whether the lock was acquired
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Failure reason, if any
    pub fn err_reason(&self) -> Option<String> {
        self.result.as_ref().err().map(ToString::to_string)
    }

    /// Token written (or attempted) under the key
    pub fn token(&self) -> &str {
        self.handle.token()
    }

    /// Handle on success, failure otherwise
    pub fn into_result(self) -> LockResult<LockHandle> {
        self.result.map(|()| self.handle)
    }
}
