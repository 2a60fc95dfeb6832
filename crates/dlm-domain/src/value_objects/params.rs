//! Call Parameter Value Objects
//!
//! Request records for acquisition and renewal. They live only for the
//! duration of one call.

use crate::constants::{
    DEFAULT_LOCK_EXPIRE_MS, DEFAULT_MAX_RETRY_TIMES, DEFAULT_RENEW_INTERVAL_MS,
    DEFAULT_RETRY_INTERVAL_MS,
};
use std::time::Duration;

/// Parameters of a single acquisition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquireOnceParams {
    /// Logical lock name, namespaced by the coordinator
    pub name: String,
    /// Lease duration
    pub expire: Duration,
    /// Caller-supplied token; a fresh one is generated when `None`
    pub token: Option<String>,
}

impl AcquireOnceParams {
    /// Single attempt on `name` with the given lease
    pub fn new<S: Into<String>>(name: S, expire: Duration) -> Self {
        Self {
            name: name.into(),
            expire,
            token: None,
        }
    }

    /// Reuse a known token instead of generating one
    pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Parameters of a retrying acquisition
///
/// ## Example
///
/// ```
/// use dlm_domain::value_objects::AcquireParams;
/// use std::time::Duration;
///
/// let params = AcquireParams::new("job-42")
///     .with_expire(Duration::from_secs(1))
///     .with_max_retry_times(0);
/// assert_eq!(params.retry_interval, Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquireParams {
    /// Logical lock name, namespaced by the coordinator
    pub name: String,
    /// Lease duration
    pub expire: Duration,
    /// Fixed delay after every failed attempt
    pub retry_interval: Duration,
    /// Retries allowed after the first attempt
    pub max_retry_times: u32,
    /// Caller-supplied token reused across attempts; generated when `None`
    pub token: Option<String>,
}

impl AcquireParams {
    /// Retrying acquisition on `name` with default lease and retry policy
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            expire: Duration::from_millis(DEFAULT_LOCK_EXPIRE_MS),
            retry_interval: Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS),
            max_retry_times: DEFAULT_MAX_RETRY_TIMES,
            token: None,
        }
    }

    /// Set the lease duration
    pub fn with_expire(mut self, expire: Duration) -> Self {
        self.expire = expire;
        self
    }

    /// Set the delay between attempts
    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    /// Set the number of retries after the first attempt
    pub fn with_max_retry_times(mut self, max_retry_times: u32) -> Self {
        self.max_retry_times = max_retry_times;
        self
    }

    /// Reuse a known token instead of generating one
    pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Single-attempt parameters for one iteration of the retry loop
    pub fn attempt(&self, token: &str) -> AcquireOnceParams {
        AcquireOnceParams::new(self.name.clone(), self.expire).with_token(token)
    }
}

/// Parameters of the auto-renewal loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenewParams {
    /// Lease applied on every extension
    pub expire: Duration,
    /// Delay after each successful extension
    pub interval: Duration,
}

impl RenewParams {
    /// Renew with `expire` every `interval`
    pub fn new(expire: Duration, interval: Duration) -> Self {
        Self { expire, interval }
    }
}

impl Default for RenewParams {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_LOCK_EXPIRE_MS),
            Duration::from_millis(DEFAULT_RENEW_INTERVAL_MS),
        )
    }
}
