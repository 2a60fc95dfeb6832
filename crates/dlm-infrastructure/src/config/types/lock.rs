//! Lock protocol configuration

use dlm_domain::constants::{
    DEFAULT_LOCK_EXPIRE_MS, DEFAULT_LOCK_PREFIX, DEFAULT_MAX_RETRY_TIMES,
    DEFAULT_RENEW_INTERVAL_MS, DEFAULT_RETRY_INTERVAL_MS,
};
use dlm_domain::value_objects::{AcquireParams, LockOptions, RenewParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lock protocol defaults applied by the bootstrapped service and the CLI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LockConfig {
    /// Namespace prepended to every lock name
    pub prefix: String,

    /// Store client to use; unset selects the default client
    pub client_name: Option<String>,

    /// Lease length of acquisitions and extensions (milliseconds)
    pub default_expire_ms: u64,

    /// Pause between acquisition attempts (milliseconds)
    pub retry_interval_ms: u64,

    /// Retries after the first attempt
    pub max_retry_times: u32,

    /// Pause between renewals (milliseconds)
    pub renew_interval_ms: u64,
}

impl LockConfig {
    /// Default lease
    pub fn expire(&self) -> Duration {
        Duration::from_millis(self.default_expire_ms)
    }

    /// Options for a [`dlm_application::LockService`]
    pub fn to_options(&self) -> LockOptions {
        let options = LockOptions::default().with_prefix(self.prefix.clone());
        match &self.client_name {
            Some(name) => options.with_client_name(name.clone()),
            None => options,
        }
    }

    /// Retrying acquisition parameters for `name` with the configured policy
    pub fn acquire_params(&self, name: &str) -> AcquireParams {
        AcquireParams::new(name)
            .with_expire(self.expire())
            .with_retry_interval(Duration::from_millis(self.retry_interval_ms))
            .with_max_retry_times(self.max_retry_times)
    }

    /// Renewal parameters with the configured lease and interval
    pub fn renew_params(&self) -> RenewParams {
        RenewParams::new(
            self.expire(),
            Duration::from_millis(self.renew_interval_ms),
        )
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_LOCK_PREFIX.to_string(),
            client_name: None,
            default_expire_ms: DEFAULT_LOCK_EXPIRE_MS,
            retry_interval_ms: DEFAULT_RETRY_INTERVAL_MS,
            max_retry_times: DEFAULT_MAX_RETRY_TIMES,
            renew_interval_ms: DEFAULT_RENEW_INTERVAL_MS,
        }
    }
}
