//! Lock Service Use Case
//!
//! Coordinator for the lock protocol: single-attempt and retrying
//! acquisition, release, lease extension and auto-renewal.
//!
//! Mutual exclusion is enforced entirely by the store's atomic
//! compare-and-act commands. The service keeps no in-process lock state
//! besides each handle's stopped flag, so any number of calls may run
//! concurrently for the same or different names.

use crate::use_cases::renewal::RenewalTask;
use crate::utils::{delay, delay_or_cancel};
use dlm_domain::entities::LockHandle;
use dlm_domain::ports::{LockStore, LockStoreProvider};
use dlm_domain::token::generate_token;
use dlm_domain::value_objects::{
    AcquireOnceParams, AcquireParams, Acquisition, LockFailure, LockOptions, LockResult,
    RenewParams,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Store command used by an acquisition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AcquireMode {
    /// Plain set-if-absent; a retry with the same token counts as a contender
    SetIfAbsent,
    /// Acquire-or-refresh script; a retry with the same token refreshes its own lease
    AcquireOrRefresh,
}

/// Shortened token for log output
fn short_token(token: &str) -> &str {
    token.get(..8).unwrap_or(token)
}

/// Duration in whole milliseconds for log fields, saturating at `u64::MAX`
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Reject handles that must not reach the store
fn check_usable(handle: &LockHandle) -> LockResult {
    if handle.has_empty_field() {
        return Err(LockFailure::FieldEmpty);
    }
    if handle.is_stopped() {
        return Err(LockFailure::Stopped);
    }
    Ok(())
}

/// Lock coordinator bound to one set of [`LockOptions`]
///
/// # Example
///
/// ```ignore
/// let service = LockService::new(stores, LockOptions::default());
///
/// let acquisition = service.lock(AcquireParams::new("job-42")).await;
/// let handle = acquisition.into_result()?;
/// // critical section
/// service.unlock(&handle).await?;
/// ```
#[derive(Clone)]
pub struct LockService {
    stores: Arc<dyn LockStoreProvider>,
    options: LockOptions,
}

impl LockService {
    /// Create a coordinator over the given store clients
    pub fn new(stores: Arc<dyn LockStoreProvider>, options: LockOptions) -> Self {
        Self { stores, options }
    }

    /// Options this coordinator was built with
    pub fn options(&self) -> &LockOptions {
        &self.options
    }

    /// Namespaced store key for a logical lock name
    pub fn lock_key(&self, name: &str) -> String {
        self.options.lock_key(name)
    }

    /// Generate a fresh ownership token
    pub fn generate_token() -> String {
        generate_token()
    }

    /// Store client selected by the options
    fn client(&self) -> dlm_domain::Result<Arc<dyn LockStore>> {
        self.stores.get_client(self.options.client_name())
    }

    /// Acquire `name` once with a plain set-if-absent command
    ///
    /// Fails with [`LockFailure::AlreadyExists`] when another token holds
    /// the key. The returned handle carries the attempted token either way.
    pub async fn lock_once(&self, params: AcquireOnceParams) -> Acquisition {
        self.attempt(params, AcquireMode::SetIfAbsent).await
    }

    /// Acquire `name` once, refreshing the lease if the key already holds
    /// the same token
    pub async fn lock_once_safe(&self, params: AcquireOnceParams) -> Acquisition {
        self.attempt(params, AcquireMode::AcquireOrRefresh).await
    }

    /// Acquire `name`, retrying at a fixed interval with the same token
    ///
    /// After each failed attempt the retry interval elapses before the
    /// retry bound is checked, so `max_retry_times = N` makes exactly
    /// `N + 1` attempts and `N + 1` delays when the lock stays contended.
    pub async fn lock(&self, params: AcquireParams) -> Acquisition {
        self.acquire_with_retry(params, AcquireMode::SetIfAbsent)
            .await
    }

    /// Retrying acquisition on top of [`lock_once_safe`](Self::lock_once_safe)
    ///
    /// A retry after a timed-out attempt that actually succeeded on the
    /// store becomes a refresh of that lease instead of a contention failure.
    pub async fn lock_safe(&self, params: AcquireParams) -> Acquisition {
        self.acquire_with_retry(params, AcquireMode::AcquireOrRefresh)
            .await
    }

    async fn acquire_with_retry(&self, params: AcquireParams, mode: AcquireMode) -> Acquisition {
        let token = params.token.clone().unwrap_or_else(generate_token);
        let mut retry_times: u32 = 0;

        loop {
            let acquisition = self.attempt(params.attempt(&token), mode).await;
            match &acquisition.result {
                Ok(()) => return acquisition,
                // Structurally invalid input cannot succeed on a later attempt
                Err(LockFailure::FieldEmpty) => return acquisition,
                Err(failure) => {
                    debug!(
                        key = acquisition.handle.key(),
                        retry = retry_times,
                        reason = %failure,
                        "Lock attempt failed"
                    );
                }
            }

            delay(params.retry_interval).await;
            if retry_times >= params.max_retry_times {
                warn!(
                    key = acquisition.handle.key(),
                    attempts = retry_times + 1,
                    "Giving up on lock after exhausting retries"
                );
                return acquisition;
            }
            retry_times += 1;
        }
    }

    async fn attempt(&self, params: AcquireOnceParams, mode: AcquireMode) -> Acquisition {
        let token = params.token.unwrap_or_else(generate_token);
        let handle = LockHandle::new(self.lock_key(&params.name), token);

        if params.name.is_empty() || handle.token().is_empty() {
            return Acquisition::failed(handle, LockFailure::FieldEmpty);
        }

        let store = match self.client() {
            Ok(store) => store,
            Err(e) => return Acquisition::failed(handle, e.into()),
        };

        let outcome = match mode {
            AcquireMode::SetIfAbsent => {
                store
                    .set_if_absent(handle.key(), handle.token(), params.expire)
                    .await
            }
            AcquireMode::AcquireOrRefresh => {
                store
                    .acquire_or_refresh(handle.key(), handle.token(), params.expire)
                    .await
            }
        };

        match outcome {
            Ok(true) => {
                info!(
                    key = handle.key(),
                    token = short_token(handle.token()),
                    expire_ms = millis(params.expire),
                    store = store.provider_name(),
                    "Lock acquired"
                );
                Acquisition::acquired(handle)
            }
            Ok(false) => Acquisition::failed(handle, LockFailure::AlreadyExists),
            Err(e) => {
                warn!(key = handle.key(), error = %e, "Lock acquisition failed on store");
                Acquisition::failed(handle, e.into())
            }
        }
    }

    /// Release the lock held by `handle`
    ///
    /// Deletes the key only if it still holds the handle's token. Every call
    /// that reaches the store stops the handle afterwards, whatever the
    /// outcome, so a second release fails locally with
    /// [`LockFailure::Stopped`].
    pub async fn unlock(&self, handle: &LockHandle) -> LockResult {
        check_usable(handle)?;

        let result = self.release_on_store(handle).await;
        handle.stop();
        result
    }

    async fn release_on_store(&self, handle: &LockHandle) -> LockResult {
        let store = self.client()?;
        match store.compare_and_delete(handle.key(), handle.token()).await {
            Ok(true) => {
                info!(
                    key = handle.key(),
                    token = short_token(handle.token()),
                    "Lock released"
                );
                Ok(())
            }
            Ok(false) => Err(LockFailure::NotMatched),
            Err(e) => {
                warn!(key = handle.key(), error = %e, "Lock release failed on store");
                Err(e.into())
            }
        }
    }

    /// Reset the lease of `handle` to `expire`
    ///
    /// Succeeds only while the key still holds the handle's token. The
    /// handle stays live on every outcome.
    pub async fn extend(&self, handle: &LockHandle, expire: Duration) -> LockResult {
        check_usable(handle)?;

        let store = self.client()?;
        match store
            .compare_and_extend(handle.key(), handle.token(), expire)
            .await
        {
            Ok(true) => {
                debug!(
                    key = handle.key(),
                    expire_ms = millis(expire),
                    "Lock lease extended"
                );
                Ok(())
            }
            Ok(false) => Err(LockFailure::NotMatched),
            Err(e) => {
                warn!(key = handle.key(), error = %e, "Lock extension failed on store");
                Err(e.into())
            }
        }
    }

    /// Keep extending the lease of `handle` until it is stopped or an
    /// extension fails
    ///
    /// Runs without an upper bound: only stopping the handle (from any
    /// clone) or a non-timeout failure ends it. Prefer
    /// [`auto_renew_until`](Self::auto_renew_until) or
    /// [`spawn_auto_renew`](Self::spawn_auto_renew) outside of tests.
    pub async fn auto_renew(&self, handle: &LockHandle, params: RenewParams) -> LockResult {
        self.auto_renew_until(handle, params, &CancellationToken::new())
            .await
    }

    /// Auto-renewal that also ends when `cancel` fires
    ///
    /// - stopped handle: `Err(RenewalStopped)`
    /// - cancelled: `Err(Cancelled)`
    /// - timed-out extension: retried immediately without delay
    /// - any other failed extension: returned as is
    pub async fn auto_renew_until(
        &self,
        handle: &LockHandle,
        params: RenewParams,
        cancel: &CancellationToken,
    ) -> LockResult {
        loop {
            if handle.is_stopped() {
                debug!(key = handle.key(), "Renewal loop found handle stopped");
                return Err(LockFailure::RenewalStopped);
            }
            if cancel.is_cancelled() {
                return Err(LockFailure::Cancelled);
            }

            match self.extend(handle, params.expire).await {
                Ok(()) => {
                    if !delay_or_cancel(params.interval, cancel).await {
                        return Err(LockFailure::Cancelled);
                    }
                }
                Err(failure) if failure.is_timeout() => {
                    debug!(key = handle.key(), "Lease extension timed out, retrying");
                    tokio::task::yield_now().await;
                }
                // Stopped between the check above and the extension
                Err(LockFailure::Stopped) => return Err(LockFailure::RenewalStopped),
                Err(failure) => {
                    warn!(key = handle.key(), reason = %failure, "Renewal loop exiting");
                    return Err(failure);
                }
            }
        }
    }

    /// Run [`auto_renew_until`](Self::auto_renew_until) on a background task
    pub fn spawn_auto_renew(&self, handle: LockHandle, params: RenewParams) -> RenewalTask {
        let cancel = CancellationToken::new();
        let service = self.clone();
        let task_cancel = cancel.clone();
        let join = tokio::spawn(async move {
            service
                .auto_renew_until(&handle, params, &task_cancel)
                .await
        });
        RenewalTask::new(cancel, join)
    }
}

impl std::fmt::Debug for LockService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockService")
            .field("options", &self.options)
            .finish()
    }
}
