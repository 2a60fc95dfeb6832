//! Cooperative delay primitives
//!
//! Retry and renewal loops suspend here between attempts instead of
//! blocking a thread.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Suspend the current task for `duration`
pub async fn delay(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Suspend for `duration` unless `cancel` fires first
///
/// Returns `true` when the full delay elapsed and `false` when cancelled.
pub async fn delay_or_cancel(duration: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        () = cancel.cancelled() => false,
        () = delay(duration) => true,
    }
}
