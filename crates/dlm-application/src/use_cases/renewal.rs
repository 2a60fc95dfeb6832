//! Background renewal task handle

use dlm_domain::value_objects::{LockFailure, LockResult};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Auto-renewal loop running on its own task
///
/// Dropping the task does not stop the loop; call [`cancel`](Self::cancel)
/// or stop the lock handle.
#[derive(Debug)]
pub struct RenewalTask {
    cancel: CancellationToken,
    join: JoinHandle<LockResult>,
}

impl RenewalTask {
    pub(crate) fn new(cancel: CancellationToken, join: JoinHandle<LockResult>) -> Self {
        Self { cancel, join }
    }

    /// Ask the loop to exit at its next suspension point
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that cancels this loop
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the loop has exited
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the loop to exit and return why it did
    pub async fn join(self) -> LockResult {
        match self.join.await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Renewal task aborted");
                Err(LockFailure::Cancelled)
            }
        }
    }

    /// Cancel the loop and wait for it to exit
    pub async fn shutdown(self) -> LockResult {
        self.cancel();
        self.join().await
    }
}
