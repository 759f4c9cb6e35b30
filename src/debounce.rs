//! Cancellable delayed task.
//!
//! Every call to [`Debouncer::trigger`] cancels the pending task (if any)
//! and schedules a new one that runs after the quiet period. Only the last
//! trigger in a burst of edits ever reaches its action.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct Debouncer {
    quiet: Duration,
    pending: Option<(CancellationToken, JoinHandle<()>)>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Schedule `action` after the quiet period, superseding any pending one.
    ///
    /// Must be called from within a tokio runtime. Cancellation also applies
    /// while `action` is running: a newer trigger aborts it at its next
    /// await point.
    pub fn trigger<F, Fut>(&mut self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        let child = token.clone();
        let quiet = self.quiet;
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {}
                _ = tokio::time::sleep(quiet) => {
                    tokio::select! {
                        _ = child.cancelled() => {}
                        _ = action() => {}
                    }
                }
            }
        });
        self.pending = Some((token, handle));
    }

    /// Cancel the pending task without scheduling another.
    pub fn cancel(&mut self) {
        if let Some((token, _)) = self.pending.take() {
            token.cancel();
        }
    }

    /// Whether a scheduled task has not finished yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|(token, handle)| !token.is_cancelled() && !handle.is_finished())
            .unwrap_or(false)
    }

    /// Wait for the pending task (if any) to complete or be cancelled.
    pub async fn flush(&mut self) {
        if let Some((_, handle)) = self.pending.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
