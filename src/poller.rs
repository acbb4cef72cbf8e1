//! Periodic task scheduling.
//!
//! A [`Poller`] runs one async task on a fixed period. The first tick fires
//! immediately, then every `period` thereafter. A cycle's failure is logged
//! and contained at the cycle boundary; the timer always keeps firing.
//!
//! Cycles of one poller are awaited inline, so they never overlap: a slow
//! cycle delays the next tick rather than racing it over shared state.
//! Independent pollers do not coordinate with each other at all.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

/// Spawns independently ticking periodic tasks.
#[derive(Debug)]
pub struct Poller;

impl Poller {
    /// Spawn a task that runs every `period`.
    ///
    /// The task is an async fetch-and-process unit returning `Result`; an
    /// `Err` is logged at WARN and the next tick proceeds normally.
    ///
    /// Returns a handle that stops future firings. Polling normally runs
    /// for the life of the process; the handle exists for clean shutdown
    /// and for tests.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::time::Duration;
    /// use replwatch::poller::Poller;
    ///
    /// # async fn example() {
    /// let handle = Poller::spawn("heartbeat", Duration::from_secs(3), || async {
    ///     // fetch and process one snapshot
    ///     Ok(())
    /// });
    /// // ... later
    /// handle.stop();
    /// # }
    /// ```
    pub fn spawn<F, Fut>(name: impl Into<String>, period: Duration, mut task: F) -> PollerHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send,
    {
        let name = name.into();
        let (stop_tx, mut stop_rx) = watch::channel(false);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(err) = task().await {
                            warn!(poller = %name, error = %err, "poll cycle failed");
                        }
                    }
                    changed = stop_rx.changed() => {
                        // A dropped handle counts as a stop request too.
                        if changed.is_err() || *stop_rx.borrow() {
                            debug!(poller = %name, "poller stopped");
                            break;
                        }
                    }
                }
            }
        });

        PollerHandle { stop_tx }
    }
}

/// Handle for stopping a running poller.
///
/// Dropping the handle also stops the poller; call [`stop`](Self::stop) to
/// make that explicit.
#[derive(Debug)]
pub struct PollerHandle {
    stop_tx: watch::Sender<bool>,
}

impl PollerHandle {
    /// Stop future firings. Already-started cycles run to completion.
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    type BoxedTask = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

    fn counting_task(count: Arc<AtomicUsize>, fail: bool) -> impl FnMut() -> BoxedTask {
        move || {
            let count = count.clone();
            Box::pin(async move {
                count.fetch_add(1, Ordering::SeqCst);
                if fail {
                    anyhow::bail!("simulated transport error");
                }
                Ok(())
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_fires_immediately() {
        let count = Arc::new(AtomicUsize::new(0));
        let _handle = Poller::spawn("t", Duration::from_secs(3), counting_task(count.clone(), false));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_repeat_at_the_configured_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let _handle = Poller::spawn("t", Duration::from_secs(3), counting_task(count.clone(), false));

        tokio::time::sleep(Duration::from_secs(10)).await;
        // Immediate tick plus one at 3s, 6s and 9s
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_task_keeps_firing() {
        let count = Arc::new(AtomicUsize::new(0));
        let _handle = Poller::spawn("t", Duration::from_secs(3), counting_task(count.clone(), true));

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert!(count.load(Ordering::SeqCst) >= 10);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_future_firings() {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Poller::spawn("t", Duration::from_secs(3), counting_task(count.clone(), false));

        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.stop();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let after_stop = count.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn independent_pollers_do_not_coordinate() {
        let fast = Arc::new(AtomicUsize::new(0));
        let slow = Arc::new(AtomicUsize::new(0));
        let _fast = Poller::spawn("fast", Duration::from_secs(1), counting_task(fast.clone(), false));
        let _slow = Poller::spawn("slow", Duration::from_secs(5), counting_task(slow.clone(), false));

        tokio::time::sleep(Duration::from_secs(10) + Duration::from_millis(10)).await;
        assert_eq!(fast.load(Ordering::SeqCst), 11);
        assert_eq!(slow.load(Ordering::SeqCst), 3);
    }
}
