//! Trailing-edge debouncer for keystroke-driven requests.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs only the most recently scheduled task, after `delay` has passed
/// without a newer one being scheduled.
///
/// Scheduling aborts whatever is still pending, including a task that has
/// already started its request. Dropping the debouncer cancels it too, so no
/// task outlives the view that owns it.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending task with `task`, to run after the delay.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Aborts the pending task. Returns `true` if one was still running.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_last_scheduled_task_runs() {
        let runs = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(String::new()));
        let mut debouncer = Debouncer::from_millis(1000);

        for text in ["g", "ga", "gal"] {
            let runs = Arc::clone(&runs);
            let last = Arc::clone(&last);
            let text = text.to_string();
            debouncer.schedule(async move {
                runs.fetch_add(1, Ordering::SeqCst);
                *last.lock().unwrap() = text;
            });
            tokio::time::sleep(Duration::from_millis(200)).await;
        }

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(*last.lock().unwrap(), "gal");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn task_waits_for_delay() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::from_millis(1000);
        let counter = Arc::clone(&runs);
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_task() {
        let runs = Arc::new(AtomicUsize::new(0));
        {
            let mut debouncer = Debouncer::from_millis(100);
            let counter = Arc::clone(&runs);
            debouncer.schedule(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_reports_whether_task_was_pending() {
        let mut debouncer = Debouncer::from_millis(100);
        assert!(!debouncer.cancel());
        debouncer.schedule(async {});
        assert!(debouncer.cancel());
        assert!(!debouncer.is_pending());
    }
}
