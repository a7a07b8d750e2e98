//! Recurring task scheduling on the tokio runtime.
//!
//! A scheduled task runs once per period, starting one period after it was
//! scheduled. It keeps running while it returns `ControlFlow::Continue` and
//! until its handle is cancelled or dropped. Periods are capped at one day.

use log::{debug, error, warn};
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Longest period a schedule runs with.
pub const MAX_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Handle to a scheduled recurring task.
/// Dropping the handle cancels the schedule.
#[derive(Debug)]
pub struct TaskHandle {
    task: JoinHandle<()>,
}

impl TaskHandle {
    /// Whether the schedule is still running.
    pub fn is_scheduled(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Run `task` every `period` until it breaks or the handle goes away.
///
/// Must be called from within a tokio runtime. Anything the task spawns
/// itself outlives cancellation.
pub fn schedule<F>(period: Duration, mut task: F) -> TaskHandle
where
    F: FnMut() -> ControlFlow<()> + Send + 'static,
{
    let period = if period > MAX_PERIOD {
        warn!("Period of {}s too long, capping at {}s", period.as_secs(), MAX_PERIOD.as_secs());
        MAX_PERIOD
    } else {
        period
    };
    let start = Instant::now().checked_add(period).unwrap_or_else(|| {
        error!("First tick in {}s is out of range, ticking now", period.as_secs());
        Instant::now()
    });

    let task = tokio::spawn(async move {
        let mut ticker = time::interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if task().is_break() {
                debug!("Scheduled task finished");
                break;
            }
        }
    });

    TaskHandle { task }
}

/// Stop a schedule. Ticks already handed off keep running.
pub fn cancel(handle: TaskHandle) {
    drop(handle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_task(count: Arc<AtomicUsize>) -> impl FnMut() -> ControlFlow<()> + Send + 'static {
        move || {
            count.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let _handle = schedule(Duration::from_secs(5), counting_task(Arc::clone(&count)));

        time::sleep(Duration::from_millis(4_900)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = schedule(Duration::from_secs(5), counting_task(Arc::clone(&count)));

        time::sleep(Duration::from_millis(5_100)).await;
        cancel(handle);
        time::sleep(Duration::from_secs(30)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_period_is_capped() {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = schedule(Duration::from_secs(u64::MAX), counting_task(Arc::clone(&count)));

        time::sleep(Duration::from_millis(10)).await;
        assert!(handle.is_scheduled());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(MAX_PERIOD).await;
        assert!(handle.is_scheduled());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_break_ends_schedule() {
        let count = Arc::new(AtomicUsize::new(0));
        let ticks = Arc::clone(&count);
        let handle = schedule(Duration::from_secs(1), move || {
            if ticks.fetch_add(1, Ordering::SeqCst) == 1 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        time::sleep(Duration::from_secs(10)).await;

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(!handle.is_scheduled());
    }
}
