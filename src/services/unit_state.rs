//! Unit state observer.
//!
//! Owns the single "is the unit active" flag shown by the toggle.
//! The flag is only ever written from probe results: user intent triggers a
//! control request and ensures polling, the next probe reports the outcome.
//!
//! Probes run in their own tasks. Stopping the poll schedule never cancels a
//! probe already running, so one late result may still land afterwards.

use crate::scheduler::{self, TaskHandle};
use log::{debug, error, info, warn};
use olm_unit::{ControlChannel, StatusProbe, UnitAction};
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default delay between two status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// State shared with the poll schedule and in-flight tasks.
struct Shared<C, P> {
    unit: String,
    controller: Arc<C>,
    probe: P,
    active: watch::Sender<bool>,
}

impl<C: ControlChannel, P: StatusProbe> Shared<C, P> {
    async fn probe(&self) -> bool {
        match self.probe.is_active(&self.unit).await {
            Ok(active) => active,
            Err(e) => {
                error!("Failed to check {} status: {}", self.unit, e);
                false
            }
        }
    }

    async fn refresh(&self) -> bool {
        let active = self.probe().await;
        self.set_active(active);
        active
    }

    fn set_active(&self, active: bool) {
        let changed = self.active.send_if_modified(|current| {
            if *current == active {
                return false;
            }
            *current = active;
            true
        });

        if changed {
            info!(
                "{} is now {}",
                self.unit,
                if active { "active" } else { "inactive" }
            );
        } else {
            debug!("{} still {}", self.unit, if active { "active" } else { "inactive" });
        }
    }
}

/// Observer for one unit. Polling stops when the observer is dropped.
pub struct UnitObserver<C, P> {
    shared: Arc<Shared<C, P>>,
    poll_interval: Duration,
    poll: Mutex<Option<TaskHandle>>,
}

impl<C: ControlChannel, P: StatusProbe> UnitObserver<C, P> {
    /// Create the observer, check the unit once right away and start polling.
    /// Must be called from within a tokio runtime.
    pub fn new(
        unit: impl Into<String>,
        poll_interval: Duration,
        controller: Arc<C>,
        probe: P,
    ) -> Self {
        let (active, _) = watch::channel(false);
        let observer = Self {
            shared: Arc::new(Shared {
                unit: unit.into(),
                controller,
                probe,
                active,
            }),
            poll_interval,
            poll: Mutex::new(None),
        };

        observer.spawn_refresh();
        observer.start_polling();
        observer
    }

    pub fn unit(&self) -> &str {
        &self.shared.unit
    }

    /// Last known state.
    pub fn is_active(&self) -> bool {
        *self.shared.active.borrow()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shared.active.subscribe()
    }

    pub fn is_polling(&self) -> bool {
        self.lock_poll()
            .as_ref()
            .is_some_and(TaskHandle::is_scheduled)
    }

    /// Handle a flip of the toggle.
    ///
    /// Sends start or stop without waiting for it. The returned handle may be
    /// dropped: a failed request is logged and leaves the state untouched.
    pub fn on_user_toggle(&self, desired: bool) -> JoinHandle<()> {
        let action = UnitAction::for_desired(desired);
        let shared = Arc::clone(&self.shared);

        let request = tokio::spawn(async move {
            if let Err(e) = shared.controller.submit(&shared.unit, action).await {
                warn!("Could not {} {}, keeping last known state: {}", action, shared.unit, e);
            }
        });

        // Restart checking when the user turns the unit on
        if desired {
            self.start_polling();
        }

        request
    }

    /// Query the unit without touching the stored state.
    /// Any failure reads as inactive.
    pub async fn probe(&self) -> bool {
        self.shared.probe().await
    }

    /// Query the unit and store the result.
    pub async fn refresh(&self) -> bool {
        let active = self.probe().await;
        self.shared.set_active(active);
        active
    }

    /// Start periodic checks. No-op when already polling.
    pub fn start_polling(&self) {
        let mut poll = self.lock_poll();
        if poll.as_ref().is_some_and(TaskHandle::is_scheduled) {
            return;
        }

        debug!(
            "Polling {} every {}s",
            self.shared.unit,
            self.poll_interval.as_secs()
        );
        let shared = Arc::clone(&self.shared);
        *poll = Some(scheduler::schedule(self.poll_interval, move || {
            let shared = Arc::clone(&shared);
            tokio::spawn(async move {
                shared.refresh().await;
            });
            ControlFlow::Continue(())
        }));
    }

    /// Stop periodic checks. No-op when not polling.
    pub fn stop_polling(&self) {
        if let Some(handle) = self.lock_poll().take() {
            debug!("Stopped polling {}", self.shared.unit);
            scheduler::cancel(handle);
        }
    }

    /// Tear down: no further checks get scheduled.
    pub fn destroy(&self) {
        self.stop_polling();
    }

    fn spawn_refresh(&self) {
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            shared.refresh().await;
        });
    }

    fn lock_poll(&self) -> MutexGuard<'_, Option<TaskHandle>> {
        self.poll.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
