//! Fakes for the external collaborators, shared by unit tests.

use crate::panels::quick_toggle::ToggleView;
use crate::services::notifications::Notifier;
use olm_unit::{ControlChannel, ControlError, ProbeError, StatusProbe, UnitAction};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every request; optionally rejects them all.
#[derive(Default)]
pub struct FakeController {
    calls: Mutex<Vec<(String, UnitAction)>>,
    fail: bool,
}

impl FakeController {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, UnitAction)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ControlChannel for FakeController {
    async fn submit(&self, unit: &str, action: UnitAction) -> Result<(), ControlError> {
        self.calls.lock().unwrap().push((unit.to_string(), action));
        if self.fail {
            Err(ControlError::Connect(zbus::Error::Failure(
                "system bus unavailable".into(),
            )))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
struct ProbeState {
    active: AtomicBool,
    failing: AtomicBool,
    unknown: AtomicBool,
    calls: AtomicUsize,
    delay_ms: AtomicU64,
}

/// Probe reporting whatever the test last set. Clones share state.
#[derive(Clone, Default)]
pub struct FakeProbe {
    state: Arc<ProbeState>,
}

impl FakeProbe {
    pub fn reporting(active: bool) -> Self {
        let probe = Self::default();
        probe.set_active(active);
        probe
    }

    pub fn set_active(&self, active: bool) {
        self.state.active.store(active, Ordering::SeqCst);
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_unknown(&self, unknown: bool) {
        self.state.unknown.store(unknown, Ordering::SeqCst);
    }

    /// Every probe takes this long before reading the fake state.
    pub fn set_delay(&self, delay: Duration) {
        self.state
            .delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    fn spawn_error() -> ProbeError {
        ProbeError::Spawn {
            program: "systemctl".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        }
    }
}

impl StatusProbe for FakeProbe {
    async fn is_active(&self, _unit: &str) -> Result<bool, ProbeError> {
        self.state.calls.fetch_add(1, Ordering::SeqCst);

        let delay = self.state.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if self.state.failing.load(Ordering::SeqCst) {
            return Err(Self::spawn_error());
        }
        Ok(self.state.active.load(Ordering::SeqCst))
    }

    async fn unit_known(&self, _unit: &str) -> Result<bool, ProbeError> {
        if self.state.failing.load(Ordering::SeqCst) {
            return Err(Self::spawn_error());
        }
        Ok(!self.state.unknown.load(Ordering::SeqCst))
    }
}

/// Collects notifications instead of showing them.
#[derive(Clone, Default)]
pub struct FakeNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeNotifier {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for FakeNotifier {
    async fn notify_error(&self, summary: &str, body: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((summary.to_string(), body.to_string()));
    }
}

/// View remembering every value pushed into it.
#[derive(Clone, Default)]
pub struct FakeView {
    checked: Arc<Mutex<Vec<bool>>>,
    indicator: Arc<Mutex<Vec<bool>>>,
}

impl FakeView {
    pub fn checked_history(&self) -> Vec<bool> {
        self.checked.lock().unwrap().clone()
    }

    pub fn indicator_history(&self) -> Vec<bool> {
        self.indicator.lock().unwrap().clone()
    }
}

impl ToggleView for FakeView {
    fn set_checked(&self, checked: bool) {
        self.checked.lock().unwrap().push(checked);
    }

    fn set_indicator_visible(&self, visible: bool) {
        self.indicator.lock().unwrap().push(visible);
    }
}
