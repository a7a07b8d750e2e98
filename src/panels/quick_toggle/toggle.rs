//! Binding between a unit observer and a host view.

use crate::services::UnitObserver;
use log::debug;
use olm_unit::{ControlChannel, StatusProbe};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// What the host has to offer to show the toggle.
pub trait ToggleView: Send + Sync + 'static {
    fn set_checked(&self, checked: bool);

    /// The panel indicator is only shown while the unit is active.
    fn set_indicator_visible(&self, visible: bool);
}

/// Toggle for one unit, reporting into a `ToggleView`.
pub struct UnitToggle<C, P> {
    observer: UnitObserver<C, P>,
    binding: JoinHandle<()>,
}

impl<C: ControlChannel, P: StatusProbe> UnitToggle<C, P> {
    /// Bind `observer` to `view`. The current state is pushed right away,
    /// then again on every transition.
    pub fn new<V: ToggleView>(observer: UnitObserver<C, P>, view: Arc<V>) -> Self {
        let mut rx = observer.subscribe();
        let checked = *rx.borrow_and_update();
        view.set_checked(checked);
        view.set_indicator_visible(checked);

        let binding = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let checked = *rx.borrow_and_update();
                view.set_checked(checked);
                view.set_indicator_visible(checked);
            }
            debug!("Toggle binding closed");
        });

        Self { observer, binding }
    }

    pub fn observer(&self) -> &UnitObserver<C, P> {
        &self.observer
    }

    /// The user flipped the toggle to `desired`.
    /// The returned handle may be dropped, failures are only logged.
    pub fn clicked(&self, desired: bool) -> JoinHandle<()> {
        self.observer.on_user_toggle(desired)
    }

    /// Stop polling and detach from the view.
    pub fn destroy(&self) {
        self.observer.destroy();
        self.binding.abort();
    }
}

impl<C, P> Drop for UnitToggle<C, P> {
    fn drop(&mut self) {
        self.binding.abort();
    }
}
