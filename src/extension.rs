//! Host lifecycle: enable and disable the toggle.
//!
//! Enabling checks the unit exists before anything gets installed. A missing
//! unit is reported once through the notifier and leaves nothing behind.

use crate::config::ToggleConfig;
use crate::panels::quick_toggle::{ToggleView, UnitToggle};
use crate::services::{Notifier, UnitObserver};
use log::{error, info};
use olm_unit::{ControlChannel, StatusProbe};
use std::sync::Arc;

const NOTIFY_SUMMARY: &str = "OLM Toggle";

pub struct Extension<C, P, N> {
    config: ToggleConfig,
    controller: Arc<C>,
    probe: P,
    notifier: N,
    toggle: Option<UnitToggle<C, P>>,
}

impl<C, P, N> Extension<C, P, N>
where
    C: ControlChannel,
    P: StatusProbe + Clone,
    N: Notifier,
{
    pub fn new(config: ToggleConfig, controller: Arc<C>, probe: P, notifier: N) -> Self {
        Self {
            config,
            controller,
            probe,
            notifier,
            toggle: None,
        }
    }

    /// Install the toggle into `view`.
    /// Returns false when the unit is unknown; the user has been notified.
    pub async fn enable<V: ToggleView>(&mut self, view: Arc<V>) -> bool {
        if self.toggle.is_some() {
            info!("{} toggle already enabled", self.config.unit);
            return true;
        }

        let unit = self.config.unit.as_str();
        let known = match self.probe.unit_known(unit).await {
            Ok(known) => known,
            Err(e) => {
                error!("Could not look up {}: {}", unit, e);
                false
            }
        };

        if !known {
            error!("{} not found", unit);
            let body = format!("{} is not configured on this system", unit);
            self.notifier.notify_error(NOTIFY_SUMMARY, &body).await;
            return false;
        }

        let observer = UnitObserver::new(
            unit,
            self.config.poll_interval(),
            Arc::clone(&self.controller),
            self.probe.clone(),
        );
        self.toggle = Some(UnitToggle::new(observer, view));
        info!("{} toggle enabled", unit);
        true
    }

    /// Tear the toggle down. No-op when not enabled.
    pub fn disable(&mut self) {
        if let Some(toggle) = self.toggle.take() {
            toggle.destroy();
            info!("{} toggle disabled", self.config.unit);
        }
    }

    pub fn toggle(&self) -> Option<&UnitToggle<C, P>> {
        self.toggle.as_ref()
    }
}
