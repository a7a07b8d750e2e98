//! Toggle event definitions and broadcast event bus.
//!
//! Uses tokio::sync::broadcast so every renderer receives every event.

use crate::event_bus::CHANNEL_CAPACITY;
use std::sync::OnceLock;
use tokio::sync::broadcast::{self, Receiver, Sender};

/// Number of `PanelEvent` variants.
const VARIANT_COUNT: usize = 2;

/// Everything a renderer needs to draw the toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelEvent {
    /// Toggle checked state
    Checked(bool),
    /// Panel indicator icon visibility
    IndicatorVisible(bool),
}

impl PanelEvent {
    /// Get variant index for deduplication.
    #[inline]
    pub fn variant_index(&self) -> usize {
        match self {
            PanelEvent::Checked(_) => 0,
            PanelEvent::IndicatorVisible(_) => 1,
        }
    }
}

static PANEL_SENDER: OnceLock<Sender<PanelEvent>> = OnceLock::new();

fn get_sender() -> &'static Sender<PanelEvent> {
    PANEL_SENDER.get_or_init(|| {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        tx
    })
}

/// Send an event to all renderers. Non-blocking.
/// If no receivers, the event is dropped (expected during startup).
#[inline]
pub fn send(event: PanelEvent) {
    let _ = get_sender().send(event);
}

#[inline]
pub fn send_checked(checked: bool) {
    send(PanelEvent::Checked(checked));
}

#[inline]
pub fn send_indicator_visible(visible: bool) {
    send(PanelEvent::IndicatorVisible(visible));
}

/// Subscribe to the event bus.
/// Returns a new receiver that will receive all future events.
pub fn subscribe() -> Receiver<PanelEvent> {
    get_sender().subscribe()
}

/// Drain all pending events from a receiver, keeping only the latest per variant.
/// Handles RecvError::Lagged by continuing to drain.
pub fn drain_latest(rx: &mut Receiver<PanelEvent>) -> Vec<PanelEvent> {
    let mut events = Vec::with_capacity(VARIANT_COUNT);

    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(broadcast::error::TryRecvError::Empty) => break,
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(broadcast::error::TryRecvError::Closed) => break,
        }
    }

    if events.len() <= 1 {
        return events;
    }

    let mut seen = [false; VARIANT_COUNT];
    let mut result = Vec::with_capacity(VARIANT_COUNT);

    for event in events.into_iter().rev() {
        let idx = event.variant_index();
        if !seen[idx] {
            seen[idx] = true;
            result.push(event);
        }
    }

    result.reverse();
    result
}
