//! Background services behind the toggle.
//!
//! - `unit_state` - Unit state observer (probe, poll, user intent)
//! - `notifications` - Desktop notifications via D-Bus

pub mod notifications;
pub mod unit_state;

pub use notifications::{DesktopNotifier, Notifier};
pub use unit_state::UnitObserver;
