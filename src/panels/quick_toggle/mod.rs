//! Quick-settings toggle for a single unit.
//!
//! `UnitToggle` is the adapter between the unit observer and a host view:
//! it pushes state into the view and forwards clicks to the observer.

pub mod events;
pub mod headless;
pub mod toggle;

pub use toggle::{ToggleView, UnitToggle};
