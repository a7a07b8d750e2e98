//! Event bus between the toggle and whatever renders it.
//!
//! Design principles:
//! - Broadcast channel (tokio) - every subscriber receives every event
//! - Renderers drain all pending events per tick and keep only the latest
//!
//! Event types live next to the panel that emits them.

/// Broadcast channel capacity.
/// The toggle emits at most two events per state change, so lagging
/// receivers only ever skip stale states.
pub const CHANNEL_CAPACITY: usize = 16;
