//! olm-unit - systemd unit control and probing
//!
//! Features:
//! - Privileged start/stop through the systemd Manager D-Bus interface
//! - Lazily built, reused D-Bus proxy (one per controller)
//! - Unprivileged `systemctl is-active` probe that only reads the exit code

pub mod error;
pub mod manager;
pub mod probe;
pub mod types;

pub use error::{ControlError, ProbeError};
pub use manager::{ControlChannel, SystemdController};
pub use probe::{StatusProbe, SystemctlProbe};
pub use types::{JOB_MODE_REPLACE, UnitAction, UnitScope};
