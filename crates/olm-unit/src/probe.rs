//! Unprivileged unit state queries via `systemctl`.
//!
//! Only exit codes are consumed. Output is captured so nothing leaks to the
//! host's terminal, then discarded.

use crate::error::ProbeError;
use crate::types::UnitScope;
use log::debug;
use std::future::Future;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// `systemctl status` exit code for a unit the manager does not know.
const EXIT_NO_SUCH_UNIT: i32 = 4;

/// Source of truth for whether a unit is running.
pub trait StatusProbe: Send + Sync + 'static {
    /// Whether `unit` is currently active.
    fn is_active(&self, unit: &str) -> impl Future<Output = Result<bool, ProbeError>> + Send;

    /// Whether the service manager knows `unit` at all.
    fn unit_known(&self, unit: &str) -> impl Future<Output = Result<bool, ProbeError>> + Send;
}

/// Probe spawning `systemctl`.
#[derive(Clone, Debug)]
pub struct SystemctlProbe {
    program: String,
    scope: UnitScope,
}

impl SystemctlProbe {
    pub fn new(scope: UnitScope) -> Self {
        Self::with_program("systemctl", scope)
    }

    /// Use a different `systemctl` binary.
    pub fn with_program(program: impl Into<String>, scope: UnitScope) -> Self {
        Self {
            program: program.into(),
            scope,
        }
    }

    async fn run(&self, verb: &str, unit: &str) -> Result<ExitStatus, ProbeError> {
        let child = Command::new(&self.program)
            .args(self.scope.systemctl_args())
            .arg(verb)
            .arg(unit)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| ProbeError::Communicate {
                program: self.program.clone(),
                source,
            })?;

        debug!(
            "{} {} {} exited with {:?}",
            self.program,
            verb,
            unit,
            output.status.code()
        );
        Ok(output.status)
    }
}

impl Default for SystemctlProbe {
    fn default() -> Self {
        Self::new(UnitScope::default())
    }
}

impl StatusProbe for SystemctlProbe {
    async fn is_active(&self, unit: &str) -> Result<bool, ProbeError> {
        // Exit status 0 means active, non-zero means inactive
        Ok(self.run("is-active", unit).await?.success())
    }

    async fn unit_known(&self, unit: &str) -> Result<bool, ProbeError> {
        let status = self.run("status", unit).await?;
        Ok(status.code() != Some(EXIT_NO_SUCH_UNIT))
    }
}
