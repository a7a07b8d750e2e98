//! Error types for olm-unit

/// Failure of a privileged start/stop request.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("D-Bus connection failed: {0}")]
    Connect(#[source] zbus::Error),

    #[error("D-Bus error: {0}")]
    DBus(#[from] zbus::Error),
}

/// Failure to run the unprivileged status probe.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process started but waiting on it or reading its output failed.
    #[error("failed to read from {program}: {source}")]
    Communicate {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
