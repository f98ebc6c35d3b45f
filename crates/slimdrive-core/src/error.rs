//! Error taxonomy for replicate sweeps and grid generation.

/// Errors produced while preparing or running a replicate sweep.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("invalid replicate count: {0} (must be at least 1)")]
    InvalidReplicateCount(u32),

    #[error("invalid {name} rate: {value} (must be a finite value in [0, 1])")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("simulator argument bundle is empty")]
    EmptyCommand,

    #[error("failed to run simulator {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("simulator {program} was terminated by a signal on replicate {replicate}")]
    Terminated { program: String, replicate: u32 },

    #[error("simulator produced no output on replicate {replicate}")]
    EmptyOutput { replicate: u32 },

    #[error("invalid grid axis {name}: {reason}")]
    InvalidAxis { name: &'static str, reason: String },
}

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;
