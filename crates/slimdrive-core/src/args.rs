//! Simulator argument bundles.

use crate::error::{DriverError, Result};
use crate::params::{format_rate, DriverConfig, RunParameters};

/// SLiM constant receiving the embryo resistance rate.
pub const EMBRYO_DEFINE: &str = "EMBRYO_RESISTANCE_RATE";

/// SLiM constant receiving the germline resistance rate.
pub const GERMLINE_DEFINE: &str = "GERMLINE_RESISTANCE_RATE";

/// Argument bundle for one simulator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorArgs {
    /// Command to execute (first element is the executable).
    pub command: Vec<String>,
}

impl SimulatorArgs {
    /// Build the argv for replicate `replicate` of a sweep.
    ///
    /// Layout: `slim [-s <seed>] -d EMBRYO_RESISTANCE_RATE=<e>
    /// -d GERMLINE_RESISTANCE_RATE=<g> <source>`. The seed is only present
    /// when the config carries a base seed.
    pub fn from_params(params: &RunParameters, config: &DriverConfig, replicate: u32) -> Self {
        let mut command = vec![config.slim_binary.clone()];

        if let Some(base) = config.base_seed {
            command.push("-s".to_string());
            command.push(base.wrapping_add(u64::from(replicate)).to_string());
        }

        command.push("-d".to_string());
        command.push(format!(
            "{EMBRYO_DEFINE}={}",
            format_rate(params.embryo_resistance_rate)
        ));
        command.push("-d".to_string());
        command.push(format!(
            "{GERMLINE_DEFINE}={}",
            format_rate(params.germline_resistance_rate)
        ));
        command.push(params.source_file.to_string_lossy().into_owned());

        Self { command }
    }

    /// Wrap an arbitrary command.
    pub fn custom(command: Vec<String>) -> Self {
        Self { command }
    }

    /// Split into executable and remaining arguments.
    pub fn split(&self) -> Result<(&str, &[String])> {
        match self.command.split_first() {
            Some((exe, rest)) => Ok((exe.as_str(), rest)),
            None => Err(DriverError::EmptyCommand),
        }
    }

    /// Executable name, or an empty string for an empty bundle.
    pub fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }
}
