//! Simulator invocation.
//!
//! [`SimulatorInvoker`] is the seam between the aggregator and the outside
//! world. [`SlimInvoker`] launches a real process; tests use
//! [`crate::fakes::ScriptedInvoker`].

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::args::SimulatorArgs;
use crate::error::{DriverError, Result};
use crate::obs;

/// Runs the simulator once and hands back everything it wrote to stdout.
#[async_trait]
pub trait SimulatorInvoker: Send + Sync {
    /// Execute one replicate and return its captured stdout.
    async fn invoke(&self, replicate: u32, args: &SimulatorArgs) -> Result<String>;
}

/// Invoker backed by a child process.
///
/// Waits for the child to exit with no timeout. A non-zero exit code is
/// logged and otherwise ignored; a child killed by a signal is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlimInvoker;

impl SlimInvoker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SimulatorInvoker for SlimInvoker {
    async fn invoke(&self, replicate: u32, args: &SimulatorArgs) -> Result<String> {
        let (exe, rest) = args.split()?;
        debug!(replicate, command = ?args.command, "Launching simulator");

        let child = Command::new(exe)
            .args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| DriverError::Spawn {
                program: exe.to_string(),
                source,
            })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| DriverError::Spawn {
                program: exe.to_string(),
                source,
            })?;

        match output.status.code() {
            Some(0) => {}
            Some(code) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                obs::emit_nonzero_exit(replicate, code, &stderr);
            }
            None => {
                return Err(DriverError::Terminated {
                    program: exe.to_string(),
                    replicate,
                });
            }
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
