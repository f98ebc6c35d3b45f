//! In-memory simulator fake (testing only).
//!
//! `ScriptedInvoker` replays canned outputs in order and records every
//! argument bundle it receives.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::args::SimulatorArgs;
use crate::error::{DriverError, Result};
use crate::invoker::SimulatorInvoker;

/// One scripted reply.
#[derive(Debug, Clone)]
enum Reply {
    Output(String),
    Crash,
}

/// Invoker that returns scripted outputs instead of running a process.
///
/// Once the script is exhausted every further call returns an empty output.
#[derive(Debug, Default)]
pub struct ScriptedInvoker {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(u32, SimulatorArgs)>>,
}

impl ScriptedInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the given outputs, returned in order.
    pub fn with_outputs<I, S>(outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invoker = Self::new();
        for output in outputs {
            invoker.push_output(output);
        }
        invoker
    }

    /// Queue one more output.
    pub fn push_output(&self, output: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Output(output.into()));
    }

    /// Queue a reply that fails as if the simulator had been killed.
    pub fn push_crash(&self) {
        self.replies.lock().unwrap().push_back(Reply::Crash);
    }

    /// Replicate indices and bundles received so far.
    pub fn calls(&self) -> Vec<(u32, SimulatorArgs)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of invocations so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SimulatorInvoker for ScriptedInvoker {
    async fn invoke(&self, replicate: u32, args: &SimulatorArgs) -> Result<String> {
        self.calls.lock().unwrap().push((replicate, args.clone()));
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Output(text)) => Ok(text),
            Some(Reply::Crash) => Err(DriverError::Terminated {
                program: args.program().to_string(),
                replicate,
            }),
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_then_empty() {
        let fake = ScriptedInvoker::with_outputs(["a", "b"]);
        let args = SimulatorArgs::custom(vec!["slim".to_string()]);

        assert_eq!(fake.invoke(0, &args).await.unwrap(), "a");
        assert_eq!(fake.invoke(1, &args).await.unwrap(), "b");
        assert_eq!(fake.invoke(2, &args).await.unwrap(), "");
        assert_eq!(fake.call_count(), 3);
        assert_eq!(fake.calls()[2].0, 2);
    }

    #[tokio::test]
    async fn scripted_crash_fails() {
        let fake = ScriptedInvoker::new();
        fake.push_crash();
        let args = SimulatorArgs::custom(vec!["slim".to_string()]);
        let err = fake.invoke(5, &args).await.unwrap_err();
        assert!(matches!(err, DriverError::Terminated { replicate: 5, .. }));
    }
}
