//! Replicate sweeps and the suppression statistic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::args::SimulatorArgs;
use crate::classify::classify;
use crate::error::Result;
use crate::invoker::SimulatorInvoker;
use crate::obs::{self, sweep_span};
use crate::params::{format_rate, DriverConfig, RunParameters};

/// Outcome of a complete sweep over one parameter setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppressionSummary {
    pub embryo_resistance_rate: f64,
    pub germline_resistance_rate: f64,

    /// Replicates whose output carried the suppression marker.
    pub suppressed: u32,

    /// Replicates run.
    pub replicates: u32,

    /// `suppressed / replicates`.
    pub p_suppression: f64,
}

impl SuppressionSummary {
    /// Replicates that did not suppress the population.
    pub fn persisted(&self) -> u32 {
        self.replicates - self.suppressed
    }
}

/// The single result line: `embryo,germline,p_suppression`.
impl fmt::Display for SuppressionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            format_rate(self.embryo_resistance_rate),
            format_rate(self.germline_resistance_rate),
            format_rate(self.p_suppression)
        )
    }
}

/// Suppressed fraction of `replicates`.
pub fn suppression_fraction(suppressed: u32, replicates: u32) -> f64 {
    f64::from(suppressed) / f64::from(replicates)
}

/// Replicate aggregator.
pub struct ReplicateSweep;

impl ReplicateSweep {
    /// Run every replicate in order and compute the suppression fraction.
    ///
    /// Each replicate is invoked, awaited to completion and classified
    /// before the next one starts. The first invocation or classification
    /// error aborts the sweep; no partial summary is returned.
    pub async fn run(
        invoker: &dyn SimulatorInvoker,
        params: &RunParameters,
        config: &DriverConfig,
    ) -> Result<SuppressionSummary> {
        params.validate()?;

        let sweep_id = Uuid::new_v4().to_string();
        Self::run_replicates(invoker, params, config)
            .instrument(sweep_span(&sweep_id))
            .await
    }

    async fn run_replicates(
        invoker: &dyn SimulatorInvoker,
        params: &RunParameters,
        config: &DriverConfig,
    ) -> Result<SuppressionSummary> {
        let start = Instant::now();

        obs::emit_sweep_started(
            &params.source_file.to_string_lossy(),
            params.replicate_count,
            params.embryo_resistance_rate,
            params.germline_resistance_rate,
        );

        let mut suppressed = 0u32;
        for replicate in 0..params.replicate_count {
            let replicate_start = Instant::now();
            let args = SimulatorArgs::from_params(params, config, replicate);

            let output = invoker.invoke(replicate, &args).await?;
            let hit = classify(&output, config.mode, replicate)?;
            if hit {
                suppressed += 1;
            }

            obs::emit_replicate_finished(
                replicate,
                hit,
                replicate_start.elapsed().as_millis() as u64,
            );
        }

        let p_suppression = suppression_fraction(suppressed, params.replicate_count);
        obs::emit_sweep_finished(
            suppressed,
            params.replicate_count,
            p_suppression,
            start.elapsed().as_millis() as u64,
        );

        Ok(SuppressionSummary {
            embryo_resistance_rate: params.embryo_resistance_rate,
            germline_resistance_rate: params.germline_resistance_rate,
            suppressed,
            replicates: params.replicate_count,
            p_suppression,
        })
    }
}
