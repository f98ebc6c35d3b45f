//! Parameter grids for batch submission.
//!
//! A [`GridSpec`] expands into one `slimdrive` command line per cell of the
//! embryo x germline grid. The lines are meant to be redirected into a file
//! and handed to a cluster scheduler.

use crate::error::{DriverError, Result};
use crate::params::{DEFAULT_REPLICATES, DEFAULT_SOURCE};
use serde::{Deserialize, Serialize};

/// Slack below `stop` so that accumulated rounding in `(stop - start) / step`
/// does not add a spurious extra point.
const STEP_EPSILON: f64 = 1e-9;

/// Upper bound on the points of a single axis.
pub const MAX_AXIS_POINTS: usize = 1_000_000;

/// Half-open range `[start, stop)` sampled every `step`.
///
/// Points are `start + i * step` like `numpy.arange`, except that a ratio
/// landing within [`STEP_EPSILON`] above an integer does not add a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridAxis {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl GridAxis {
    /// Create a validated axis.
    pub fn new(name: &'static str, start: f64, stop: f64, step: f64) -> Result<Self> {
        let invalid = |reason: String| DriverError::InvalidAxis { name, reason };

        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(invalid("bounds and step must be finite".to_string()));
        }
        if step <= 0.0 {
            return Err(invalid(format!("step must be positive, got {step}")));
        }
        if stop <= start {
            return Err(invalid(format!("stop {stop} must exceed start {start}")));
        }

        let points = point_count(start, stop, step);
        if !points.is_finite() || points > MAX_AXIS_POINTS as f64 {
            return Err(invalid(format!(
                "step {step} yields more than {MAX_AXIS_POINTS} points"
            )));
        }
        Ok(Self { start, stop, step })
    }

    /// Build from a `[start, stop, step]` triple as parsed from the command line.
    pub fn from_triple(name: &'static str, values: &[f64]) -> Result<Self> {
        match values {
            [start, stop, step] => Self::new(name, *start, *stop, *step),
            _ => Err(DriverError::InvalidAxis {
                name,
                reason: format!("expected start,stop,step but got {} values", values.len()),
            }),
        }
    }

    /// Number of points on the axis.
    pub fn len(&self) -> usize {
        point_count(self.start, self.stop, self.step)
            .clamp(0.0, MAX_AXIS_POINTS as f64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Axis points in ascending order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.start + i as f64 * self.step)
    }
}

fn point_count(start: f64, stop: f64, step: f64) -> f64 {
    ((stop - start) / step - STEP_EPSILON).ceil()
}

/// Embryo resistance axis swept by default.
pub const DEFAULT_EMBRYO_AXIS: GridAxis = GridAxis {
    start: 0.0,
    stop: 0.25,
    step: 0.05,
};

/// Germline resistance axis swept by default.
pub const DEFAULT_GERMLINE_AXIS: GridAxis = GridAxis {
    start: 0.75,
    stop: 1.01,
    step: 0.05,
};

/// A full grid and the fixed arguments every emitted line shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Command that launches the replicate driver.
    pub driver: String,

    /// Model passed as `--src`.
    pub source_file: String,

    /// Replicates per cell, passed as `--nreps`.
    pub replicate_count: u32,

    pub embryo: GridAxis,
    pub germline: GridAxis,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            driver: "slimdrive".to_string(),
            source_file: DEFAULT_SOURCE.to_string(),
            replicate_count: DEFAULT_REPLICATES,
            embryo: DEFAULT_EMBRYO_AXIS,
            germline: DEFAULT_GERMLINE_AXIS,
        }
    }
}

impl GridSpec {
    /// Grid cells, embryo rate in the outer loop and germline rate inner.
    pub fn cells(&self) -> Vec<(f64, f64)> {
        self.embryo
            .values()
            .flat_map(move |embryo| self.germline.values().map(move |germline| (embryo, germline)))
            .collect()
    }

    /// Command line for one cell. Rates are printed with three decimals.
    pub fn command_line(&self, embryo: f64, germline: f64) -> String {
        format!(
            "{} --src {} --nreps {} --embryo-res {:.3} --germline-res {:.3}",
            self.driver, self.source_file, self.replicate_count, embryo, germline
        )
    }

    /// All command lines in grid order.
    pub fn lines(&self) -> Vec<String> {
        self.cells()
            .into_iter()
            .map(|(embryo, germline)| self.command_line(embryo, germline))
            .collect()
    }
}
