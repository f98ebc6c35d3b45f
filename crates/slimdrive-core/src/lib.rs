//! slimdrive core - replicate sweeps over a SLiM gene-drive model
//!
//! Provides:
//! - Suppression classification of simulator output
//! - Sequential replicate sweeps yielding the suppression fraction
//! - Parameter grids expanded into batch command lines

pub mod aggregate;
pub mod args;
pub mod classify;
pub mod error;
pub mod fakes;
pub mod grid;
pub mod invoker;
pub mod obs;
pub mod params;
pub mod telemetry;

// Re-export key types
pub use aggregate::{suppression_fraction, ReplicateSweep, SuppressionSummary};
pub use args::SimulatorArgs;
pub use classify::{classify, is_suppressed, SUPPRESSION_MARKER};
pub use error::{DriverError, Result};
pub use grid::{GridAxis, GridSpec, DEFAULT_EMBRYO_AXIS, DEFAULT_GERMLINE_AXIS};
pub use invoker::{SimulatorInvoker, SlimInvoker};
pub use obs::{
    emit_nonzero_exit, emit_replicate_finished, emit_sweep_finished, emit_sweep_started,
    sweep_span,
};
pub use params::{format_rate, ClassifyMode, DriverConfig, RunParameters};
pub use telemetry::init_tracing;

/// slimdrive version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
