//! Structured lifecycle events for replicate sweeps.
//!
//! Every sweep runs inside a [`sweep_span`] tagged with a fresh sweep id, so
//! log lines from concurrent cluster jobs can be told apart once merged.

use tracing::{debug, info, warn, Span};

/// Span covering one sweep.
///
/// ```ignore
/// async { /* ... */ }.instrument(sweep_span("6f0c...")).await
/// // all events inside carry sweep_id = "6f0c..."
/// ```
pub fn sweep_span(sweep_id: &str) -> Span {
    tracing::info_span!("slimdrive.sweep", sweep_id = %sweep_id)
}

/// Emit event: sweep started for one parameter setting.
pub fn emit_sweep_started(source: &str, replicates: u32, embryo: f64, germline: f64) {
    info!(
        event = "sweep.started",
        source = %source,
        replicates = replicates,
        embryo_res = embryo,
        germline_res = germline,
    );
}

/// Emit event: one replicate classified.
pub fn emit_replicate_finished(replicate: u32, suppressed: bool, duration_ms: u64) {
    debug!(
        event = "replicate.finished",
        replicate = replicate,
        suppressed = suppressed,
        duration_ms = duration_ms,
    );
}

/// Emit event: simulator exited with a non-zero code. The output is still used.
pub fn emit_nonzero_exit(replicate: u32, exit_code: i32, stderr: &str) {
    warn!(
        event = "replicate.nonzero_exit",
        replicate = replicate,
        exit_code = exit_code,
        stderr = %stderr.trim_end(),
    );
}

/// Emit event: sweep finished with the aggregate statistic.
pub fn emit_sweep_finished(suppressed: u32, replicates: u32, p_suppression: f64, duration_ms: u64) {
    info!(
        event = "sweep.finished",
        suppressed = suppressed,
        replicates = replicates,
        p_suppression = p_suppression,
        duration_ms = duration_ms,
    );
}
