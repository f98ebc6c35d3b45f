//! Suppression classification of simulator output.

use crate::error::{DriverError, Result};
use crate::params::ClassifyMode;

/// Marker the model prints when the population has been driven to extinction.
pub const SUPPRESSION_MARKER: &str = "SUPPRESSION";

/// Whether any line of `output` starts with [`SUPPRESSION_MARKER`].
///
/// Case-sensitive and prefix-only: a line that mentions the marker later on
/// does not count. Never fails; empty or truncated text is simply `false`.
pub fn is_suppressed(output: &str) -> bool {
    output
        .lines()
        .any(|line| line.starts_with(SUPPRESSION_MARKER))
}

/// Classify one replicate's output under the given mode.
///
/// In [`ClassifyMode::Strict`] an output with no non-blank line is rejected;
/// any non-empty text is still accepted and classified as usual.
pub fn classify(output: &str, mode: ClassifyMode, replicate: u32) -> Result<bool> {
    if mode == ClassifyMode::Strict && output.lines().all(|line| line.trim().is_empty()) {
        return Err(DriverError::EmptyOutput { replicate });
    }
    Ok(is_suppressed(output))
}
