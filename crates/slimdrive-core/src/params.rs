//! Run parameters and driver configuration.

use crate::error::{DriverError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default SLiM model driven when no source is given.
pub const DEFAULT_SOURCE: &str = "distant_site_pan_TA.slim";

/// Default number of replicates per parameter setting.
pub const DEFAULT_REPLICATES: u32 = 10;

/// Default embryo resistance rate.
pub const DEFAULT_EMBRYO_RES: f64 = 0.1;

/// Default germline resistance rate.
pub const DEFAULT_GERMLINE_RES: f64 = 1.0;

/// Parameters for one sweep: a model and the setting it runs under.
///
/// Built once from the command line and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Path to the SLiM model script.
    pub source_file: PathBuf,

    /// Number of independent simulator runs.
    pub replicate_count: u32,

    /// Probability that embryo cuts are resisted.
    pub embryo_resistance_rate: f64,

    /// Probability that germline cuts are resisted.
    pub germline_resistance_rate: f64,
}

impl RunParameters {
    /// Create a validated parameter record.
    ///
    /// Fails on a zero replicate count or a rate outside `[0, 1]`.
    pub fn new(
        source_file: PathBuf,
        replicate_count: u32,
        embryo_resistance_rate: f64,
        germline_resistance_rate: f64,
    ) -> Result<Self> {
        let params = Self {
            source_file,
            replicate_count,
            embryo_resistance_rate,
            germline_resistance_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check replicate count and rates.
    pub fn validate(&self) -> Result<()> {
        if self.replicate_count == 0 {
            return Err(DriverError::InvalidReplicateCount(self.replicate_count));
        }
        check_rate("embryo", self.embryo_resistance_rate)?;
        check_rate("germline", self.germline_resistance_rate)?;
        Ok(())
    }
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            source_file: PathBuf::from(DEFAULT_SOURCE),
            replicate_count: DEFAULT_REPLICATES,
            embryo_resistance_rate: DEFAULT_EMBRYO_RES,
            germline_resistance_rate: DEFAULT_GERMLINE_RES,
        }
    }
}

/// Format a rate the way it is echoed back on the summary line and passed to
/// SLiM: shortest round-trip digits, always with a fractional part (`1.0`,
/// `0.1`, `0.3`). Exponents carry a sign and at least two digits (`1e-05`),
/// matching the rates the grid scripts were written against.
pub fn format_rate(value: f64) -> String {
    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DriverError::InvalidRate { name, value })
    }
}

/// How strictly simulator output is judged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassifyMode {
    /// Any text is accepted; unrecognized output counts as not suppressed.
    #[default]
    Lenient,

    /// Output without a single non-blank line is an error.
    Strict,
}

/// How the simulator is launched, independent of the model parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Simulator executable (looked up on `PATH` when not a path).
    pub slim_binary: String,

    /// Base seed; replicate `i` runs with `base_seed + i`.
    pub base_seed: Option<u64>,

    /// Output classification mode.
    pub mode: ClassifyMode,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            slim_binary: "slim".to_string(),
            base_seed: None,
            mode: ClassifyMode::Lenient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let params = RunParameters::default();
        assert_eq!(params.source_file, PathBuf::from("distant_site_pan_TA.slim"));
        assert_eq!(params.replicate_count, 10);
        assert_eq!(params.embryo_resistance_rate, 0.1);
        assert_eq!(params.germline_resistance_rate, 1.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn zero_replicates_rejected() {
        let err = RunParameters::new(PathBuf::from("m.slim"), 0, 0.1, 1.0).unwrap_err();
        assert!(matches!(err, DriverError::InvalidReplicateCount(0)));
    }

    #[test]
    fn out_of_range_rate_rejected() {
        let err = RunParameters::new(PathBuf::from("m.slim"), 1, 1.5, 1.0).unwrap_err();
        assert!(matches!(err, DriverError::InvalidRate { name: "embryo", .. }));

        let err = RunParameters::new(PathBuf::from("m.slim"), 1, 0.1, f64::NAN).unwrap_err();
        assert!(matches!(err, DriverError::InvalidRate { name: "germline", .. }));
    }

    #[test]
    fn rate_bounds_are_inclusive() {
        assert!(RunParameters::new(PathBuf::from("m.slim"), 1, 0.0, 1.0).is_ok());
    }

    #[test]
    fn format_rate_keeps_fraction() {
        assert_eq!(format_rate(1.0), "1.0");
        assert_eq!(format_rate(0.1), "0.1");
        assert_eq!(format_rate(0.0), "0.0");
        assert_eq!(format_rate(3.0 / 10.0), "0.3");
    }

    #[test]
    fn format_rate_pads_exponent() {
        assert_eq!(format_rate(1e-5), "1e-05");
        assert_eq!(format_rate(1.5e-7), "1.5e-07");
        assert_eq!(format_rate(2.5e-123), "2.5e-123");
        assert_eq!(format_rate(1e16), "1e+16");
        assert_eq!(format_rate(0.0001), "0.0001");
    }

    #[test]
    fn driver_config_default_is_lenient_slim() {
        let config = DriverConfig::default();
        assert_eq!(config.slim_binary, "slim");
        assert_eq!(config.base_seed, None);
        assert_eq!(config.mode, ClassifyMode::Lenient);
    }
}
