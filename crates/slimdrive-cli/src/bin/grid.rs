//! slimdrive-grid - batch command emitter
//!
//! Prints one `slimdrive` invocation per cell of the embryo x germline
//! resistance grid. Redirect the output to a file for the cluster run:
//!
//! ```text
//! slimdrive-grid > params.txt
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use tracing::{debug, Level};

use slimdrive_core::params::{DEFAULT_REPLICATES, DEFAULT_SOURCE};
use slimdrive_core::{GridAxis, GridSpec, DEFAULT_EMBRYO_AXIS, DEFAULT_GERMLINE_AXIS};

#[derive(Parser, Debug)]
#[command(name = "slimdrive-grid")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Emit one slimdrive command line per parameter grid cell", long_about = None)]
struct Cli {
    /// Embryo resistance range (start,stop,step; stop excluded) [default: 0.0,0.25,0.05]
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    embryo_range: Option<Vec<f64>>,

    /// Germline resistance range (start,stop,step; stop excluded) [default: 0.75,1.01,0.05]
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    germline_range: Option<Vec<f64>>,

    /// SLiM model script passed to every run
    #[arg(long, default_value = DEFAULT_SOURCE)]
    src: String,

    /// Replicates per grid cell
    #[arg(long, default_value_t = DEFAULT_REPLICATES, value_parser = clap::value_parser!(u32).range(1..))]
    nreps: u32,

    /// Command that launches the replicate driver
    #[arg(long, default_value = "slimdrive")]
    driver: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn grid_spec(&self) -> Result<GridSpec> {
        let embryo = match &self.embryo_range {
            Some(range) => {
                GridAxis::from_triple("embryo", range).context("Invalid --embryo-range")?
            }
            None => DEFAULT_EMBRYO_AXIS,
        };
        let germline = match &self.germline_range {
            Some(range) => {
                GridAxis::from_triple("germline", range).context("Invalid --germline-range")?
            }
            None => DEFAULT_GERMLINE_AXIS,
        };

        Ok(GridSpec {
            driver: self.driver.clone(),
            source_file: self.src.clone(),
            replicate_count: self.nreps,
            embryo,
            germline,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    slimdrive_core::init_tracing(false, level);

    let spec = cli.grid_spec()?;
    let lines = spec.lines();
    debug!(
        cells = lines.len(),
        embryo_points = spec.embryo.len(),
        germline_points = spec.germline.len(),
        "Emitting grid"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in &lines {
        writeln!(out, "{line}").context("Failed to write grid line")?;
    }
    out.flush().context("Failed to flush grid output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_reproduce_default_grid() {
        let cli = Cli::try_parse_from(["slimdrive-grid"]).unwrap();
        assert_eq!(cli.grid_spec().unwrap(), GridSpec::default());
    }

    #[test]
    fn custom_ranges() {
        let cli = Cli::try_parse_from([
            "slimdrive-grid",
            "--embryo-range",
            "0.0,0.1,0.05",
            "--germline-range",
            "0.9,1.0,0.1",
            "--nreps",
            "50",
        ])
        .unwrap();
        let spec = cli.grid_spec().unwrap();
        let lines = spec.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("--nreps 50 --embryo-res 0.050 --germline-res 0.900"));
    }

    #[test]
    fn one_range_overridden_keeps_other_default() {
        let cli =
            Cli::try_parse_from(["slimdrive-grid", "--germline-range", "0.5,0.6,0.05"]).unwrap();
        let spec = cli.grid_spec().unwrap();
        assert_eq!(spec.embryo, DEFAULT_EMBRYO_AXIS);
        assert_eq!(spec.germline, GridAxis::new("germline", 0.5, 0.6, 0.05).unwrap());
    }

    #[test]
    fn oversized_range_rejected() {
        let cli =
            Cli::try_parse_from(["slimdrive-grid", "--embryo-range", "0,1,1e-300"]).unwrap();
        assert!(cli.grid_spec().is_err());
    }

    #[test]
    fn malformed_range_rejected() {
        let cli = Cli::try_parse_from(["slimdrive-grid", "--embryo-range", "0.0,0.1"]).unwrap();
        assert!(cli.grid_spec().is_err());
    }
}
