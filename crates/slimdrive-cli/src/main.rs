//! slimdrive - replicate driver
//!
//! Runs a SLiM model `--nreps` times under one embryo/germline resistance
//! setting and prints `embryo,germline,p_suppression` on a single line.
//! Logs go to stderr; stdout carries only the result.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use slimdrive_core::params::{
    DEFAULT_EMBRYO_RES, DEFAULT_GERMLINE_RES, DEFAULT_REPLICATES, DEFAULT_SOURCE,
};
use slimdrive_core::{ClassifyMode, DriverConfig, ReplicateSweep, RunParameters, SlimInvoker};

#[derive(Parser, Debug)]
#[command(name = "slimdrive")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Estimate gene-drive suppression probability from SLiM replicates", long_about = None)]
struct Cli {
    /// SLiM model script
    #[arg(long, default_value = DEFAULT_SOURCE)]
    src: PathBuf,

    /// Number of replicates
    #[arg(long, default_value_t = DEFAULT_REPLICATES, value_parser = clap::value_parser!(u32).range(1..))]
    nreps: u32,

    /// Embryo resistance rate
    #[arg(long, alias = "embryo_res", default_value_t = DEFAULT_EMBRYO_RES)]
    embryo_res: f64,

    /// Germline resistance rate
    #[arg(long, alias = "germline_res", default_value_t = DEFAULT_GERMLINE_RES)]
    germline_res: f64,

    /// SLiM executable
    #[arg(long, env = "SLIM_BIN", default_value = "slim")]
    slim: String,

    /// Base random seed; replicate i runs with seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Fail on replicates that produce no output instead of counting them as not suppressed
    #[arg(long)]
    strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn run_parameters(&self) -> Result<RunParameters> {
        RunParameters::new(
            self.src.clone(),
            self.nreps,
            self.embryo_res,
            self.germline_res,
        )
        .context("Invalid run parameters")
    }

    fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            slim_binary: self.slim.clone(),
            base_seed: self.seed,
            mode: if self.strict {
                ClassifyMode::Strict
            } else {
                ClassifyMode::Lenient
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    slimdrive_core::init_tracing(cli.json, level);

    let params = cli.run_parameters()?;
    let config = cli.driver_config();

    let summary = ReplicateSweep::run(&SlimInvoker::new(), &params, &config)
        .await
        .with_context(|| format!("Sweep over {} failed", params.source_file.display()))?;

    println!("{summary}");
    Ok(())
}
