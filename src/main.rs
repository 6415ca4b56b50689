mod aggregate;
mod cleaning;
mod config;
mod cost_model;
mod loader;
mod models;
mod output;
mod pipeline;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::aggregate::AveragingRule;
use crate::config::RunConfig;
use crate::cost_model::CostModelConfig;
use crate::output::{read_summaries, MarginRecovery};
use crate::pipeline::{Pipeline, PipelineError};

#[derive(Parser)]
#[command(name = "should-cost-prep")]
#[command(about = "Clean retail transactions and derive per-SKU should-cost variance", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level written to stderr: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "error")]
    log_level: String,

    #[command(subcommand)]
    command: Commands
}

#[derive(Subcommand)]
enum Commands {
    /// Load, clean, aggregate and cost a transactions file, writing one CSV row per SKU
    Run {
        /// Transactions file (.csv, .xlsx, .xlsm, .xls or .ods)
        input: PathBuf,

        /// Destination CSV, replaced on success
        output: PathBuf,

        /// YAML run configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// How the average quote of a SKU is computed
        #[arg(long, value_enum)]
        averaging: Option<AveragingRule>,

        #[command(flatten)]
        cost_model: CostModelArgs
    },

    /// Print total should-cost, quoted cost, savings and margin recovery for a summary CSV
    Report {
        /// Summary CSV written by `run`
        summary: PathBuf
    }
}

/// Should-cost flags, overriding the cost model of the configuration file.
#[derive(Args)]
struct CostModelArgs {
    /// Material cost per unit (components model)
    #[arg(long, requires_all = ["labor", "packaging"])]
    material: Option<Decimal>,

    /// Labor cost per unit (components model)
    #[arg(long, requires = "material")]
    labor: Option<Decimal>,

    /// Packaging cost per unit (components model)
    #[arg(long, requires = "material")]
    packaging: Option<Decimal>,

    /// Overhead as a fraction of direct costs, e.g. 0.15 (components model)
    #[arg(long, requires = "material")]
    overhead_pct: Option<Decimal>,

    /// CSV file with `sku,should_cost` columns (lookup model)
    #[arg(long, conflicts_with = "material")]
    cost_table: Option<PathBuf>,

    /// Seed for simulated cost components (simulated model)
    #[arg(long, conflicts_with_all = ["material", "cost_table"])]
    seed: Option<u64>
}

impl CostModelArgs {
    fn to_config(&self) -> Option<CostModelConfig> {
        if let (Some(material), Some(labor), Some(packaging)) = (self.material, self.labor, self.packaging) {
            return Some(CostModelConfig::Components {
                material,
                labor,
                packaging,
                overhead_pct: self.overhead_pct.unwrap_or_default()
            });
        }

        if let Some(path) = &self.cost_table {
            return Some(CostModelConfig::Lookup { costs: Default::default(), path: Some(path.clone()), default: None });
        }

        self.seed.map(|seed| CostModelConfig::Simulated { seed })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error:#}");

            let code = error.downcast_ref::<PipelineError>()
                .map(PipelineError::exit_code)
                .unwrap_or(1);

            ExitCode::from(code)
        }
    }
}

fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Run { input, output, config, averaging, cost_model } => {
            let mut run_config = match &config {
                Some(path) => RunConfig::from_path(path)?,
                None => RunConfig::default()
            };

            if let Some(model) = cost_model.to_config() {
                run_config.cost_model = model;
            }

            if let Some(averaging) = averaging {
                run_config.averaging = averaging;
            }

            let timer = Instant::now();
            let report = Pipeline::new(run_config).run(&input, &output)?;
            let duration = timer.elapsed();

            info!("Processed transactions in: {duration:?}");

            write_to_stdout(&report)?;
        }
        Commands::Report { summary } => {
            let recovery = margin_recovery(&summary)?;

            write_to_stdout(&recovery)?;
        }
    }

    Ok(())
}

fn margin_recovery(path: &Path) -> Result<MarginRecovery, PipelineError> {
    let rows = read_summaries(path)?;
    info!("Read {} SKU summaries from [{}]", rows.len(), path.display());

    Ok(MarginRecovery::compute(&rows))
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the run summary, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_to_stdout(content: &impl std::fmt::Display) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "{content}")?;
    output.flush()?;

    Ok(())
}
