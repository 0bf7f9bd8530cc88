//! mcvar - Monte Carlo Value-at-Risk from the command line.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

use mcvar_cli::commands::{self, run::ParameterOverrides, RunOptions};
use mcvar_cli::config::McvarConfig;
use mcvar_cli::report::OutputFormat;

/// Monte Carlo Value-at-Risk simulator
#[derive(Parser)]
#[command(name = "mcvar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "mcvar.toml")]
    config: PathBuf,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Render the path preview and terminal price histogram
    #[arg(long, global = true)]
    chart: bool,

    #[command(flatten)]
    run: RunFlags,

    #[command(subcommand)]
    command: Commands,
}

/// Run settings shared by both commands
#[derive(Args)]
struct RunFlags {
    /// Seed for reproducible runs
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Percentile level for the floor, in (0, 100)
    #[arg(long, global = true)]
    confidence: Option<f64>,

    /// Generate paths in parallel
    #[arg(long, global = true)]
    parallel: bool,

    /// Histogram bins
    #[arg(long, global = true)]
    bins: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate with parameters from configuration and flags
    Run {
        /// Current price
        #[arg(long)]
        price: Option<f64>,

        /// Expected annual return, e.g. 0.10
        #[arg(long)]
        drift: Option<f64>,

        /// Annual volatility, e.g. 0.20
        #[arg(long)]
        volatility: Option<f64>,

        /// Horizon in years
        #[arg(long)]
        horizon: Option<f64>,

        /// Time steps per year
        #[arg(long)]
        steps_per_year: Option<usize>,

        /// Number of paths
        #[arg(short = 'n', long)]
        paths: Option<usize>,
    },

    /// Prompt for parameters interactively
    Interactive,
}

/// Filter routing the binary's and library's events at `level`.
fn log_filter(level: &str) -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive(format!("mcvar={}", level).parse()?)
        .add_directive(format!("mcvar_cli={}", level).parse()?))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Provisional level until the configuration is known
    let (filter, reload_handle) =
        reload::Layer::new(log_filter(if cli.verbose { "debug" } else { "info" })?);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run(cli, &reload_handle) {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

fn run(cli: Cli, reload_handle: &reload::Handle<EnvFilter, Registry>) -> anyhow::Result<()> {
    let mut config = McvarConfig::load_or_default(&cli.config)
        .and_then(McvarConfig::with_env_override)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    if let Some(seed) = cli.run.seed {
        config.seed = Some(seed);
    }
    if let Some(confidence) = cli.run.confidence {
        config.confidence_level = confidence;
    }
    if let Some(bins) = cli.run.bins {
        config.histogram_bins = bins;
    }
    config.parallel |= cli.run.parallel;

    if let Commands::Run {
        price,
        drift,
        volatility,
        horizon,
        steps_per_year,
        paths,
    } = &cli.command
    {
        ParameterOverrides {
            initial_price: *price,
            annual_drift: *drift,
            annual_volatility: *volatility,
            horizon_years: *horizon,
            steps_per_year: *steps_per_year,
            path_count: *paths,
        }
        .apply(&mut config);
    }

    config.validate()?;

    if !cli.verbose {
        reload_handle.reload(log_filter(&config.log_level)?)?;
    }

    info!("mcvar v{}", env!("CARGO_PKG_VERSION"));
    debug!("Configuration: {:?}", config);

    let options = RunOptions {
        format: cli.format,
        chart: cli.chart,
        ..RunOptions::from_config(&config)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Run { .. } => commands::run::run(&config, &options, &mut out)?,
        Commands::Interactive => {
            commands::interactive::run(&config, &options, io::stdin().lock(), &mut out)?
        }
    };
    out.flush()?;

    Ok(())
}
