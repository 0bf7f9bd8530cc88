//! Shared simulation pipeline.
//!
//! Parameters → path generation → risk analysis → report and charts.

use std::io::Write;

use mcvar_engine::mc::{generate_paths, generate_paths_parallel, PriceMatrix, SimulationParameters};
use mcvar_engine::rng::SimRng;
use mcvar_risk::{RiskAnalyzer, RiskReport, TerminalHistogram};
use tracing::{debug, info, warn};

use crate::chart::{render_histogram, render_path_preview};
use crate::config::McvarConfig;
use crate::report::{ordinal, render_json, render_table, OutputFormat};
use crate::Result;

/// Width of each path sparkline, in characters.
const PREVIEW_WIDTH: usize = 60;

/// Options controlling a single run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Percentile level for the floor
    pub confidence_level: f64,
    /// Seed for the random source; drawn from entropy when `None`
    pub seed: Option<u64>,
    /// Use the parallel generator
    pub parallel: bool,
    /// Report format
    pub format: OutputFormat,
    /// Render the path preview and histogram
    pub chart: bool,
    /// Histogram bins
    pub histogram_bins: usize,
    /// Paths shown in the preview
    pub preview_paths: usize,
}

impl RunOptions {
    /// Options taken from configuration.
    pub fn from_config(config: &McvarConfig) -> Self {
        Self {
            confidence_level: config.confidence_level,
            seed: config.seed,
            parallel: config.parallel,
            format: OutputFormat::default(),
            chart: false,
            histogram_bins: config.histogram_bins,
            preview_paths: config.preview_paths,
        }
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Seed actually used
    pub seed: u64,
    /// Simulated paths
    pub matrix: PriceMatrix,
    /// Risk statistics
    pub report: RiskReport,
}

/// Runs the full pipeline and writes the report to `out`.
///
/// Parameters and options are validated before any path is generated.
/// The report is rendered into a buffer and written only once every stage
/// has succeeded, so a failed run leaves `out` untouched.
pub fn execute<W: Write>(
    params: &SimulationParameters,
    options: &RunOptions,
    out: &mut W,
) -> Result<RunOutcome> {
    params.validate()?;
    let analyzer = RiskAnalyzer::new(options.confidence_level)?;

    let seed = match options.seed {
        Some(seed) => seed,
        None => SimRng::from_entropy().seed(),
    };
    info!(
        seed,
        paths = params.path_count,
        steps = params.n_steps(),
        parallel = options.parallel,
        "Running simulation"
    );

    let matrix = if options.parallel {
        generate_paths_parallel(params, seed)?
    } else {
        generate_paths(params, &mut SimRng::from_seed(seed))?
    };
    debug!(rows = matrix.n_rows(), cols = matrix.n_paths(), "Paths generated");

    let report = analyzer.analyze_matrix(&matrix)?;
    info!(
        mean = report.mean_final_price(),
        floor = report.percentile_floor(),
        var = report.value_at_risk(),
        "Analysis complete"
    );

    let mut buffer = Vec::new();
    match options.format {
        OutputFormat::Table => {
            writeln!(
                buffer,
                "\nRunning {} simulations for {} trading days...",
                params.path_count,
                params.n_steps()
            )?;
            write!(buffer, "\n{}", render_table(&report))?;
            if options.chart {
                write_charts(&matrix, &report, options, &mut buffer)?;
            }
        }
        OutputFormat::Json => {
            if options.chart {
                warn!("Charts are only rendered in table format");
            }
            writeln!(buffer, "{}", render_json(params, seed, &report)?)?;
        }
    }
    out.write_all(&buffer)?;

    Ok(RunOutcome {
        seed,
        matrix,
        report,
    })
}

fn write_charts<W: Write>(
    matrix: &PriceMatrix,
    report: &RiskReport,
    options: &RunOptions,
    out: &mut W,
) -> Result<()> {
    let preview = matrix.path_subset(options.preview_paths);
    write!(
        out,
        "\n{}",
        render_path_preview(&preview, matrix.n_paths(), PREVIEW_WIDTH)
    )?;

    let histogram = TerminalHistogram::new(matrix.terminal_prices(), options.histogram_bins)?;
    let label = format!("{} percentile", ordinal(report.confidence_level()));
    write!(
        out,
        "\n{}",
        render_histogram(&histogram, report.percentile_floor(), &label)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    fn options() -> RunOptions {
        RunOptions {
            seed: Some(42),
            ..RunOptions::from_config(&McvarConfig::default())
        }
    }

    #[test]
    fn test_execute_table() {
        let params = SimulationParameters::new(100.0, 0.1, 0.2, 1.0, 200);
        let mut out = Vec::new();
        let outcome = execute(&params, &options(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Running 200 simulations for 252 trading days..."));
        assert!(text.contains("Start Price:          $100.00"));
        assert_eq!(outcome.seed, 42);
        assert_eq!(outcome.matrix.n_paths(), 200);
    }

    #[test]
    fn test_execute_is_reproducible() {
        let params = SimulationParameters::new(100.0, 0.1, 0.2, 1.0, 100);
        let first = execute(&params, &options(), &mut Vec::new()).unwrap();
        let second = execute(&params, &options(), &mut Vec::new()).unwrap();
        assert_eq!(first.report, second.report);
    }

    #[test]
    fn test_execute_with_charts() {
        let params = SimulationParameters::new(100.0, 0.1, 0.2, 1.0, 120);
        let opts = RunOptions {
            chart: true,
            ..options()
        };
        let mut out = Vec::new();
        execute(&params, &opts, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Monte Carlo Paths (First 50/120)"));
        assert!(text.contains("Distribution of Final Prices"));
        assert!(text.contains("<-- 5th percentile:"));
    }

    #[test]
    fn test_execute_json_only_writes_json() {
        let params = SimulationParameters::new(100.0, 0.1, 0.2, 1.0, 50);
        let opts = RunOptions {
            format: OutputFormat::Json,
            parallel: true,
            ..options()
        };
        let mut out = Vec::new();
        execute(&params, &opts, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["seed"], 42);
        assert_eq!(value["report"]["path_count"], 50);
    }

    #[test]
    fn test_invalid_parameters_produce_no_output() {
        let params = SimulationParameters::new(100.0, 0.1, -0.1, 1.0, 50);
        let mut out = Vec::new();
        let err = execute(&params, &options(), &mut out).unwrap_err();

        assert!(matches!(err, CliError::Simulation(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_failure_after_analysis_leaves_no_output() {
        let params = SimulationParameters::new(100.0, 0.1, 0.2, 1.0, 30);
        let opts = RunOptions {
            chart: true,
            histogram_bins: 0,
            ..options()
        };
        let mut out = Vec::new();
        let err = execute(&params, &opts, &mut out).unwrap_err();

        assert!(matches!(err, CliError::Risk(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_overflowing_drift_rejected_without_output() {
        let params = SimulationParameters::new(100.0, 800.0, 0.2, 1.0, 10);
        let mut out = Vec::new();
        let err = execute(&params, &options(), &mut out).unwrap_err();

        assert!(matches!(err, CliError::Simulation(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_confidence_rejected() {
        let params = SimulationParameters::default();
        let opts = RunOptions {
            confidence_level: 100.0,
            ..options()
        };
        let err = execute(&params, &opts, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Risk(_)));
    }
}
