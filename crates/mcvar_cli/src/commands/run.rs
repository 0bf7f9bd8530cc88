//! Run command implementation
//!
//! Simulates with parameters from configuration, overridden by flags.

use std::io::Write;

use tracing::info;

use super::simulate::{execute, RunOptions, RunOutcome};
use crate::config::McvarConfig;
use crate::input::{FixedParameters, ParameterSource};
use crate::Result;

/// Parameter overrides supplied on the command line.
#[derive(Clone, Debug, Default)]
pub struct ParameterOverrides {
    /// Initial price
    pub initial_price: Option<f64>,
    /// Annual drift
    pub annual_drift: Option<f64>,
    /// Annual volatility
    pub annual_volatility: Option<f64>,
    /// Horizon in years
    pub horizon_years: Option<f64>,
    /// Steps per year
    pub steps_per_year: Option<usize>,
    /// Number of paths
    pub path_count: Option<usize>,
}

impl ParameterOverrides {
    /// Applies the overrides to the configured simulation parameters.
    pub fn apply(&self, config: &mut McvarConfig) {
        let sim = &mut config.simulation;
        if let Some(v) = self.initial_price {
            sim.initial_price = v;
        }
        if let Some(v) = self.annual_drift {
            sim.annual_drift = v;
        }
        if let Some(v) = self.annual_volatility {
            sim.annual_volatility = v;
        }
        if let Some(v) = self.horizon_years {
            sim.horizon_years = v;
        }
        if let Some(v) = self.steps_per_year {
            sim.steps_per_year = v;
        }
        if let Some(v) = self.path_count {
            sim.path_count = v;
        }
    }
}

/// Run the simulation with fixed parameters
pub fn run<W: Write>(config: &McvarConfig, options: &RunOptions, out: &mut W) -> Result<RunOutcome> {
    info!("Starting fixed-parameter run...");
    let params = FixedParameters(config.simulation).acquire()?;
    info!(
        "  S0={} mu={} sigma={} T={}",
        params.initial_price, params.annual_drift, params.annual_volatility, params.horizon_years
    );
    execute(&params, options, out)
}
