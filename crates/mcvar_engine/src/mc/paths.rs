//! GBM path generation.
//!
//! Paths follow the exact log-Euler discretisation of Geometric Brownian
//! Motion:
//!
//! ```text
//! r[t][p]     = (μ - σ²/2) dt + σ √dt Z[t][p]
//! S[t + 1][p] = S₀ × exp(r[0][p] + … + r[t][p])
//! S[0][p]     = S₀
//! ```
//!
//! Prices are computed from the running log-return sum rather than by
//! chaining multiplicative increments, so each price is a single `exp` of
//! the cumulative return.

use rayon::prelude::*;

use super::error::SimulationError;
use super::matrix::PriceMatrix;
use super::params::SimulationParameters;
use crate::rng::{NormalSource, SimRng};

/// Generates a [`PriceMatrix`] from a single normal-variate source.
///
/// Shocks are consumed in time-major order: all paths for step 0, then all
/// paths for step 1, and so on, matching a `(n_steps × n_paths)` shock
/// matrix.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidParameter`] if `params` fails
/// validation. No variates are drawn in that case.
///
/// # Examples
///
/// ```rust
/// use mcvar_engine::mc::{generate_paths, SimulationParameters};
/// use mcvar_engine::rng::SimRng;
///
/// let params = SimulationParameters::new(100.0, 0.1, 0.2, 1.0, 500);
/// let mut rng = SimRng::from_seed(42);
///
/// let matrix = generate_paths(&params, &mut rng).unwrap();
/// assert_eq!(matrix.n_rows(), 253);
/// assert_eq!(matrix.n_paths(), 500);
/// assert!(matrix.row(0).iter().all(|&s| s == 100.0));
/// ```
pub fn generate_paths<S: NormalSource>(
    params: &SimulationParameters,
    source: &mut S,
) -> Result<PriceMatrix, SimulationError> {
    params.validate()?;

    let n_steps = params.n_steps();
    let n_paths = params.path_count;
    let spot = params.initial_price;

    // Precompute step constants outside the loop
    let drift_dt = params.drift_dt();
    let vol_sqrt_dt = params.vol_sqrt_dt();

    let mut data = vec![0.0; (n_steps + 1) * n_paths];
    data[..n_paths].fill(spot);

    let mut shocks = vec![0.0; n_paths];
    let mut cumulative = vec![0.0; n_paths];

    for step in 0..n_steps {
        source.fill_normal(&mut shocks);

        let row = &mut data[(step + 1) * n_paths..(step + 2) * n_paths];
        for ((price, cum), &z) in row.iter_mut().zip(cumulative.iter_mut()).zip(&shocks) {
            *cum += drift_dt + vol_sqrt_dt * z;
            *price = spot * cum.exp();
        }
    }

    Ok(PriceMatrix::from_row_major(data, n_steps, n_paths, params.dt()))
}

/// Generates a [`PriceMatrix`] in parallel across paths.
///
/// Each path draws from its own stream, `SimRng::for_stream(seed, path)`,
/// so the output depends only on `params` and `seed` and never on the
/// number of worker threads. The streams differ from the single-source
/// ordering of [`generate_paths`], so the two generators produce different
/// (equally distributed) matrices for the same seed.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidParameter`] if `params` fails
/// validation.
pub fn generate_paths_parallel(
    params: &SimulationParameters,
    seed: u64,
) -> Result<PriceMatrix, SimulationError> {
    params.validate()?;

    let n_steps = params.n_steps();
    let n_paths = params.path_count;

    let columns: Vec<Vec<f64>> = (0..n_paths)
        .into_par_iter()
        .map(|path| {
            let mut rng = SimRng::for_stream(seed, path as u64);
            simulate_path(params, n_steps, &mut rng)
        })
        .collect();

    // Scatter path-major columns into the row-major layout
    let mut data = vec![0.0; (n_steps + 1) * n_paths];
    for (path, column) in columns.iter().enumerate() {
        for (step, &price) in column.iter().enumerate() {
            data[step * n_paths + path] = price;
        }
    }

    Ok(PriceMatrix::from_row_major(data, n_steps, n_paths, params.dt()))
}

/// Simulates one trajectory of `n_steps + 1` prices.
fn simulate_path<S: NormalSource>(
    params: &SimulationParameters,
    n_steps: usize,
    source: &mut S,
) -> Vec<f64> {
    let spot = params.initial_price;
    let drift_dt = params.drift_dt();
    let vol_sqrt_dt = params.vol_sqrt_dt();

    let mut path = Vec::with_capacity(n_steps + 1);
    path.push(spot);

    let mut cumulative = 0.0;
    for _ in 0..n_steps {
        cumulative += drift_dt + vol_sqrt_dt * source.next_normal();
        path.push(spot * cumulative.exp());
    }
    path
}
