//! Simulation parameters.
//!
//! [`SimulationParameters`] is the single immutable value that drives a
//! simulation run. It replaces module-level constants: callers build one,
//! validate it, and pass it into the path generator.

use super::error::SimulationError;

/// Trading-day convention for the number of steps per year.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 100_000;

/// Maximum number of prices in one matrix, `(n_steps + 1) × path_count`.
///
/// 500M `f64` values, 4 GB.
pub const MAX_CELLS: usize = 500_000_000;

/// Largest log-price excursion from zero that keeps `exp` finite and
/// non-zero in `f64`.
pub const MAX_LOG_PRICE: f64 = 700.0;

/// Standard deviations of the terminal shock covered by the log-price bound.
const SHOCK_ALLOWANCE: f64 = 40.0;

/// Parameters of a GBM Monte Carlo run.
///
/// # Model
///
/// ```text
/// dS = μ S dt + σ S dW
/// ```
///
/// discretised on `n_steps = round(T × steps_per_year)` steps of length
/// `dt = T / n_steps`.
///
/// # Examples
///
/// ```rust
/// use mcvar_engine::mc::SimulationParameters;
///
/// let params = SimulationParameters::builder()
///     .initial_price(250.0)
///     .annual_drift(0.07)
///     .annual_volatility(0.3)
///     .horizon_years(0.5)
///     .path_count(5_000)
///     .build()
///     .expect("valid parameters");
///
/// assert_eq!(params.n_steps(), 126);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationParameters {
    /// Initial asset price (S₀).
    pub initial_price: f64,
    /// Annualised drift (μ).
    pub annual_drift: f64,
    /// Annualised volatility (σ).
    pub annual_volatility: f64,
    /// Simulation horizon (T) in years.
    pub horizon_years: f64,
    /// Time steps per year.
    pub steps_per_year: usize,
    /// Number of simulated paths.
    pub path_count: usize,
}

impl SimulationParameters {
    /// Creates parameters with the trading-day step convention.
    ///
    /// The value is not validated; call [`validate`](Self::validate) or use
    /// the [`builder`](Self::builder).
    #[inline]
    pub fn new(
        initial_price: f64,
        annual_drift: f64,
        annual_volatility: f64,
        horizon_years: f64,
        path_count: usize,
    ) -> Self {
        Self {
            initial_price,
            annual_drift,
            annual_volatility,
            horizon_years,
            steps_per_year: TRADING_DAYS_PER_YEAR,
            path_count,
        }
    }

    /// Creates a new builder seeded with the default parameters.
    #[inline]
    pub fn builder() -> SimulationParametersBuilder {
        SimulationParametersBuilder::default()
    }

    /// Number of time steps, `round(horizon_years × steps_per_year)`.
    ///
    /// Only meaningful for validated parameters.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.raw_steps() as usize
    }

    /// Time step length in years, `horizon_years / n_steps`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.horizon_years / self.n_steps() as f64
    }

    /// Per-step log drift `(μ - σ²/2) dt`.
    #[inline]
    pub fn drift_dt(&self) -> f64 {
        let sigma = self.annual_volatility;
        (self.annual_drift - 0.5 * sigma * sigma) * self.dt()
    }

    /// Per-step shock scale `σ √dt`.
    #[inline]
    pub fn vol_sqrt_dt(&self) -> f64 {
        self.annual_volatility * self.dt().sqrt()
    }

    #[inline]
    fn raw_steps(&self) -> f64 {
        (self.horizon_years * self.steps_per_year as f64).round()
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] if:
    /// - any real field is NaN or infinite
    /// - `initial_price <= 0`
    /// - `annual_volatility < 0`
    /// - `horizon_years <= 0`
    /// - `steps_per_year < 1`
    /// - `path_count` is 0 or greater than [`MAX_PATHS`]
    /// - the rounded step count is 0 or greater than [`MAX_STEPS`]
    /// - the matrix would hold more than [`MAX_CELLS`] prices
    /// - `|ln S₀| + |μ|T + σ²T/2 + 40σ√T` exceeds [`MAX_LOG_PRICE`], so a
    ///   price could overflow to infinity or underflow to zero
    pub fn validate(&self) -> Result<(), SimulationError> {
        check_finite("initial_price", self.initial_price)?;
        check_finite("annual_drift", self.annual_drift)?;
        check_finite("annual_volatility", self.annual_volatility)?;
        check_finite("horizon_years", self.horizon_years)?;

        if self.initial_price <= 0.0 {
            return Err(SimulationError::invalid(
                "initial_price",
                format!("must be positive, got {}", self.initial_price),
            ));
        }
        if self.annual_volatility < 0.0 {
            return Err(SimulationError::invalid(
                "annual_volatility",
                format!("must be non-negative, got {}", self.annual_volatility),
            ));
        }
        if self.horizon_years <= 0.0 {
            return Err(SimulationError::invalid(
                "horizon_years",
                format!("must be positive, got {}", self.horizon_years),
            ));
        }
        if self.steps_per_year < 1 {
            return Err(SimulationError::invalid(
                "steps_per_year",
                "must be at least 1",
            ));
        }
        if self.path_count < 1 || self.path_count > MAX_PATHS {
            return Err(SimulationError::invalid(
                "path_count",
                format!("{} outside valid range [1, {}]", self.path_count, MAX_PATHS),
            ));
        }

        let steps = self.raw_steps();
        if steps < 1.0 {
            return Err(SimulationError::invalid(
                "horizon_years",
                format!(
                    "{} years at {} steps per year rounds to zero steps",
                    self.horizon_years, self.steps_per_year
                ),
            ));
        }
        if steps > MAX_STEPS as f64 {
            return Err(SimulationError::invalid(
                "horizon_years",
                format!("{} steps exceeds maximum of {}", steps, MAX_STEPS),
            ));
        }

        let cells = (self.n_steps() + 1).checked_mul(self.path_count);
        if cells.map_or(true, |c| c > MAX_CELLS) {
            return Err(SimulationError::invalid(
                "path_count",
                format!(
                    "{} paths over {} steps exceeds the maximum of {} prices",
                    self.path_count,
                    self.n_steps(),
                    MAX_CELLS
                ),
            ));
        }

        self.check_log_range()
    }

    /// Bounds the log-price excursion so every simulated price stays
    /// finite and strictly positive.
    fn check_log_range(&self) -> Result<(), SimulationError> {
        let horizon = self.horizon_years;
        let sigma = self.annual_volatility;

        let drift_move = self.annual_drift.abs() * horizon;
        let vol_move = 0.5 * sigma * sigma * horizon + SHOCK_ALLOWANCE * sigma * horizon.sqrt();
        let total = self.initial_price.ln().abs() + drift_move + vol_move;

        if total.is_finite() && total <= MAX_LOG_PRICE {
            return Ok(());
        }

        let name = if !vol_move.is_finite() || vol_move >= drift_move {
            "annual_volatility"
        } else {
            "annual_drift"
        };
        Err(SimulationError::invalid(
            name,
            format!(
                "log-price range {} exceeds {}; prices would overflow or underflow",
                total, MAX_LOG_PRICE
            ),
        ))
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            annual_drift: 0.10,
            annual_volatility: 0.20,
            horizon_years: 1.0,
            steps_per_year: TRADING_DAYS_PER_YEAR,
            path_count: 1_000,
        }
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

/// Builder for [`SimulationParameters`].
///
/// Unset fields keep their [`Default`] values; [`build`](Self::build)
/// validates the result.
#[derive(Clone, Debug, Default)]
pub struct SimulationParametersBuilder {
    params: SimulationParameters,
}

impl SimulationParametersBuilder {
    /// Sets the initial price.
    #[inline]
    pub fn initial_price(mut self, initial_price: f64) -> Self {
        self.params.initial_price = initial_price;
        self
    }

    /// Sets the annual drift.
    #[inline]
    pub fn annual_drift(mut self, annual_drift: f64) -> Self {
        self.params.annual_drift = annual_drift;
        self
    }

    /// Sets the annual volatility.
    #[inline]
    pub fn annual_volatility(mut self, annual_volatility: f64) -> Self {
        self.params.annual_volatility = annual_volatility;
        self
    }

    /// Sets the horizon in years.
    #[inline]
    pub fn horizon_years(mut self, horizon_years: f64) -> Self {
        self.params.horizon_years = horizon_years;
        self
    }

    /// Sets the number of steps per year.
    #[inline]
    pub fn steps_per_year(mut self, steps_per_year: usize) -> Self {
        self.params.steps_per_year = steps_per_year;
        self
    }

    /// Sets the number of paths.
    #[inline]
    pub fn path_count(mut self, path_count: usize) -> Self {
        self.params.path_count = path_count;
        self
    }

    /// Builds and validates the parameters.
    ///
    /// # Errors
    ///
    /// See [`SimulationParameters::validate`].
    pub fn build(self) -> Result<SimulationParameters, SimulationError> {
        self.params.validate()?;
        Ok(self.params)
    }
}
