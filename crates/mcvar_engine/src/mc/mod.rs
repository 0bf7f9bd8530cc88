//! Monte Carlo path simulation.
//!
//! # Architecture
//!
//! ```text
//! SimulationParameters  (validated, immutable inputs)
//!          │
//!          ▼
//! generate_paths / generate_paths_parallel ◄── NormalSource / SimRng
//!          │
//!          ▼
//! PriceMatrix  ((n_steps + 1) × n_paths, row 0 = S₀)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use mcvar_engine::mc::{generate_paths, SimulationParameters};
//! use mcvar_engine::rng::SimRng;
//!
//! let params = SimulationParameters::builder()
//!     .path_count(2_000)
//!     .build()
//!     .unwrap();
//!
//! let matrix = generate_paths(&params, &mut SimRng::from_seed(42)).unwrap();
//! let terminal = matrix.terminal_prices();
//! assert_eq!(terminal.len(), 2_000);
//! ```

pub mod error;
pub mod matrix;
pub mod params;
pub mod paths;

pub use error::SimulationError;
pub use matrix::PriceMatrix;
pub use params::{
    SimulationParameters, SimulationParametersBuilder, MAX_CELLS, MAX_LOG_PRICE, MAX_PATHS, MAX_STEPS,
    TRADING_DAYS_PER_YEAR,
};
pub use paths::{generate_paths, generate_paths_parallel};
