//! # mcvar Engine (Path Generator)
//!
//! Monte Carlo simulation of asset prices under Geometric Brownian Motion.
//!
//! This crate provides:
//! - [`SimulationParameters`](mc::SimulationParameters): validated model and
//!   grid parameters
//! - [`SimRng`](rng::SimRng): seeded normal-variate generator with
//!   independent per-path streams
//! - [`generate_paths`](mc::generate_paths) and
//!   [`generate_paths_parallel`](mc::generate_paths_parallel): exact
//!   log-Euler GBM path generation into a [`PriceMatrix`](mc::PriceMatrix)
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   mcvar_cli (Service)        │
//! ├──────────────────────────────┤
//! │   mcvar_risk (Risk)          │
//! ├──────────────────────────────┤
//! │   mcvar_engine (Kernel)      │  ◄── this crate
//! └──────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mcvar_engine::prelude::*;
//!
//! let params = SimulationParameters::new(100.0, 0.10, 0.20, 1.0, 1_000);
//! let matrix = generate_paths(&params, &mut SimRng::from_seed(7)).unwrap();
//!
//! assert_eq!(matrix.n_steps(), 252);
//! assert!(matrix.terminal_prices().iter().all(|&s| s > 0.0));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod mc;
pub mod rng;

/// Commonly used types.
pub mod prelude {
    pub use crate::mc::{
        generate_paths, generate_paths_parallel, PriceMatrix, SimulationError,
        SimulationParameters,
    };
    pub use crate::rng::{NormalSource, SimRng};
}
