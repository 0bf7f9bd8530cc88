//! # mcvar Risk (Risk Analyzer)
//!
//! Reduces the terminal prices of a simulated [`PriceMatrix`] into summary
//! risk statistics.
//!
//! This crate provides:
//! - mean / min / max reductions
//! - linear-interpolation percentiles
//! - Value-at-Risk as a loss amount, `initial_price - percentile_floor`
//! - equal-width terminal histograms for frequency charts
//!
//! ## Example
//!
//! ```
//! use mcvar_engine::prelude::*;
//! use mcvar_risk::RiskAnalyzer;
//!
//! let params = SimulationParameters::new(100.0, 0.10, 0.20, 1.0, 2_000);
//! let matrix = generate_paths(&params, &mut SimRng::from_seed(42)).unwrap();
//!
//! let report = RiskAnalyzer::default().analyze_matrix(&matrix).unwrap();
//! assert_eq!(report.confidence(), 95.0);
//! assert!(report.min_final_price() <= report.percentile_floor());
//! ```
//!
//! [`PriceMatrix`]: mcvar_engine::mc::PriceMatrix

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analyzer;
pub mod error;
pub mod histogram;

pub use analyzer::{max, mean, min, percentile, RiskAnalyzer, RiskReport, DEFAULT_CONFIDENCE_LEVEL};
pub use error::RiskError;
pub use histogram::{TerminalHistogram, DEFAULT_BINS};
