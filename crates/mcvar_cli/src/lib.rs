//! # mcvar CLI
//!
//! Command-line front end for the mcvar Monte Carlo Value-at-Risk engine.
//!
//! # Commands
//!
//! - `mcvar run` - Simulate with parameters from configuration and flags
//! - `mcvar interactive` - Prompt for parameters on stdin, then simulate
//!
//! Both commands share one pipeline: parameters are validated, paths are
//! generated by `mcvar_engine`, terminal prices are analysed by `mcvar_risk`
//! and the report is written as a table or JSON.

pub mod chart;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod report;

pub use error::{CliError, Result};
