//! CLI command implementations
//!
//! `run` and `interactive` differ only in where parameters come from; both
//! feed the shared pipeline in `simulate`.

pub mod interactive;
pub mod run;
pub mod simulate;

pub use simulate::{execute, RunOptions, RunOutcome};
