//! # Random Number Generation
//!
//! Random number facilities for the path generator.
//!
//! - **Reproducibility**: every generator is seedable
//! - **Efficiency**: batch fills into caller-owned `&mut [f64]` slices
//! - **Static dispatch**: generators are consumed through the generic
//!   [`NormalSource`] trait, never `Box<dyn Trait>`
//!
//! ## Module Structure
//!
//! - `prng`: seeded `StdRng` wrapper with per-worker stream derivation
//! - `source`: the [`NormalSource`] trait
//!
//! ## Usage Example
//!
//! ```rust
//! use mcvar_engine::rng::{NormalSource, SimRng};
//!
//! let mut rng = SimRng::from_seed(12345);
//! let z = rng.next_normal();
//!
//! let mut buffer = vec![0.0; 1000];
//! NormalSource::fill_normal(&mut rng, &mut buffer);
//! ```

mod prng;
mod source;

pub use prng::SimRng;
pub use source::NormalSource;
