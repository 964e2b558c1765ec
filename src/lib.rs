#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Unified NSGA-III (U-NSGA-III) many-objective optimization.
//!
//! A run seeds a population over a box of decision variables, asks the
//! caller to score it on several competing objectives, and then alternates
//! offspring generation and survival selection for a fixed number of
//! generations. Selection sorts the pool into Pareto fronts, normalizes
//! objectives against the ideal point and the extreme-point hyperplane, and
//! fills the last partial front by niching around Das & Dennis reference
//! directions, so the surviving front stays spread out even with six or more
//! objectives.
//!
//! When the evaluator also returns validation fitness, every candidate gets
//! a validation rank next to its training rank and a pluggable diagnostic
//! flags candidates whose ranks drift apart.
//!
//! # Getting Started
//!
//! ```
//! use unsga3::prelude::*;
//!
//! let mut optimizer = Unsga3::builder()
//!     .dimensions(vec![
//!         SolutionDimension::new(0.0, 1.0).unwrap(),
//!         SolutionDimension::new(0.0, 1.0).unwrap(),
//!     ])
//!     .num_objectives(2)
//!     .max_generations(20)
//!     .seed(3)
//!     .build(|population: &mut [Candidate], generation: usize| {
//!         for (i, c) in population.iter_mut().enumerate() {
//!             c.annotate("id", format!("g{generation}_c{i}"));
//!         }
//!         let training = population
//!             .iter()
//!             .map(|c| {
//!                 let (x, y) = (c.solution[0], c.solution[1]);
//!                 vec![x, (1.0 + y) * (1.0 - x.sqrt())]
//!             })
//!             .collect();
//!         Ok::<_, Error>(Evaluation::training(training))
//!     })
//!     .unwrap();
//!
//! let result = optimizer.run().unwrap();
//! for candidate in result.pareto_front() {
//!     println!("{candidate}");
//! }
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Unsga3`] | Drives the generational loop; built with [`Unsga3Builder`]. |
//! | [`SolutionDimension`] | Bounds and optional granularity of one decision variable. |
//! | [`Candidate`] | A solution with its training, validation and active fitness, rank and annotations. |
//! | [`ParetoFitness`] | An objective vector that is either empty or scored, with Pareto dominance. |
//! | [`FitnessEvaluator`](evaluator::FitnessEvaluator) | Scores a batch of candidates each generation. |
//! | [`Inspector`](evaluator::Inspector) | Observes the selected population after each generation. |
//! | [`Variation`](variation::Variation) | Produces offspring; [`SbxVariation`](variation::SbxVariation) by default. |
//!
//! The selection building blocks are public for direct use:
//! [`pareto`], [`reference_points`], [`normalize`], [`niching`] and
//! [`selection`].
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on data types and run results | off |
//! | `parallel` | Per-candidate dominance, normalization and association on the rayon pool | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) for runs and generations | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod candidate;
pub mod dimension;
mod error;
pub mod evaluator;
mod fitness;
pub mod niching;
pub mod normalize;
mod optimizer;
pub mod overfit;
pub mod pareto;
pub mod reference_points;
mod rng_util;
pub mod selection;
pub mod variation;

pub use candidate::{AttrValue, Candidate, FitnessSource};
pub use dimension::SolutionDimension;
pub use error::{Error, Result};
pub use evaluator::{Evaluation, FitnessEvaluator, GenerationSnapshot, Inspector};
pub use fitness::ParetoFitness;
pub use optimizer::{GenerationRecord, RunResult, Unsga3, Unsga3Builder};
pub use reference_points::{ReferenceDirections, build_reference_points};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use unsga3::prelude::*;
/// ```
pub mod prelude {
    pub use crate::candidate::{AttrValue, Candidate, FitnessSource};
    pub use crate::dimension::SolutionDimension;
    pub use crate::error::{Error, Result};
    pub use crate::evaluator::{Evaluation, FitnessEvaluator, GenerationSnapshot, Inspector};
    pub use crate::fitness::ParetoFitness;
    pub use crate::optimizer::{GenerationRecord, RunResult, Unsga3, Unsga3Builder};
    pub use crate::overfit::{OverfitDiagnostic, RankDivergence};
    pub use crate::reference_points::{ReferenceDirections, build_reference_points};
    pub use crate::variation::{SbxVariation, Variation};
}
