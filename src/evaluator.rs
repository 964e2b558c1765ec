//! The caller-facing hooks of a run: fitness evaluation and per-generation
//! inspection.
//!
//! For simple cases pass closures directly to the builder:
//!
//! ```
//! use unsga3::prelude::*;
//!
//! let evaluator = |population: &mut [Candidate], _generation: usize| {
//!     let training = population
//!         .iter()
//!         .map(|c| vec![c.solution[0], 1.0 - c.solution[0]])
//!         .collect();
//!     Ok::<_, Error>(Evaluation::training(training))
//! };
//!
//! let mut optimizer = Unsga3::builder()
//!     .dimensions(vec![SolutionDimension::new(0.0, 1.0).unwrap()])
//!     .num_objectives(2)
//!     .max_generations(3)
//!     .seed(7)
//!     .build(evaluator)
//!     .unwrap();
//! let result = optimizer.run().unwrap();
//! assert!(!result.population.is_empty());
//! ```
//!
//! For an evaluator with its own error type, implement
//! [`FitnessEvaluator`] on a struct; internal failures convert into that
//! type through `From<unsga3::Error>`, evaluator failures pass through
//! untouched:
//!
//! ```
//! use unsga3::prelude::*;
//!
//! #[derive(Debug)]
//! enum SimError {
//!     Diverged(usize),
//!     Optimizer(unsga3::Error),
//! }
//!
//! impl From<unsga3::Error> for SimError {
//!     fn from(e: unsga3::Error) -> Self {
//!         SimError::Optimizer(e)
//!     }
//! }
//!
//! struct Simulator;
//!
//! impl FitnessEvaluator for Simulator {
//!     type Error = SimError;
//!
//!     fn evaluate(
//!         &mut self,
//!         population: &mut [Candidate],
//!         generation: usize,
//!     ) -> std::result::Result<Evaluation, SimError> {
//!         if generation == 2 {
//!             return Err(SimError::Diverged(generation));
//!         }
//!         Ok(Evaluation::training(
//!             population.iter().map(|c| vec![c.solution[0], -c.solution[0]]).collect(),
//!         ))
//!     }
//! }
//!
//! let mut optimizer = Unsga3::builder()
//!     .dimensions(vec![SolutionDimension::new(0.0, 1.0).unwrap()])
//!     .num_objectives(2)
//!     .build(Simulator)
//!     .unwrap();
//! assert!(matches!(optimizer.run(), Err(SimError::Diverged(2))));
//! ```

use crate::candidate::Candidate;
use crate::error::Error;
use crate::reference_points::ReferenceDirections;

/// Fitness vectors returned by one evaluator call, in population order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Evaluation {
    /// One training fitness vector per candidate.
    pub training: Vec<Vec<f64>>,
    /// Optional validation fitness, one vector per candidate.
    pub validation: Option<Vec<Vec<f64>>>,
}

impl Evaluation {
    /// Training fitness only.
    #[must_use]
    pub fn training(training: Vec<Vec<f64>>) -> Self {
        Self {
            training,
            validation: None,
        }
    }

    /// Training and validation fitness.
    #[must_use]
    pub fn with_validation(training: Vec<Vec<f64>>, validation: Vec<Vec<f64>>) -> Self {
        Self {
            training,
            validation: Some(validation),
        }
    }
}

/// Scores a batch of candidates.
///
/// Called exactly once per generation with the candidates that still need
/// fitness: the seeded population in generation 0 and the offspring in
/// every later generation. The evaluator may annotate candidates (for
/// example with an `"id"`), but solutions are read back unchanged only if
/// it leaves them alone.
pub trait FitnessEvaluator {
    /// The error type returned by [`evaluate`](Self::evaluate); the
    /// optimizer's own failures are converted into it.
    type Error: From<Error>;

    /// Returns one training vector (and optionally one validation vector)
    /// per candidate, each with one value per objective.
    ///
    /// # Errors
    ///
    /// Any error aborts the run and is returned from
    /// [`Unsga3::run`](crate::Unsga3::run) unmodified.
    fn evaluate(
        &mut self,
        population: &mut [Candidate],
        generation: usize,
    ) -> Result<Evaluation, Self::Error>;
}

impl<F, E> FitnessEvaluator for F
where
    F: FnMut(&mut [Candidate], usize) -> Result<Evaluation, E>,
    E: From<Error>,
{
    type Error = E;

    fn evaluate(&mut self, population: &mut [Candidate], generation: usize) -> Result<Evaluation, E> {
        self(population, generation)
    }
}

/// Read-only view of the optimizer after a generation's selection.
#[derive(Clone, Copy, Debug)]
pub struct GenerationSnapshot<'a> {
    /// Zero-based generation index.
    pub generation: usize,
    /// The selected population, ranks and associations stamped.
    pub population: &'a [Candidate],
    /// Population indices grouped by rank.
    pub fronts: &'a [Vec<usize>],
    /// The run's reference directions.
    pub reference_directions: &'a ReferenceDirections,
    /// Slots left empty in this generation.
    pub shortfall: usize,
}

/// Side-effecting per-generation hook, e.g. for plotting or telemetry.
pub trait Inspector {
    fn inspect(&mut self, snapshot: &GenerationSnapshot<'_>);
}

impl<F> Inspector for F
where
    F: FnMut(&GenerationSnapshot<'_>),
{
    fn inspect(&mut self, snapshot: &GenerationSnapshot<'_>) {
        self(snapshot);
    }
}

/// Checks an evaluation against the batch it was produced for.
pub(crate) fn validate_evaluation(
    evaluation: &Evaluation,
    batch_len: usize,
    num_objectives: usize,
) -> crate::Result<()> {
    check_vectors(&evaluation.training, batch_len, num_objectives)?;
    if let Some(validation) = &evaluation.validation {
        check_vectors(validation, batch_len, num_objectives)?;
    }
    Ok(())
}

fn check_vectors(vectors: &[Vec<f64>], batch_len: usize, num_objectives: usize) -> crate::Result<()> {
    if vectors.len() != batch_len {
        return Err(Error::EvaluationCountMismatch {
            expected: batch_len,
            got: vectors.len(),
        });
    }
    if let Some((candidate, v)) = vectors
        .iter()
        .enumerate()
        .find(|(_, v)| v.len() != num_objectives)
    {
        return Err(Error::ObjectiveDimensionMismatch {
            candidate,
            expected: num_objectives,
            got: v.len(),
        });
    }
    Ok(())
}
