//! The U-NSGA-III controller.

use crate::candidate::{Candidate, FitnessSource};
use crate::dimension::SolutionDimension;
use crate::evaluator::{FitnessEvaluator, Inspector};
use crate::overfit::OverfitDiagnostic;
use crate::reference_points::ReferenceDirections;
use crate::variation::Variation;

mod builder;
mod run;

pub use builder::Unsga3Builder;
pub use run::{GenerationRecord, RunResult};

/// A configured many-objective optimizer run.
///
/// Created through [`Unsga3::builder`]. Holds the fitness evaluator and the
/// reference directions computed once at construction; every call to
/// [`run`](Self::run) starts a fresh run from the configured seed.
///
/// # Examples
///
/// ```
/// use unsga3::prelude::*;
///
/// // Two conflicting objectives over one variable.
/// let mut optimizer = Unsga3::builder()
///     .dimensions(vec![SolutionDimension::new(0.0, 1.0).unwrap()])
///     .num_objectives(2)
///     .max_generations(5)
///     .seed(42)
///     .build(|population: &mut [Candidate], _generation: usize| {
///         let training = population
///             .iter()
///             .map(|c| vec![c.solution[0].powi(2), (c.solution[0] - 1.0).powi(2)])
///             .collect();
///         Ok::<_, Error>(Evaluation::training(training))
///     })
///     .unwrap();
///
/// let result = optimizer.run().unwrap();
/// assert_eq!(result.population.len(), optimizer.population_size());
/// // Every candidate on this front is Pareto optimal.
/// assert_eq!(result.fronts.len(), 1);
/// ```
pub struct Unsga3<E> {
    pub(crate) dimensions: Vec<SolutionDimension>,
    pub(crate) num_objectives: usize,
    pub(crate) max_generations: usize,
    pub(crate) population_size: usize,
    pub(crate) directions: ReferenceDirections,
    pub(crate) seed: Option<u64>,
    pub(crate) fitness_source: FitnessSource,
    pub(crate) record_history: bool,
    pub(crate) evaluator: E,
    pub(crate) inspector: Option<Box<dyn Inspector>>,
    pub(crate) variation: Box<dyn Variation>,
    pub(crate) overfit_diagnostic: Box<dyn OverfitDiagnostic>,
}

impl Unsga3<()> {
    /// Returns a builder with default settings.
    #[must_use]
    pub fn builder() -> Unsga3Builder {
        Unsga3Builder::new()
    }
}

impl<E: FitnessEvaluator> Unsga3<E> {
    #[must_use]
    pub fn dimensions(&self) -> &[SolutionDimension] {
        &self.dimensions
    }

    #[must_use]
    pub fn num_objectives(&self) -> usize {
        self.num_objectives
    }

    #[must_use]
    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    /// Target size of every generation's population.
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// The reference directions used by every generation of every run.
    #[must_use]
    pub fn reference_directions(&self) -> &ReferenceDirections {
        &self.directions
    }

    #[must_use]
    pub fn fitness_source(&self) -> FitnessSource {
        self.fitness_source
    }

    /// Gives back the evaluator, e.g. to read state it gathered during runs.
    #[must_use]
    pub fn into_evaluator(self) -> E {
        self.evaluator
    }

    /// Builds a fresh candidate for every solution, repaired to the dimensions.
    pub(crate) fn candidates_from(&self, solutions: Vec<Vec<f64>>) -> Vec<Candidate> {
        solutions
            .into_iter()
            .map(|mut s| {
                for (x, d) in s.iter_mut().zip(&self.dimensions) {
                    *x = d.repair(*x);
                }
                Candidate::new(s)
            })
            .collect()
    }
}
