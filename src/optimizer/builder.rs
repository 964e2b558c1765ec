use crate::candidate::FitnessSource;
use crate::dimension::SolutionDimension;
use crate::error::{Error, Result};
use crate::evaluator::{FitnessEvaluator, Inspector};
use crate::overfit::{OverfitDiagnostic, RankDivergence};
use crate::reference_points::{build_reference_points, reference_point_count};
use crate::variation::{SbxVariation, Variation};

use super::Unsga3;

/// A builder for constructing [`Unsga3`] runs with a fluent API.
///
/// Created via [`Unsga3::builder()`]. Nothing is validated until
/// [`build`](Self::build).
///
/// # Defaults
///
/// | Setting | Default |
/// |---------|---------|
/// | Max generations | 100 |
/// | Reference point increments | 5 |
/// | Population size | smallest multiple of 4 that is at least the reference direction count |
/// | Fitness source | [`FitnessSource::Training`] |
/// | Variation | [`SbxVariation`] (crossover 1.0, SBX eta 30, mutation eta 20) |
/// | Overfit diagnostic | [`RankDivergence`] with tolerance 0 |
/// | Seed | random |
///
/// Dimensions and the objective count have no default.
///
/// # Examples
///
/// ```
/// use unsga3::prelude::*;
///
/// let optimizer = Unsga3::builder()
///     .dimensions(vec![
///         SolutionDimension::discrete(0.0, 1.0, 0.1).unwrap(),
///         SolutionDimension::discrete(2.0, 10.0, 1.0).unwrap(),
///         SolutionDimension::new(0.0, 5.0).unwrap(),
///     ])
///     .num_objectives(3)
///     .reference_point_increments(5)
///     .build(|pop: &mut [Candidate], _gen: usize| {
///         Ok::<_, Error>(Evaluation::training(vec![vec![0.0; 3]; pop.len()]))
///     })
///     .unwrap();
///
/// // 15 reference directions, rounded up to a multiple of 4.
/// assert_eq!(optimizer.reference_directions().len(), 15);
/// assert_eq!(optimizer.population_size(), 16);
/// ```
pub struct Unsga3Builder {
    dimensions: Vec<SolutionDimension>,
    num_objectives: Option<usize>,
    max_generations: usize,
    population_size: Option<usize>,
    reference_point_increments: usize,
    seed: Option<u64>,
    fitness_source: FitnessSource,
    record_history: bool,
    inspector: Option<Box<dyn Inspector>>,
    variation: Option<Box<dyn Variation>>,
    overfit_diagnostic: Option<Box<dyn OverfitDiagnostic>>,
    crossover_prob: f64,
    crossover_eta: f64,
    mutation_eta: f64,
}

impl Default for Unsga3Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Unsga3Builder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        let sbx = SbxVariation::default();
        Self {
            dimensions: Vec::new(),
            num_objectives: None,
            max_generations: 100,
            population_size: None,
            reference_point_increments: 5,
            seed: None,
            fitness_source: FitnessSource::Training,
            record_history: false,
            inspector: None,
            variation: None,
            overfit_diagnostic: None,
            crossover_prob: sbx.crossover_prob(),
            crossover_eta: sbx.crossover_eta(),
            mutation_eta: sbx.mutation_eta(),
        }
    }

    /// Set the decision variables, one descriptor per dimension.
    #[must_use]
    pub fn dimensions(mut self, dimensions: impl Into<Vec<SolutionDimension>>) -> Self {
        self.dimensions = dimensions.into();
        self
    }

    /// Set the number of objectives every fitness vector carries.
    #[must_use]
    pub fn num_objectives(mut self, num_objectives: usize) -> Self {
        self.num_objectives = Some(num_objectives);
        self
    }

    /// Set how many generations a run performs, the seeding generation
    /// included.
    #[must_use]
    pub fn max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Set the target population size instead of deriving it from the
    /// reference direction count.
    #[must_use]
    pub fn population_size(mut self, population_size: usize) -> Self {
        self.population_size = Some(population_size);
        self
    }

    /// Set the number of values each reference direction coordinate can
    /// take, zero included.
    #[must_use]
    pub fn reference_point_increments(mut self, increments: usize) -> Self {
        self.reference_point_increments = increments;
        self
    }

    /// Seed the run's random generator for reproducible runs.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Choose which evaluated fitness drives ranking and selection.
    #[must_use]
    pub fn fitness_source(mut self, source: FitnessSource) -> Self {
        self.fitness_source = source;
        self
    }

    /// Keep a copy of every generation's population in the run result.
    #[must_use]
    pub fn record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Set a hook called after every generation's selection.
    #[must_use]
    pub fn inspector(mut self, inspector: impl Inspector + 'static) -> Self {
        self.inspector = Some(Box::new(inspector));
        self
    }

    /// Replace the default offspring operator.
    ///
    /// The crossover and mutation settings of this builder only apply to
    /// the default [`SbxVariation`].
    #[must_use]
    pub fn variation(mut self, variation: impl Variation + 'static) -> Self {
        self.variation = Some(Box::new(variation));
        self
    }

    /// Replace the default [`RankDivergence`] overfitting check.
    #[must_use]
    pub fn overfit_diagnostic(mut self, diagnostic: impl OverfitDiagnostic + 'static) -> Self {
        self.overfit_diagnostic = Some(Box::new(diagnostic));
        self
    }

    /// Set the probability that a mating pair is recombined.
    #[must_use]
    pub fn crossover_prob(mut self, prob: f64) -> Self {
        self.crossover_prob = prob;
        self
    }

    /// Set the SBX distribution index.
    #[must_use]
    pub fn crossover_eta(mut self, eta: f64) -> Self {
        self.crossover_eta = eta;
        self
    }

    /// Set the polynomial mutation distribution index.
    #[must_use]
    pub fn mutation_eta(mut self, eta: f64) -> Self {
        self.mutation_eta = eta;
        self
    }

    /// Validate the configuration and build the optimizer.
    ///
    /// Reference directions are generated here, once.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptySolutionDimensions`] without dimensions.
    /// - [`Error::InvalidObjectiveCount`] when the objective count is unset
    ///   or zero.
    /// - [`Error::InvalidIncrements`] when increments are below 2.
    /// - [`Error::InvalidPopulationSize`] for an explicit size of zero.
    /// - [`Error::InvalidMaxGenerations`] for zero generations.
    /// - [`Error::InvalidProbability`] for a crossover probability outside
    ///   `[0.0, 1.0]`.
    /// - [`Error::InvalidDistributionIndex`] for a negative or non-finite
    ///   crossover or mutation eta.
    pub fn build<E: FitnessEvaluator>(self, evaluator: E) -> Result<Unsga3<E>> {
        if self.dimensions.is_empty() {
            return Err(Error::EmptySolutionDimensions);
        }
        let num_objectives = self.num_objectives.unwrap_or(0);
        let directions = build_reference_points(num_objectives, self.reference_point_increments)?;

        let population_size = match self.population_size {
            Some(0) => return Err(Error::InvalidPopulationSize(0)),
            Some(n) => n,
            None => default_population_size(num_objectives, self.reference_point_increments),
        };
        if self.max_generations == 0 {
            return Err(Error::InvalidMaxGenerations(0));
        }

        let sbx = SbxVariation::new(self.crossover_prob, self.crossover_eta, self.mutation_eta)?;
        let variation = self.variation.unwrap_or_else(|| Box::new(sbx));
        let overfit_diagnostic = self
            .overfit_diagnostic
            .unwrap_or_else(|| Box::new(RankDivergence::default()));

        trace_debug!(
            dimensions = self.dimensions.len(),
            num_objectives,
            reference_directions = directions.len(),
            population_size,
            "optimizer configured"
        );

        Ok(Unsga3 {
            dimensions: self.dimensions,
            num_objectives,
            max_generations: self.max_generations,
            population_size,
            directions,
            seed: self.seed,
            fitness_source: self.fitness_source,
            record_history: self.record_history,
            evaluator,
            inspector: self.inspector,
            variation,
            overfit_diagnostic,
        })
    }
}

/// Smallest multiple of 4 that holds one candidate per reference direction.
fn default_population_size(num_objectives: usize, increments: usize) -> usize {
    reference_point_count(num_objectives, increments)
        .div_ceil(4)
        .max(1)
        * 4
}
