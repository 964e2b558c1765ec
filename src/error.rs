/// Errors raised while configuring or running the optimizer.
///
/// Every variant describes a caller mistake or a violated precondition.
/// Degenerate normalization and niche starvation are recovered locally and
/// never show up here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a solution dimension's lower bound is not below its upper bound.
    #[error("invalid bounds: min ({low}) must be less than max ({high})")]
    InvalidBounds {
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when a discretization granularity is not a positive finite number.
    #[error("invalid granularity: {0} must be positive and finite")]
    InvalidGranularity(f64),

    /// Returned when the optimizer is built without any solution dimension.
    #[error("at least one solution dimension is required")]
    EmptySolutionDimensions,

    /// Returned when the objective count is zero.
    #[error("invalid objective count: {0} (need at least one objective)")]
    InvalidObjectiveCount(usize),

    /// Returned when reference point increments cannot form a simplex lattice.
    #[error("invalid reference point increments: {0} (need at least 2, the zero point included)")]
    InvalidIncrements(usize),

    /// Returned when an explicit population size is zero.
    #[error("invalid population size: {0}")]
    InvalidPopulationSize(usize),

    /// Returned when the run is configured with zero generations.
    #[error("invalid max generations: {0} (need at least one generation)")]
    InvalidMaxGenerations(usize),

    /// Returned when a probability lies outside `[0.0, 1.0]`.
    #[error("invalid probability: {0} must be in [0.0, 1.0]")]
    InvalidProbability(f64),

    /// Returned when an SBX or mutation distribution index is negative or
    /// not finite.
    #[error("invalid distribution index: {0} must be finite and non-negative")]
    InvalidDistributionIndex(f64),

    /// Returned when the evaluator returns a different number of fitness
    /// vectors than there are candidates.
    #[error("evaluation count mismatch: expected {expected} fitness vectors, got {got}")]
    EvaluationCountMismatch {
        /// The number of candidates handed to the evaluator.
        expected: usize,
        /// The number of fitness vectors returned.
        got: usize,
    },

    /// Returned when a fitness vector's length differs from the objective count.
    #[error(
        "objective dimension mismatch: candidate {candidate} has {got} objective values, expected {expected}"
    )]
    ObjectiveDimensionMismatch {
        /// Position of the offending candidate in the evaluated batch.
        candidate: usize,
        /// The configured number of objectives.
        expected: usize,
        /// The length of the returned fitness vector.
        got: usize,
    },

    /// Returned when a candidate without an active fitness reaches sorting.
    #[error("candidate {index} has no fitness (id: {})", .id.as_deref().unwrap_or("none"))]
    MissingFitness {
        /// Position of the candidate in the sorted population.
        index: usize,
        /// The candidate's `id` annotation, when one was set.
        id: Option<String>,
    },

    /// Returned when a variation produces a solution with the wrong number
    /// of values.
    #[error("offspring {index} has {got} values, expected {expected}")]
    OffspringDimensionMismatch {
        /// Position of the offending offspring.
        index: usize,
        /// The number of solution dimensions.
        expected: usize,
        /// The length of the produced solution.
        got: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
