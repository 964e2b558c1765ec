use crate::candidate::Candidate;
use crate::dimension::latin_hypercube;
use crate::error::Error;
use crate::evaluator::{Evaluation, FitnessEvaluator, GenerationSnapshot, validate_evaluation};
use crate::fitness::ParetoFitness;
use crate::pareto::{fronts_by_rank, stamp_validation_ranks};
use crate::selection::select_survivors;
use crate::{overfit, rng_util};

use super::Unsga3;

/// The population of one generation, kept when history is recorded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationRecord {
    /// Zero-based generation index.
    pub generation: usize,
    /// The selected population at the end of the generation.
    pub population: Vec<Candidate>,
    /// Population indices grouped by rank.
    pub fronts: Vec<Vec<usize>>,
    /// Slots left empty in this generation.
    pub shortfall: usize,
}

/// Outcome of [`Unsga3::run`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// The final population, best fronts first.
    pub population: Vec<Candidate>,
    /// Indices into `population` grouped by rank; `fronts[0]` is the
    /// Pareto front of the final population.
    pub fronts: Vec<Vec<usize>>,
    /// Every generation in order, when history recording was enabled.
    pub history: Option<Vec<GenerationRecord>>,
    /// Indices of generations whose population came out below target size.
    pub underfilled_generations: Vec<usize>,
}

impl RunResult {
    /// The candidates of the final Pareto front.
    pub fn pareto_front(&self) -> impl Iterator<Item = &Candidate> {
        self.fronts
            .first()
            .into_iter()
            .flatten()
            .map(|&i| &self.population[i])
    }
}

/// The selected population of one generation.
struct Selected {
    population: Vec<Candidate>,
    fronts: Vec<Vec<usize>>,
    shortfall: usize,
}

impl<E: FitnessEvaluator> Unsga3<E> {
    /// Runs every generation and returns the final population.
    ///
    /// Generation 0 seeds the population by Latin hypercube sampling,
    /// evaluates it and selects from it. Each later generation asks the
    /// variation for offspring, evaluates only the offspring, and selects
    /// the next population from parents and offspring together. The
    /// evaluator is called exactly once per generation; the inspector, when
    /// set, right after each selection.
    ///
    /// A generation whose pool is smaller than the population size keeps
    /// everything and is listed in
    /// [`underfilled_generations`](RunResult::underfilled_generations).
    ///
    /// # Errors
    ///
    /// Evaluator errors are returned unmodified. Evaluations with the wrong
    /// number of vectors or objective values, candidates without an active
    /// fitness (e.g. [`FitnessSource::Validation`](crate::FitnessSource::Validation)
    /// without validation vectors) and malformed offspring are reported as
    /// [`Error`]s converted into `E::Error`.
    pub fn run(&mut self) -> Result<RunResult, E::Error> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "unsga3_run",
            max_generations = self.max_generations,
            population_size = self.population_size,
            num_objectives = self.num_objectives
        )
        .entered();

        let mut rng = rng_util::seeded(self.seed);
        let target = self.population_size;
        let mut history = self.record_history.then(Vec::new);
        let mut underfilled_generations = Vec::new();
        let mut population: Vec<Candidate> = Vec::new();
        let mut fronts: Vec<Vec<usize>> = Vec::new();

        for generation in 0..self.max_generations {
            let pool = if generation == 0 {
                let solutions = latin_hypercube(&self.dimensions, target, &mut rng);
                let mut seeded = self.candidates_from(solutions);
                self.evaluate_batch(&mut seeded, generation)?;
                seeded
            } else {
                let children =
                    self.variation
                        .offspring(&population, &self.dimensions, target, &mut rng);
                self.check_offspring(&children)?;
                let mut offspring = self.candidates_from(children);
                self.evaluate_batch(&mut offspring, generation)?;

                let mut pool = core::mem::take(&mut population);
                pool.append(&mut offspring);
                pool
            };

            #[cfg(feature = "tracing")]
            let pool_size = pool.len();
            let selected = self.select(pool, &mut rng)?;
            population = selected.population;
            fronts = selected.fronts;

            if selected.shortfall > 0 {
                underfilled_generations.push(generation);
            }
            trace_info!(
                generation,
                pool = pool_size,
                fronts = fronts.len(),
                shortfall = selected.shortfall,
                "generation complete"
            );

            if let Some(inspector) = self.inspector.as_mut() {
                inspector.inspect(&GenerationSnapshot {
                    generation,
                    population: &population,
                    fronts: &fronts,
                    reference_directions: &self.directions,
                    shortfall: selected.shortfall,
                });
            }
            if let Some(history) = history.as_mut() {
                history.push(GenerationRecord {
                    generation,
                    population: population.clone(),
                    fronts: fronts.clone(),
                    shortfall: selected.shortfall,
                });
            }
        }

        Ok(RunResult {
            population,
            fronts,
            history,
            underfilled_generations,
        })
    }

    /// Calls the evaluator once and stores the returned fitness.
    fn evaluate_batch(&mut self, batch: &mut [Candidate], generation: usize) -> Result<(), E::Error> {
        let evaluation = self.evaluator.evaluate(batch, generation)?;
        validate_evaluation(&evaluation, batch.len(), self.num_objectives)?;

        let Evaluation {
            training,
            validation,
        } = evaluation;
        for (c, values) in batch.iter_mut().zip(training) {
            c.training_fitness = ParetoFitness::new(values);
        }
        if let Some(validation) = validation {
            for (c, values) in batch.iter_mut().zip(validation) {
                c.validation_fitness = ParetoFitness::new(values);
            }
        }
        for c in batch.iter_mut() {
            c.activate(self.fitness_source);
        }
        Ok(())
    }

    fn check_offspring(&self, children: &[Vec<f64>]) -> crate::Result<()> {
        let expected = self.dimensions.len();
        match children.iter().position(|s| s.len() != expected) {
            Some(index) => Err(Error::OffspringDimensionMismatch {
                index,
                expected,
                got: children[index].len(),
            }),
            None => Ok(()),
        }
    }

    /// Ranks the pool, keeps `population_size` survivors and flags overfit
    /// candidates.
    fn select(&self, mut pool: Vec<Candidate>, rng: &mut fastrand::Rng) -> crate::Result<Selected> {
        stamp_validation_ranks(&mut pool);
        let survival = select_survivors(&mut pool, self.population_size, &self.directions, rng)?;

        let mut population: Vec<Candidate> = survival
            .selected
            .iter()
            .map(|&i| core::mem::take(&mut pool[i]))
            .collect();

        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        let flagged = overfit::apply(&*self.overfit_diagnostic, &mut population);
        trace_debug!(flagged, "overfit diagnostic applied");

        let fronts = fronts_by_rank(&population);
        Ok(Selected {
            population,
            fronts,
            shortfall: survival.shortfall,
        })
    }
}
