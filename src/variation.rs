//! Offspring generation.
//!
//! The optimizer asks a [`Variation`] for `count` new solution vectors each
//! generation after the first. The default [`SbxVariation`] combines the
//! U-NSGA-III niching tournament with simulated binary crossover (SBX) and
//! polynomial mutation; any closure with the matching signature works too:
//!
//! ```
//! use unsga3::variation::Variation;
//! use unsga3::{Candidate, SolutionDimension};
//!
//! // Copy the parents' solutions verbatim.
//! let mut clone_parents = |parents: &[Candidate],
//!                          _dims: &[SolutionDimension],
//!                          count: usize,
//!                          _rng: &mut fastrand::Rng| {
//!     parents.iter().cycle().take(count).map(|p| p.solution.clone()).collect::<Vec<_>>()
//! };
//!
//! let dims = [SolutionDimension::new(0.0, 1.0).unwrap()];
//! let parents = [Candidate::new(vec![0.25])];
//! let mut rng = fastrand::Rng::with_seed(1);
//! let children = clone_parents.offspring(&parents, &dims, 3, &mut rng);
//! assert_eq!(children, vec![vec![0.25]; 3]);
//! ```

use crate::candidate::Candidate;
use crate::dimension::SolutionDimension;
use crate::error::{Error, Result};
use crate::rng_util;

/// Produces new solution vectors from the current population.
pub trait Variation {
    /// Returns exactly `count` solution vectors, one value per dimension.
    ///
    /// `parents` carry their rank and reference association from the last
    /// selection. Values outside a dimension's bounds are repaired by the
    /// optimizer before evaluation.
    fn offspring(
        &mut self,
        parents: &[Candidate],
        dimensions: &[SolutionDimension],
        count: usize,
        rng: &mut fastrand::Rng,
    ) -> Vec<Vec<f64>>;
}

impl<F> Variation for F
where
    F: FnMut(&[Candidate], &[SolutionDimension], usize, &mut fastrand::Rng) -> Vec<Vec<f64>>,
{
    fn offspring(
        &mut self,
        parents: &[Candidate],
        dimensions: &[SolutionDimension],
        count: usize,
        rng: &mut fastrand::Rng,
    ) -> Vec<Vec<f64>> {
        self(parents, dimensions, count, rng)
    }
}

/// Niching tournament, SBX crossover and polynomial mutation.
///
/// | Parameter | Default |
/// |-----------|---------|
/// | Crossover probability | 1.0 |
/// | SBX distribution index | 30.0 |
/// | Mutation distribution index | 20.0 |
///
/// Each variable mutates with probability `1 / dimensions`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SbxVariation {
    crossover_prob: f64,
    crossover_eta: f64,
    mutation_eta: f64,
}

impl Default for SbxVariation {
    fn default() -> Self {
        Self {
            crossover_prob: 1.0,
            crossover_eta: 30.0,
            mutation_eta: 20.0,
        }
    }
}

impl SbxVariation {
    /// Creates the operator with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProbability`] if `crossover_prob` is outside
    /// `[0.0, 1.0]` and [`Error::InvalidDistributionIndex`] if either eta is
    /// negative or not finite.
    pub fn new(crossover_prob: f64, crossover_eta: f64, mutation_eta: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&crossover_prob) {
            return Err(Error::InvalidProbability(crossover_prob));
        }
        for eta in [crossover_eta, mutation_eta] {
            if !eta.is_finite() || eta < 0.0 {
                return Err(Error::InvalidDistributionIndex(eta));
            }
        }
        Ok(Self {
            crossover_prob,
            crossover_eta,
            mutation_eta,
        })
    }

    #[must_use]
    pub fn crossover_prob(&self) -> f64 {
        self.crossover_prob
    }

    #[must_use]
    pub fn crossover_eta(&self) -> f64 {
        self.crossover_eta
    }

    #[must_use]
    pub fn mutation_eta(&self) -> f64 {
        self.mutation_eta
    }

    fn crossover(
        &self,
        rng: &mut fastrand::Rng,
        parent1: &[f64],
        parent2: &[f64],
        dimensions: &[SolutionDimension],
    ) -> (Vec<f64>, Vec<f64>) {
        let mut child1 = parent1.to_vec();
        let mut child2 = parent2.to_vec();

        if rng_util::f64_range(rng, 0.0, 1.0) > self.crossover_prob {
            return (child1, child2);
        }

        for (i, d) in dimensions.iter().enumerate() {
            let (p1, p2) = (parent1[i], parent2[i]);
            if (p1 - p2).abs() < 1e-14 {
                continue;
            }
            let (c1, c2) = sbx_crossover_f64(
                rng,
                p1,
                p2,
                d.min_val(),
                d.max_val(),
                self.crossover_eta,
            );
            child1[i] = c1;
            child2[i] = c2;
        }

        (child1, child2)
    }

    #[allow(clippy::cast_precision_loss)]
    fn mutate(&self, rng: &mut fastrand::Rng, individual: &mut [f64], dimensions: &[SolutionDimension]) {
        let n = individual.len();
        if n == 0 {
            return;
        }
        let mutation_prob = 1.0 / n as f64;

        for (x, d) in individual.iter_mut().zip(dimensions) {
            if rng_util::f64_range(rng, 0.0, 1.0) >= mutation_prob {
                continue;
            }
            *x = polynomial_mutation_f64(rng, *x, d.min_val(), d.max_val(), self.mutation_eta);
        }
    }
}

impl Variation for SbxVariation {
    fn offspring(
        &mut self,
        parents: &[Candidate],
        dimensions: &[SolutionDimension],
        count: usize,
        rng: &mut fastrand::Rng,
    ) -> Vec<Vec<f64>> {
        if parents.is_empty() {
            return (0..count)
                .map(|_| dimensions.iter().map(|d| d.sample(rng)).collect())
                .collect();
        }

        let mut children = Vec::with_capacity(count + 1);
        while children.len() < count {
            let p1 = niching_tournament(rng, parents);
            let p2 = niching_tournament(rng, parents);

            let (mut c1, mut c2) = self.crossover(rng, &p1.solution, &p2.solution, dimensions);
            self.mutate(rng, &mut c1, dimensions);
            self.mutate(rng, &mut c2, dimensions);

            children.push(repair(c1, dimensions));
            children.push(repair(c2, dimensions));
        }
        children.truncate(count);
        children
    }
}

/// U-NSGA-III mating selection between two random parents.
///
/// Parents associated with the same reference direction compete on rank,
/// then on perpendicular distance; otherwise the winner is random.
pub(crate) fn niching_tournament<'a>(rng: &mut fastrand::Rng, parents: &'a [Candidate]) -> &'a Candidate {
    let a = &parents[rng.usize(0..parents.len())];
    let b = &parents[rng.usize(0..parents.len())];

    match (a.reference_direction, b.reference_direction) {
        (Some(da), Some(db)) if da == db => {
            if a.rank != b.rank {
                return if a.rank < b.rank { a } else { b };
            }
            let dist_a = a.reference_distance.unwrap_or(f64::INFINITY);
            let dist_b = b.reference_distance.unwrap_or(f64::INFINITY);
            if dist_a <= dist_b { a } else { b }
        }
        _ => {
            if rng.bool() {
                a
            } else {
                b
            }
        }
    }
}

fn repair(mut solution: Vec<f64>, dimensions: &[SolutionDimension]) -> Vec<f64> {
    for (x, d) in solution.iter_mut().zip(dimensions) {
        *x = d.repair(*x);
    }
    solution
}

/// SBX crossover for a single variable.
pub(crate) fn sbx_crossover_f64(
    rng: &mut fastrand::Rng,
    p1: f64,
    p2: f64,
    low: f64,
    high: f64,
    eta: f64,
) -> (f64, f64) {
    let u: f64 = rng_util::f64_range(rng, 0.0, 1.0);

    let beta = if u <= 0.5 {
        (2.0 * u).powf(1.0 / (eta + 1.0))
    } else {
        (1.0 / (2.0 * (1.0 - u))).powf(1.0 / (eta + 1.0))
    };

    let c1 = 0.5 * ((1.0 + beta) * p1 + (1.0 - beta) * p2);
    let c2 = 0.5 * ((1.0 - beta) * p1 + (1.0 + beta) * p2);

    (c1.clamp(low, high), c2.clamp(low, high))
}

/// Polynomial mutation for a single variable.
pub(crate) fn polynomial_mutation_f64(
    rng: &mut fastrand::Rng,
    x: f64,
    low: f64,
    high: f64,
    eta: f64,
) -> f64 {
    let u: f64 = rng_util::f64_range(rng, 0.0, 1.0);
    let range = high - low;
    if range <= 0.0 {
        return x;
    }

    let delta1 = (x - low) / range;
    let delta2 = (high - x) / range;

    let delta_q = if u < 0.5 {
        let xy = 1.0 - delta1;
        let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
        val.powf(1.0 / (eta + 1.0)) - 1.0
    } else {
        let xy = 1.0 - delta2;
        let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
        1.0 - val.powf(1.0 / (eta + 1.0))
    };

    (x + delta_q * range).clamp(low, high)
}
