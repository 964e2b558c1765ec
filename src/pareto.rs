//! Non-dominated sorting of candidate populations.
//!
//! [`non_dominated_sort`] partitions a population into successive fronts:
//! front 0 holds the candidates no one dominates, front `k` those dominated
//! only by members of fronts `0..k`. Each candidate's `rank` is set to the
//! index of its front.
//!
//! The algorithm is the fast non-dominated sort of Deb et al. (2002): for
//! every candidate collect the set it dominates and count how many dominate
//! it, peel off the zero-count candidates as a front, decrement the counts
//! they contributed, and repeat. Complexity is O(M * N²) for M objectives
//! and N candidates.
//!
//! # Example
//!
//! ```
//! use unsga3::pareto::non_dominated_sort;
//! use unsga3::{Candidate, ParetoFitness};
//!
//! let mut population: Vec<Candidate> = [[0.1, 0.1], [0.2, 0.2], [0.5, 0.5]]
//!     .into_iter()
//!     .map(|f| {
//!         let mut c = Candidate::new(vec![]);
//!         c.fitness = ParetoFitness::from(f);
//!         c
//!     })
//!     .collect();
//!
//! let fronts = non_dominated_sort(&mut population).unwrap();
//! assert_eq!(fronts, vec![vec![0], vec![1], vec![2]]);
//! assert_eq!(population[2].rank, 2);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::candidate::Candidate;
use crate::error::{Error, Result};
use crate::fitness::dominates;

/// Fast non-dominated sorting over raw objective vectors.
///
/// Returns fronts of indices into `values`, each front in ascending index
/// order.
pub(crate) fn fast_non_dominated_sort(values: &[&[f64]]) -> Vec<Vec<usize>> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    // S_p: solutions dominated by p. Rows are independent of each other.
    let row = |i: usize| -> Vec<usize> {
        (0..n)
            .filter(|&j| j != i && dominates(values[i], values[j]))
            .collect()
    };
    #[cfg(feature = "parallel")]
    let dominated_by: Vec<Vec<usize>> = (0..n).into_par_iter().map(row).collect();
    #[cfg(not(feature = "parallel"))]
    let dominated_by: Vec<Vec<usize>> = (0..n).map(row).collect();

    // n_p: domination count for p
    let mut domination_count = vec![0_usize; n];
    for dominated in &dominated_by {
        for &q in dominated {
            domination_count[q] += 1;
        }
    }

    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut current_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current_front.is_empty() {
        let mut next_front: Vec<usize> = Vec::new();
        for &p in &current_front {
            for &q in &dominated_by[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next_front.push(q);
                }
            }
        }
        fronts.push(current_front);
        next_front.sort_unstable();
        current_front = next_front;
    }

    fronts
}

/// Sorts `population` into non-dominated fronts on its active fitness and
/// stamps every candidate's `rank`.
///
/// Returns fronts of indices into `population`.
///
/// # Errors
///
/// Returns [`Error::MissingFitness`] for the first candidate whose active
/// fitness is empty; ranks are left untouched in that case.
pub fn non_dominated_sort(population: &mut [Candidate]) -> Result<Vec<Vec<usize>>> {
    let values = active_values(population)?;
    let fronts = fast_non_dominated_sort(&values);

    for (rank, front) in fronts.iter().enumerate() {
        for &idx in front {
            population[idx].rank = rank;
        }
    }
    Ok(fronts)
}

/// Stamps `validation_rank` from a non-dominated sort on validation fitness.
///
/// Candidates without validation fitness get `None`; they neither dominate
/// nor are dominated by anyone in this sort. Returns `false` when no
/// candidate carries a validation fitness.
pub(crate) fn stamp_validation_ranks(population: &mut [Candidate]) -> bool {
    let scored: Vec<usize> = (0..population.len())
        .filter(|&i| population[i].validation_fitness.is_scored())
        .collect();
    for c in population.iter_mut() {
        c.validation_rank = None;
    }
    if scored.is_empty() {
        return false;
    }

    let fronts = {
        let values: Vec<&[f64]> = scored
            .iter()
            .map(|&i| population[i].validation_fitness.values())
            .collect();
        fast_non_dominated_sort(&values)
    };
    for (rank, front) in fronts.iter().enumerate() {
        for &pos in front {
            population[scored[pos]].validation_rank = Some(rank);
        }
    }
    true
}

/// Indices of the non-dominated candidates (front 0) without touching ranks.
///
/// # Errors
///
/// Returns [`Error::MissingFitness`] if any candidate lacks an active fitness.
pub fn pareto_front_indices(population: &[Candidate]) -> Result<Vec<usize>> {
    let values = active_values(population)?;
    Ok(fast_non_dominated_sort(&values)
        .into_iter()
        .next()
        .unwrap_or_default())
}

/// Groups candidate indices by their stamped `rank`.
///
/// Ranks that no candidate holds are skipped, so the result is always a
/// dense list of non-empty fronts in ascending rank order.
#[must_use]
pub fn fronts_by_rank(population: &[Candidate]) -> Vec<Vec<usize>> {
    let Some(max_rank) = population.iter().map(|c| c.rank).max() else {
        return Vec::new();
    };
    let mut fronts = vec![Vec::new(); max_rank + 1];
    for (i, c) in population.iter().enumerate() {
        fronts[c.rank].push(i);
    }
    fronts.retain(|f| !f.is_empty());
    fronts
}

fn active_values(population: &[Candidate]) -> Result<Vec<&[f64]>> {
    population
        .iter()
        .enumerate()
        .map(|(index, c)| {
            if c.fitness.is_empty() {
                Err(Error::MissingFitness { index, id: c.id() })
            } else {
                Ok(c.fitness.values())
            }
        })
        .collect()
}
