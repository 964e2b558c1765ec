//! One generation of U-NSGA-III survival.
//!
//! Given a pool of evaluated candidates (parents plus offspring) and a target
//! size, [`select_survivors`]:
//!
//! 1. sorts the pool into non-dominated fronts and stamps ranks;
//! 2. accepts whole fronts while they fit, stopping at the first front that
//!    would overflow (the *boundary* front);
//! 3. normalizes the accepted fronts plus the boundary front and associates
//!    each of them with a reference direction;
//! 4. fills the remaining slots from the boundary front by niching.

use crate::candidate::Candidate;
use crate::error::{Error, Result};
use crate::fitness::ParetoFitness;
use crate::niching::{associate, niching_select};
use crate::normalize::Normalization;
use crate::pareto::non_dominated_sort;
use crate::reference_points::ReferenceDirections;

/// The outcome of one survival pass over a pool.
#[derive(Clone, Debug)]
pub struct Survival {
    /// Pool indices of the survivors: accepted fronts in order, then the
    /// niching picks from the boundary front.
    pub selected: Vec<usize>,
    /// All fronts of the pool, as pool indices.
    pub fronts: Vec<Vec<usize>>,
    /// Index of the front that was truncated by niching, if any.
    pub boundary_front: Option<usize>,
    /// Slots left empty because the pool was smaller than the target.
    pub shortfall: usize,
    /// Ideal point and intercepts used for this pass.
    pub normalization: Normalization,
}

/// Selects up to `target` survivors from `pool`.
///
/// Writes `rank` for every pool member and `normalized_fitness`,
/// `reference_direction` and `reference_distance` for every member of the
/// accepted and boundary fronts; other members have those cleared.
///
/// # Errors
///
/// Returns [`Error::MissingFitness`] when a pool member has no active
/// fitness and [`Error::ObjectiveDimensionMismatch`] when its length differs
/// from the reference directions' objective count.
pub fn select_survivors(
    pool: &mut [Candidate],
    target: usize,
    directions: &ReferenceDirections,
    rng: &mut fastrand::Rng,
) -> Result<Survival> {
    let fronts = non_dominated_sort(pool)?;
    let n_obj = directions.num_objectives();
    if let Some((candidate, c)) = pool
        .iter()
        .enumerate()
        .find(|(_, c)| c.fitness.len() != n_obj)
    {
        return Err(Error::ObjectiveDimensionMismatch {
            candidate,
            expected: n_obj,
            got: c.fitness.len(),
        });
    }

    let mut accepted: Vec<usize> = Vec::with_capacity(target);
    let mut boundary_front = None;
    for (fi, front) in fronts.iter().enumerate() {
        if accepted.len() + front.len() <= target {
            accepted.extend_from_slice(front);
        } else {
            boundary_front = Some(fi);
            break;
        }
    }
    let boundary: &[usize] = match boundary_front {
        Some(fi) => &fronts[fi],
        None => &[],
    };

    // S_t: everything accepted plus the boundary front.
    let considered: Vec<usize> = accepted.iter().chain(boundary).copied().collect();

    for c in pool.iter_mut() {
        c.clear_selection_state();
    }

    let normalization = {
        let values: Vec<&[f64]> = considered.iter().map(|&i| pool[i].fitness.values()).collect();
        Normalization::fit(&values, n_obj)
    };
    let normalized = {
        let values: Vec<&[f64]> = considered.iter().map(|&i| pool[i].fitness.values()).collect();
        normalization.apply_all(&values)
    };
    let associations = associate(&normalized, directions);

    for ((&idx, norm), a) in considered.iter().zip(normalized).zip(&associations) {
        let c = &mut pool[idx];
        c.normalized_fitness = ParetoFitness::new(norm);
        c.reference_direction = Some(a.direction);
        c.reference_distance = Some(a.distance);
    }

    let mut selected = accepted;
    if boundary_front.is_some() {
        // Positions inside `considered`: accepted first, boundary after.
        let n_accepted = selected.len();
        let accepted_pos: Vec<usize> = (0..n_accepted).collect();
        let boundary_pos: Vec<usize> = (n_accepted..considered.len()).collect();
        let outcome = niching_select(
            rng,
            &associations,
            &accepted_pos,
            &boundary_pos,
            directions.len(),
            target - n_accepted,
        );
        selected.extend(outcome.selected.iter().map(|&pos| considered[pos]));
    }

    let shortfall = target.saturating_sub(selected.len());
    #[cfg(feature = "tracing")]
    if shortfall > 0 {
        tracing::info!(
            pool = pool.len(),
            target,
            shortfall,
            "pool too small to fill the next population"
        );
    }
    trace_debug!(
        fronts = fronts.len(),
        boundary_front = ?boundary_front,
        selected = selected.len(),
        "survival pass complete"
    );

    Ok(Survival {
        selected,
        fronts,
        boundary_front,
        shortfall,
        normalization,
    })
}
