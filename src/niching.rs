//! Reference-direction association and niche-preserving truncation.
//!
//! Every normalized candidate is attached to the reference direction whose
//! line through the origin passes closest to it (perpendicular distance).
//! When the boundary front only partially fits into the next population,
//! slots are filled one at a time from the least crowded direction:
//!
//! - the direction with the smallest niche count wins, ties going to the
//!   lowest direction index;
//! - an empty niche (count 0) takes its closest boundary candidate, ties
//!   going to the lowest candidate index;
//! - a niche that already has members takes a random boundary candidate;
//! - a direction with no boundary candidates left is closed for the rest of
//!   the pass.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::reference_points::ReferenceDirections;

/// The closest reference direction for one candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Association {
    /// Index into the reference direction set.
    pub direction: usize,
    /// Perpendicular distance from the candidate to that direction's line.
    pub distance: f64,
}

/// Result of one niching pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NichingOutcome {
    /// Selected indices, in selection order.
    pub selected: Vec<usize>,
    /// Slots that could not be filled because the boundary ran out.
    pub shortfall: usize,
    /// Final niche count per reference direction, accepted members included.
    pub niche_counts: Vec<usize>,
}

/// Perpendicular distance from a point to the line spanned by `reference`.
#[must_use]
pub fn perpendicular_distance(point: &[f64], reference: &[f64]) -> f64 {
    let dot: f64 = point.iter().zip(reference).map(|(&p, &r)| p * r).sum();
    let ref_norm_sq: f64 = reference.iter().map(|&r| r * r).sum();

    if ref_norm_sq < 1e-30 {
        return f64::INFINITY;
    }

    let proj_scalar = dot / ref_norm_sq;
    let dist_sq: f64 = point
        .iter()
        .zip(reference)
        .map(|(&p, &r)| {
            let proj = proj_scalar * r;
            (p - proj).powi(2)
        })
        .sum();

    dist_sq.sqrt()
}

fn closest_direction(point: &[f64], directions: &ReferenceDirections) -> Association {
    let mut best = Association {
        direction: 0,
        distance: f64::INFINITY,
    };
    for (j, rp) in directions.iter().enumerate() {
        let d = perpendicular_distance(point, rp);
        if d < best.distance {
            best = Association {
                direction: j,
                distance: d,
            };
        }
    }
    best
}

/// Associates each normalized point with its nearest reference direction.
///
/// Ties go to the lower direction index. Runs in parallel with the
/// `parallel` feature; the output order always matches `normalized`.
#[must_use]
pub fn associate(normalized: &[Vec<f64>], directions: &ReferenceDirections) -> Vec<Association> {
    #[cfg(feature = "parallel")]
    {
        normalized
            .par_iter()
            .map(|p| closest_direction(p, directions))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        normalized
            .iter()
            .map(|p| closest_direction(p, directions))
            .collect()
    }
}

/// Picks up to `remaining` members of `boundary` by niche count.
///
/// `associations` is indexed by the same indices used in `accepted` and
/// `boundary`. Niche counts are seeded from `accepted`, which must not
/// overlap `boundary`.
#[must_use]
pub fn niching_select(
    rng: &mut fastrand::Rng,
    associations: &[Association],
    accepted: &[usize],
    boundary: &[usize],
    n_directions: usize,
    remaining: usize,
) -> NichingOutcome {
    let mut niche_count = vec![0_usize; n_directions];
    for &idx in accepted {
        niche_count[associations[idx].direction] += 1;
    }

    // Boundary members per direction, closest first.
    let mut members: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n_directions];
    for &idx in boundary {
        let a = associations[idx];
        members[a.direction].push((idx, a.distance));
    }
    for list in &mut members {
        list.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    }

    let mut open = vec![true; n_directions];
    let mut selected = Vec::with_capacity(remaining.min(boundary.len()));

    while selected.len() < remaining {
        let Some(chosen) = (0..n_directions)
            .filter(|&j| open[j])
            .min_by_key(|&j| (niche_count[j], j))
        else {
            break;
        };

        let list = &mut members[chosen];
        if list.is_empty() {
            open[chosen] = false;
            continue;
        }

        let pick = if niche_count[chosen] == 0 {
            0
        } else {
            rng.usize(0..list.len())
        };
        let (idx, _) = list.remove(pick);
        selected.push(idx);
        niche_count[chosen] += 1;
    }

    NichingOutcome {
        shortfall: remaining - selected.len(),
        selected,
        niche_counts: niche_count,
    }
}
