//! Das-Dennis reference directions on the unit simplex.
//!
//! The systematic design of Das & Dennis places points on the simplex
//! `{x : x_i >= 0, sum(x) = 1}` at every composition of `p` into
//! `num_objectives` non-negative integer parts, each divided by `p`.
//!
//! Here the lattice is parameterized by `increments`, the number of values
//! each coordinate can take *including zero*, so `p = increments - 1`. With
//! 3 objectives and 5 increments every coordinate is one of
//! `0, 0.25, 0.5, 0.75, 1` and there are `C(4 + 2, 2) = 15` points.
//!
//! ```
//! use unsga3::reference_points::{build_reference_points, reference_point_count};
//!
//! let directions = build_reference_points(3, 5).unwrap();
//! assert_eq!(directions.len(), 15);
//! assert_eq!(reference_point_count(3, 5), 15);
//! for d in directions.iter() {
//!     assert!((d.iter().sum::<f64>() - 1.0).abs() < 1e-12);
//! }
//! ```

use std::sync::Arc;

use crate::error::{Error, Result};

/// An immutable, cheaply clonable set of reference directions.
///
/// Generation order is fixed for given inputs; the position of a direction
/// is its index in niche counting.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceDirections {
    points: Arc<[Vec<f64>]>,
    num_objectives: usize,
    increments: usize,
}

impl ReferenceDirections {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn num_objectives(&self) -> usize {
        self.num_objectives
    }

    #[must_use]
    pub fn increments(&self) -> usize {
        self.increments
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[f64]> {
        self.points.get(index).map(Vec::as_slice)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Vec<f64>] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.points.iter().map(Vec::as_slice)
    }
}

/// Generates every lattice point of the `num_objectives`-dimensional unit
/// simplex with `increments` values per axis (zero included).
///
/// Points come out in lexicographic order of their leading coordinates,
/// first coordinate ascending.
///
/// # Errors
///
/// Returns [`Error::InvalidObjectiveCount`] when `num_objectives` is zero
/// and [`Error::InvalidIncrements`] when `increments < 2`.
///
/// Few increments relative to the objective count leave most candidates
/// sharing a handful of directions, so niching degrades towards random
/// choice among ties. That is a tuning problem, not an error.
pub fn build_reference_points(num_objectives: usize, increments: usize) -> Result<ReferenceDirections> {
    if num_objectives == 0 {
        return Err(Error::InvalidObjectiveCount(num_objectives));
    }
    if increments < 2 {
        return Err(Error::InvalidIncrements(increments));
    }

    let divisions = increments - 1;
    let mut points = Vec::with_capacity(reference_point_count(num_objectives, increments));
    let mut point = vec![0.0_f64; num_objectives];
    das_dennis_recursive(num_objectives, divisions, 0, divisions, &mut point, &mut points);

    Ok(ReferenceDirections {
        points: points.into(),
        num_objectives,
        increments,
    })
}

#[allow(clippy::cast_precision_loss)]
fn das_dennis_recursive(
    n_objectives: usize,
    divisions: usize,
    depth: usize,
    remaining: usize,
    current: &mut Vec<f64>,
    result: &mut Vec<Vec<f64>>,
) {
    if depth == n_objectives - 1 {
        current[depth] = remaining as f64 / divisions as f64;
        result.push(current.clone());
        return;
    }

    for i in 0..=remaining {
        current[depth] = i as f64 / divisions as f64;
        das_dennis_recursive(
            n_objectives,
            divisions,
            depth + 1,
            remaining - i,
            current,
            result,
        );
    }
}

/// Number of points [`build_reference_points`] yields:
/// `C(increments - 1 + num_objectives - 1, num_objectives - 1)`.
///
/// Returns 0 for configurations `build_reference_points` rejects.
#[must_use]
pub fn reference_point_count(num_objectives: usize, increments: usize) -> usize {
    if num_objectives == 0 || increments < 2 {
        return 0;
    }
    let divisions = increments - 1;
    n_combinations(divisions + num_objectives - 1, num_objectives - 1)
}

/// Compute `C(n, k)` = n! / (k! * (n-k)!).
fn n_combinations(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: usize = 1;
    for i in 0..k {
        result = result.saturating_mul(n - i) / (i + 1);
    }
    result
}
