//! Objective normalization via the ideal point and hyperplane intercepts.
//!
//! Each generation, the candidates kept so far plus the boundary front are
//! mapped into a common scale:
//!
//! 1. The **ideal point** is the component-wise minimum fitness.
//! 2. Every vector is translated so the ideal point becomes the origin.
//! 3. For each objective an **extreme point** is found by minimizing the
//!    achievement scalarizing function along that axis. The hyperplane
//!    through the extreme points yields one **intercept** per axis.
//! 4. Translated values are divided by the intercepts.
//!
//! When the extreme points do not span a usable hyperplane (singular
//! system, non-positive or non-finite intercepts) the component-wise maximum
//! of the translated values is used instead, and any axis whose range is
//! zero is scaled by 1.

use nalgebra::{DMatrix, DVector};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Smallest scale treated as a real range.
const MIN_SCALE: f64 = 1e-10;
/// Weight given to the off-axis objectives when searching extreme points.
const ASF_EPSILON: f64 = 1e-6;

/// Ideal point and per-axis scale estimated for one generation.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalization {
    /// Component-wise best (minimum) objective values.
    pub ideal: Vec<f64>,
    /// Per-objective scale, always strictly positive.
    pub intercepts: Vec<f64>,
    /// Whether the intercepts came from the extreme-point hyperplane
    /// rather than the max fallback.
    pub from_hyperplane: bool,
}

impl Normalization {
    /// Estimates the ideal point and intercepts of `values`.
    ///
    /// All vectors must have `n_obj` components. An empty input gives a zero
    /// ideal point and unit intercepts.
    #[must_use]
    pub fn fit(values: &[&[f64]], n_obj: usize) -> Self {
        if values.is_empty() || n_obj == 0 {
            return Self {
                ideal: vec![0.0; n_obj],
                intercepts: vec![1.0; n_obj],
                from_hyperplane: false,
            };
        }

        let ideal = ideal_point(values, n_obj);
        let translated: Vec<Vec<f64>> = values.iter().map(|v| translate(v, &ideal)).collect();

        let extremes = extreme_points(&translated, n_obj);
        match hyperplane_intercepts(&translated, &extremes) {
            Some(intercepts) => Self {
                ideal,
                intercepts,
                from_hyperplane: true,
            },
            None => Self {
                ideal,
                intercepts: max_intercepts(&translated, n_obj),
                from_hyperplane: false,
            },
        }
    }

    /// Maps a raw fitness vector into normalized objective space.
    #[must_use]
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(&self.ideal)
            .zip(&self.intercepts)
            .map(|((&v, &z), &a)| (v - z) / a)
            .collect()
    }

    /// Normalizes many vectors; parallel with the `parallel` feature.
    #[must_use]
    pub fn apply_all(&self, values: &[&[f64]]) -> Vec<Vec<f64>> {
        #[cfg(feature = "parallel")]
        {
            values.par_iter().map(|v| self.apply(v)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            values.iter().map(|v| self.apply(v)).collect()
        }
    }
}

/// Component-wise minimum of `values`.
pub(crate) fn ideal_point(values: &[&[f64]], n_obj: usize) -> Vec<f64> {
    let mut ideal = vec![f64::INFINITY; n_obj];
    for vals in values {
        for (z, &v) in ideal.iter_mut().zip(vals.iter()) {
            if v < *z {
                *z = v;
            }
        }
    }
    ideal
}

fn translate(values: &[f64], ideal: &[f64]) -> Vec<f64> {
    values.iter().zip(ideal).map(|(&v, &z)| v - z).collect()
}

/// Achievement scalarizing function of an already translated point.
fn asf(point: &[f64], weight: &[f64]) -> f64 {
    point
        .iter()
        .zip(weight)
        .map(|(&p, &w)| p / w.max(ASF_EPSILON))
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Index of the extreme point for every objective axis.
fn extreme_points(translated: &[Vec<f64>], n_obj: usize) -> Vec<usize> {
    (0..n_obj)
        .map(|obj| {
            let mut weight = vec![ASF_EPSILON; n_obj];
            weight[obj] = 1.0;

            let mut best_idx = 0;
            let mut best_asf = f64::INFINITY;
            for (i, vals) in translated.iter().enumerate() {
                let a = asf(vals, &weight);
                if a < best_asf {
                    best_asf = a;
                    best_idx = i;
                }
            }
            best_idx
        })
        .collect()
}

/// Solves `E b = 1` for the hyperplane through the extreme points and
/// returns the axis intercepts `1 / b_i`.
///
/// `None` when the system is singular or any intercept is non-positive,
/// non-finite, or negligibly small.
fn hyperplane_intercepts(translated: &[Vec<f64>], extremes: &[usize]) -> Option<Vec<f64>> {
    let n_obj = extremes.len();
    let matrix = DMatrix::from_fn(n_obj, n_obj, |row, col| translated[extremes[row]][col]);
    let ones = DVector::from_element(n_obj, 1.0);

    let plane = matrix.lu().solve(&ones)?;
    plane
        .iter()
        .map(|&b| {
            let intercept = 1.0 / b;
            (intercept.is_finite() && intercept > MIN_SCALE).then_some(intercept)
        })
        .collect()
}

/// Fallback scale: the largest translated value per axis, 1 on zero range.
fn max_intercepts(translated: &[Vec<f64>], n_obj: usize) -> Vec<f64> {
    (0..n_obj)
        .map(|obj| {
            let max_val = translated
                .iter()
                .map(|v| v[obj])
                .fold(f64::NEG_INFINITY, f64::max);
            if max_val.is_finite() && max_val > MIN_SCALE {
                max_val
            } else {
                1.0
            }
        })
        .collect()
}
