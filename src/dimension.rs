//! Decision-variable descriptors and population seeding.
//!
//! A [`SolutionDimension`] fixes the bounds of one decision variable and,
//! optionally, the granularity of the lattice its values live on. The
//! optimizer only uses dimensions to seed the first population and to
//! repair offspring produced by a [`Variation`](crate::variation::Variation).
//!
//! # Example
//!
//! ```
//! use unsga3::SolutionDimension;
//!
//! let rate = SolutionDimension::new(0.0, 1.0).unwrap();
//! let layers = SolutionDimension::discrete(2.0, 10.0, 1.0).unwrap();
//!
//! assert_eq!(rate.repair(1.5), 1.0);
//! assert_eq!(layers.repair(4.4), 4.0);
//! assert_eq!(layers.levels(), Some(9));
//! ```

use crate::error::{Error, Result};
use crate::rng_util;

/// Bounds and optional discretization of one decision variable.
///
/// Feasible values are `min_val..=max_val`; with a granularity `g` they are
/// restricted to `min_val + k * g` for integer `k >= 0`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolutionDimension {
    min_val: f64,
    max_val: f64,
    granularity: Option<f64>,
}

impl SolutionDimension {
    /// Creates a continuous dimension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] unless `min_val < max_val` and both
    /// bounds are finite.
    pub fn new(min_val: f64, max_val: f64) -> Result<Self> {
        if !(min_val.is_finite() && max_val.is_finite()) || min_val >= max_val {
            return Err(Error::InvalidBounds {
                low: min_val,
                high: max_val,
            });
        }
        Ok(Self {
            min_val,
            max_val,
            granularity: None,
        })
    }

    /// Creates a dimension whose values are multiples of `granularity`
    /// above `min_val`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] for inverted bounds and
    /// [`Error::InvalidGranularity`] when `granularity` is not positive.
    pub fn discrete(min_val: f64, max_val: f64, granularity: f64) -> Result<Self> {
        let dimension = Self::new(min_val, max_val)?;
        if !granularity.is_finite() || granularity <= 0.0 {
            return Err(Error::InvalidGranularity(granularity));
        }
        Ok(Self {
            granularity: Some(granularity),
            ..dimension
        })
    }

    #[must_use]
    pub fn min_val(&self) -> f64 {
        self.min_val
    }

    #[must_use]
    pub fn max_val(&self) -> f64 {
        self.max_val
    }

    #[must_use]
    pub fn granularity(&self) -> Option<f64> {
        self.granularity
    }

    /// Number of feasible lattice values, or `None` for continuous dimensions.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn levels(&self) -> Option<usize> {
        self.granularity
            .map(|g| self.max_lattice_index(g) as usize + 1)
    }

    /// Clamps `value` into bounds and snaps it onto the granularity lattice.
    ///
    /// The snapped value never exceeds `max_val`, even when the range is not
    /// an exact multiple of the granularity.
    #[must_use]
    pub fn repair(&self, value: f64) -> f64 {
        let v = if value.is_nan() { self.min_val } else { value };
        let v = v.clamp(self.min_val, self.max_val);
        match self.granularity {
            Some(g) => {
                let k = ((v - self.min_val) / g)
                    .round()
                    .min(self.max_lattice_index(g));
                self.lattice_value(k, g)
            }
            None => v,
        }
    }

    /// Draws a uniformly distributed feasible value.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(&self, rng: &mut fastrand::Rng) -> f64 {
        match self.granularity {
            Some(g) => {
                let levels = self.levels().unwrap_or(1);
                self.lattice_value(rng.usize(0..levels) as f64, g)
            }
            None => rng_util::f64_range(rng, self.min_val, self.max_val),
        }
    }

    /// The `k`-th lattice value, held at `max_val` when rounding would push
    /// the top level past it.
    fn lattice_value(&self, k: f64, g: f64) -> f64 {
        (self.min_val + k * g).min(self.max_val)
    }

    /// Largest `k` such that `min_val + k * g <= max_val`.
    fn max_lattice_index(&self, g: f64) -> f64 {
        // Tolerate ranges that are a multiple of g up to rounding noise.
        ((self.max_val - self.min_val) / g + 1e-9).floor()
    }
}

/// Seeds `n` solutions by Latin hypercube sampling over `dimensions`.
///
/// Each dimension's range is cut into `n` equal strata and every stratum is
/// hit exactly once; strata are permuted independently per dimension. Values
/// are repaired afterwards, so discrete dimensions land on their lattice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn latin_hypercube(
    dimensions: &[SolutionDimension],
    n: usize,
    rng: &mut fastrand::Rng,
) -> Vec<Vec<f64>> {
    let mut solutions = vec![Vec::with_capacity(dimensions.len()); n];
    if n == 0 {
        return solutions;
    }

    let width = 1.0 / n as f64;
    for dimension in dimensions {
        let mut strata: Vec<usize> = (0..n).collect();
        rng.shuffle(&mut strata);
        let span = dimension.max_val - dimension.min_val;
        for (solution, stratum) in solutions.iter_mut().zip(strata) {
            let u = rng_util::f64_range(rng, stratum as f64 * width, (stratum + 1) as f64 * width);
            solution.push(dimension.repair(dimension.min_val + u * span));
        }
    }

    solutions
}
