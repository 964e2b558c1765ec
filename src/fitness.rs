//! Objective vectors with Pareto dominance semantics.
//!
//! [`ParetoFitness`] is either [`Empty`](ParetoFitness::Empty), for a
//! candidate that has not been evaluated yet, or
//! [`Scored`](ParetoFitness::Scored) with one value per objective. All
//! objectives are minimized.
//!
//! Two unrelated comparisons live here and must not be confused:
//!
//! - [`ParetoFitness::dominates`] is the Pareto partial order used for
//!   ranking.
//! - [`PartialOrd`] is a lexicographic order (first objective, then the
//!   next, ...) that only exists for bookkeeping such as sorting a front for
//!   display.
//!
//! ```
//! use unsga3::ParetoFitness;
//!
//! let a = ParetoFitness::from(vec![0.1, 0.1]);
//! let b = ParetoFitness::from(vec![0.2, 0.2]);
//! assert!(a.dominates(&b));
//! assert!(!b.dominates(&a));
//!
//! assert!(ParetoFitness::Empty.is_empty());
//! assert!(ParetoFitness::from(vec![0.3, 0.7]).is_scored());
//! ```

use core::cmp::Ordering;
use core::ops::Index;

/// Returns `true` if objective vector `a` Pareto-dominates `b` (minimization).
///
/// `a` dominates `b` when it is no worse in every objective and strictly
/// better in at least one. Vectors of different length never dominate each
/// other.
#[must_use]
pub(crate) fn dominates(a: &[f64], b: &[f64]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut strictly_better = false;
    for (&av, &bv) in a.iter().zip(b) {
        if av > bv {
            return false;
        }
        if av < bv {
            strictly_better = true;
        }
    }
    strictly_better
}

/// A fitness vector, one score per objective, or the absence of one.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParetoFitness {
    /// No fitness assigned yet.
    #[default]
    Empty,
    /// Objective scores, lower is better.
    Scored(Vec<f64>),
}

impl ParetoFitness {
    /// Wraps objective values; an empty slice yields [`ParetoFitness::Empty`].
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        if values.is_empty() {
            Self::Empty
        } else {
            Self::Scored(values)
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        !self.is_empty()
    }

    /// Number of objectives, zero when empty.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// The objective values; an empty slice when no fitness is set.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        match self {
            Self::Empty => &[],
            Self::Scored(values) => values,
        }
    }

    #[must_use]
    pub fn get(&self, objective: usize) -> Option<f64> {
        self.values().get(objective).copied()
    }

    /// Returns `true` if `self` Pareto-dominates `other`.
    ///
    /// Always `false` when either side is empty.
    #[must_use]
    pub fn dominates(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scored(a), Self::Scored(b)) => dominates(a, b),
            _ => false,
        }
    }
}

impl From<Vec<f64>> for ParetoFitness {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<&[f64]> for ParetoFitness {
    fn from(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for ParetoFitness {
    fn from(values: [f64; N]) -> Self {
        Self::new(values.to_vec())
    }
}

impl Index<usize> for ParetoFitness {
    type Output = f64;

    fn index(&self, objective: usize) -> &f64 {
        &self.values()[objective]
    }
}

/// Lexicographic bookkeeping order; empty sorts first.
///
/// This is not the dominance relation: `(0.1, 0.9) < (0.9, 0.1)` here even
/// though neither dominates the other.
impl PartialOrd for ParetoFitness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.values().partial_cmp(other.values())
    }
}

impl core::fmt::Display for ParetoFitness {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "()"),
            Self::Scored(values) => {
                write!(f, "(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
        }
    }
}
