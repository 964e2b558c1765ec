//! Overfitting diagnostics based on validation ranks.
//!
//! When the evaluator supplies validation fitness alongside training
//! fitness, every selected candidate also gets a `validation_rank`. A
//! [`OverfitDiagnostic`] then decides, per candidate, whether the two ranks
//! disagree enough to call it overfit. The verdict lands in
//! [`Candidate::overfit`](crate::Candidate::overfit).

use crate::candidate::Candidate;

/// Decides whether a ranked candidate looks overfit.
pub trait OverfitDiagnostic {
    /// Returns `true` when `candidate` should be flagged.
    ///
    /// Only called for candidates that have a `validation_rank`.
    fn is_overfit(&self, candidate: &Candidate) -> bool;
}

impl<F> OverfitDiagnostic for F
where
    F: Fn(&Candidate) -> bool,
{
    fn is_overfit(&self, candidate: &Candidate) -> bool {
        self(candidate)
    }
}

/// Flags candidates whose validation rank trails their active rank by more
/// than `tolerance` fronts.
///
/// ```
/// use unsga3::Candidate;
/// use unsga3::overfit::{OverfitDiagnostic, RankDivergence};
///
/// let mut c = Candidate::new(vec![]);
/// c.rank = 0;
/// c.validation_rank = Some(3);
/// assert!(RankDivergence { tolerance: 1 }.is_overfit(&c));
/// assert!(!RankDivergence { tolerance: 3 }.is_overfit(&c));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankDivergence {
    /// Number of fronts the validation rank may trail by.
    pub tolerance: usize,
}

impl OverfitDiagnostic for RankDivergence {
    fn is_overfit(&self, candidate: &Candidate) -> bool {
        candidate
            .validation_rank
            .is_some_and(|v| v > candidate.rank.saturating_add(self.tolerance))
    }
}

/// Writes `overfit` for every candidate; `None` where no validation rank exists.
pub(crate) fn apply(diagnostic: &dyn OverfitDiagnostic, population: &mut [Candidate]) -> usize {
    let mut flagged = 0;
    for c in population.iter_mut() {
        let verdict = c.validation_rank.map(|_| diagnostic.is_overfit(c));
        c.overfit = verdict;
        if c.overfit == Some(true) {
            flagged += 1;
        }
    }
    flagged
}
