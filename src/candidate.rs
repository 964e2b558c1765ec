//! Candidate solutions and their per-generation bookkeeping.

use std::collections::HashMap;

use crate::fitness::ParetoFitness;

/// Which evaluated fitness drives ranking and selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitnessSource {
    /// Rank on the training fitness (the default).
    #[default]
    Training,
    /// Rank on the validation fitness, when the evaluator supplies one.
    Validation,
}

/// A caller-defined annotation value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrValue {
    /// A floating-point value.
    Float(f64),
    /// An integer value.
    Int(i64),
    /// A string value.
    String(String),
    /// A boolean value.
    Bool(bool),
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// One solution vector and everything the optimizer learns about it.
///
/// Fitness fields start out [`ParetoFitness::Empty`]. The evaluator fills
/// `training_fitness` (and optionally `validation_fitness`); the optimizer
/// then activates one of them as `fitness`, stamps `rank`, and writes the
/// normalized fitness and reference-direction association during selection.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Decision-variable values, one per solution dimension.
    pub solution: Vec<f64>,
    /// Fitness on the training objectives.
    pub training_fitness: ParetoFitness,
    /// Fitness on the validation objectives, if the evaluator reports one.
    pub validation_fitness: ParetoFitness,
    /// The active fitness used for non-dominated sorting.
    pub fitness: ParetoFitness,
    /// The active fitness translated by the ideal point and scaled by the intercepts.
    pub normalized_fitness: ParetoFitness,
    /// Non-dominated rank, 0 being the Pareto front.
    pub rank: usize,
    /// Non-dominated rank computed on validation fitness.
    pub validation_rank: Option<usize>,
    /// Index of the closest reference direction after the last selection.
    pub reference_direction: Option<usize>,
    /// Perpendicular distance to that reference direction.
    pub reference_distance: Option<f64>,
    /// Verdict of the configured overfitting diagnostic.
    pub overfit: Option<bool>,
    /// Caller-supplied metadata.
    pub annotations: HashMap<String, AttrValue>,
}

impl Candidate {
    #[must_use]
    pub fn new(solution: Vec<f64>) -> Self {
        Self {
            solution,
            ..Self::default()
        }
    }

    /// Copies the training fitness into the active slot.
    pub fn activate_training_fitness(&mut self) {
        self.fitness = self.training_fitness.clone();
    }

    /// Copies the validation fitness into the active slot.
    pub fn activate_validation_fitness(&mut self) {
        self.fitness = self.validation_fitness.clone();
    }

    pub fn activate(&mut self, source: FitnessSource) {
        match source {
            FitnessSource::Training => self.activate_training_fitness(),
            FitnessSource::Validation => self.activate_validation_fitness(),
        }
    }

    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.training_fitness.is_scored()
    }

    /// Sets an annotation, replacing any previous value under `key`.
    pub fn annotate(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.annotations.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&AttrValue> {
        self.annotations.get(key)
    }

    /// The `"id"` annotation rendered as text, used in error reports.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.annotation("id").map(|v| match v {
            AttrValue::Float(f) => f.to_string(),
            AttrValue::Int(i) => i.to_string(),
            AttrValue::String(s) => s.clone(),
            AttrValue::Bool(b) => b.to_string(),
        })
    }

    /// Drops everything derived from a previous selection pass.
    pub(crate) fn clear_selection_state(&mut self) {
        self.normalized_fitness = ParetoFitness::Empty;
        self.reference_direction = None;
        self.reference_distance = None;
    }
}

impl core::fmt::Display for Candidate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "rank {} fitness {}", self.rank, self.fitness)?;
        if let Some(id) = self.id() {
            write!(f, " id {id}")?;
        }
        Ok(())
    }
}
