//! Worker model.
//!
//! A worker is a person who can be assigned to shift demands. Workers
//! carry a skill set, an hour cap over the scheduling horizon, and an
//! hourly cost used by the labor term of the objective.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Result, SolverError};

/// Normalizes a skill tag: trimmed, lowercased.
pub(crate) fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// A worker that may be assigned to shifts.
///
/// Immutable once constructed; [`Worker::new`] validates the record and
/// normalizes skill tags (trimmed, lowercased, empty tags discarded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique worker identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Normalized skill tags.
    pub skills: BTreeSet<String>,
    /// Maximum assignable hours over the scheduling horizon.
    pub max_hours_per_week: f64,
    /// Economic cost per worked hour.
    pub cost_per_hour: f64,
}

impl Worker {
    /// Creates a validated worker.
    ///
    /// Fails with [`SolverError::InvalidWorker`] if the identifier is
    /// empty or the hour cap or hourly cost is negative.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        skills: impl IntoIterator<Item = impl Into<String>>,
        max_hours_per_week: f64,
        cost_per_hour: f64,
    ) -> Result<Self> {
        let worker = Self {
            id: id.into().trim().to_string(),
            name: name.into(),
            skills: skills
                .into_iter()
                .map(|s| normalize_tag(&s.into()))
                .filter(|s| !s.is_empty())
                .collect(),
            max_hours_per_week,
            cost_per_hour,
        };
        worker.check_invariants()?;
        Ok(worker)
    }

    /// Whether this worker carries the given skill (case-insensitive,
    /// whitespace-insensitive).
    pub fn has_skill(&self, skill: &str) -> bool {
        let wanted = normalize_tag(skill);
        if wanted.is_empty() {
            return false;
        }
        // Tags are normalized at construction, but records built through
        // serde may carry raw strings; compare both sides normalized.
        self.skills.iter().any(|tag| normalize_tag(tag) == wanted)
    }

    /// Re-checks the record invariants.
    ///
    /// Used by problem validation to cover records that bypassed
    /// [`Worker::new`] (e.g. deserialized input).
    pub(crate) fn check_invariants(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SolverError::invalid_worker(
                self.id.as_str(),
                "identifier must be non-empty",
            ));
        }
        if self.max_hours_per_week < 0.0 {
            return Err(SolverError::invalid_worker(
                self.id.as_str(),
                "max_hours_per_week must be non-negative",
            ));
        }
        if self.cost_per_hour < 0.0 {
            return Err(SolverError::invalid_worker(
                self.id.as_str(),
                "cost_per_hour must be non-negative",
            ));
        }
        Ok(())
    }
}
