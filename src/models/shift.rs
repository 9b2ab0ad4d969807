//! Shift demand model.
//!
//! A shift demand is a time-bounded requirement for a number of workers
//! holding a given skill. Duration is derived from the endpoints, never
//! stored redundantly.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SolverError};
use crate::models::worker::normalize_tag;

/// Demand for staffing over a single shift block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDemand {
    /// Unique shift identifier.
    pub id: String,
    /// Shift start.
    pub start: NaiveDateTime,
    /// Shift end (strictly after start).
    pub end: NaiveDateTime,
    /// Normalized skill tag every assigned worker must carry.
    pub required_skill: String,
    /// Number of workers demanded.
    pub required_headcount: i32,
    /// Relative weight of this shift's shortage in the objective.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl ShiftDemand {
    /// Creates a validated shift demand with weight 1.0.
    ///
    /// Fails with [`SolverError::InvalidShift`] if the identifier is
    /// empty, the end does not fall strictly after the start, or the
    /// headcount is negative.
    pub fn new(
        id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        required_skill: impl Into<String>,
        required_headcount: i32,
    ) -> Result<Self> {
        let shift = Self {
            id: id.into().trim().to_string(),
            start,
            end,
            required_skill: normalize_tag(&required_skill.into()),
            required_headcount,
            weight: default_weight(),
        };
        shift.check_invariants()?;
        Ok(shift)
    }

    /// Replaces the default weight.
    ///
    /// Fails with [`SolverError::InvalidShift`] if the weight is not
    /// strictly positive.
    pub fn with_weight(mut self, weight: f64) -> Result<Self> {
        self.weight = weight;
        self.check_invariants()?;
        Ok(self)
    }

    /// Shift length, derived from the endpoints.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Re-checks the record invariants.
    ///
    /// Used by problem validation to cover records that bypassed
    /// [`ShiftDemand::new`] (e.g. deserialized input).
    pub(crate) fn check_invariants(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SolverError::invalid_shift(
                self.id.as_str(),
                "identifier must be non-empty",
            ));
        }
        if self.end <= self.start {
            return Err(SolverError::invalid_shift(
                self.id.as_str(),
                "end must be after start",
            ));
        }
        if self.required_headcount < 0 {
            return Err(SolverError::invalid_shift(
                self.id.as_str(),
                "required_headcount must be non-negative",
            ));
        }
        if self.weight <= 0.0 {
            return Err(SolverError::invalid_shift(
                self.id.as_str(),
                "weight must be positive",
            ));
        }
        Ok(())
    }
}
