//! Scheduling problem aggregate.
//!
//! Bundles workers, shift demands, and global solver options. The worker
//! and shift collections are ordered; their declared order seeds the
//! deterministic enumeration order of the search.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::Result;
use crate::models::worker::normalize_tag;
use crate::models::{ShiftDemand, Worker};
use crate::validation;

fn default_slot_minutes() -> i64 {
    60
}

fn default_shortage_penalty() -> f64 {
    100.0
}

/// Aggregates workers, shift demands, and solver options.
///
/// # Example
///
/// ```
/// use shift_solver::models::{SchedulingProblem, ShiftDemand, Worker};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let workers = vec![Worker::new("w1", "Dana", ["front"], 20.0, 12.0).unwrap()];
/// let shifts = vec![ShiftDemand::new(
///     "s1",
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(13, 0, 0).unwrap(),
///     "front",
///     1,
/// )
/// .unwrap()];
///
/// let problem = SchedulingProblem::new(workers, shifts)
///     .with_slot_minutes(30)
///     .with_shortage_penalty(50.0);
/// assert!(problem.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingProblem {
    /// Workers, in declared order.
    pub workers: Vec<Worker>,
    /// Shift demands, in declared order.
    pub shifts: Vec<ShiftDemand>,
    /// Slot granularity of the time grid, in minutes.
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: i64,
    /// Penalty per missing worker per shift, scaled by shift weight.
    #[serde(default = "default_shortage_penalty")]
    pub shortage_penalty_per_worker: f64,
}

impl SchedulingProblem {
    /// Creates a problem with default options (60-minute slots,
    /// shortage penalty 100.0 per missing worker).
    pub fn new(workers: Vec<Worker>, shifts: Vec<ShiftDemand>) -> Self {
        Self {
            workers,
            shifts,
            slot_minutes: default_slot_minutes(),
            shortage_penalty_per_worker: default_shortage_penalty(),
        }
    }

    /// Sets the slot granularity in minutes.
    pub fn with_slot_minutes(mut self, slot_minutes: i64) -> Self {
        self.slot_minutes = slot_minutes;
        self
    }

    /// Sets the shortage penalty per missing worker.
    pub fn with_shortage_penalty(mut self, penalty: f64) -> Self {
        self.shortage_penalty_per_worker = penalty;
        self
    }

    /// Checks the structural invariants of the whole problem.
    ///
    /// Must pass before the problem reaches the search; see
    /// [`crate::validation::validate_problem`] for the rules.
    pub fn validate(&self) -> Result<()> {
        validation::validate_problem(self)
    }

    /// Looks up a worker by identifier.
    pub fn worker(&self, id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    /// Looks up a shift by identifier.
    pub fn shift(&self, id: &str) -> Option<&ShiftDemand> {
        self.shifts.iter().find(|s| s.id == id)
    }

    /// Union of all worker skill tags.
    pub fn all_skills(&self) -> BTreeSet<String> {
        self.workers
            .iter()
            .flat_map(|w| w.skills.iter().cloned())
            .collect()
    }

    /// Set of skills demanded by at least one shift.
    pub fn required_skills(&self) -> BTreeSet<String> {
        self.shifts
            .iter()
            .map(|s| s.required_skill.clone())
            .collect()
    }

    /// Workers carrying the given skill, in declared order.
    pub fn workers_with_skill(&self, skill: &str) -> Vec<&Worker> {
        let wanted = normalize_tag(skill);
        self.workers
            .iter()
            .filter(|w| w.has_skill(&wanted))
            .collect()
    }
}
