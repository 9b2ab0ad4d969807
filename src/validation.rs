//! Input validation for scheduling problems.
//!
//! Structural integrity checks run once before the search starts.
//! Detects:
//! - Non-positive slot granularity or negative penalty rate
//! - Empty worker or shift collections
//! - Duplicate identifiers within a collection
//! - Record-level invariant violations on deserialized input
//!
//! The search never runs against an unvalidated problem; every
//! violation is fatal to the solve attempt.

use std::collections::HashSet;

use crate::error::{Result, SolverError};
use crate::models::SchedulingProblem;

/// Validates the structural invariants of a scheduling problem.
///
/// Checks, in order:
/// 1. Slot granularity is strictly positive
/// 2. Shortage penalty rate is non-negative (a negative rate would let
///    added shortage lower the objective, breaking the search's bound)
/// 3. At least one worker and at least one shift
/// 4. Worker identifiers are unique
/// 5. Shift identifiers are unique
/// 6. Every worker and shift record holds its own invariants — records
///    built through serde bypass the validating constructors
///
/// Returns the first violation as [`SolverError::InvalidProblem`],
/// [`SolverError::InvalidWorker`], or [`SolverError::InvalidShift`].
pub fn validate_problem(problem: &SchedulingProblem) -> Result<()> {
    if problem.slot_minutes <= 0 {
        return Err(SolverError::InvalidProblem(
            "slot_minutes must be greater than zero".into(),
        ));
    }
    if problem.shortage_penalty_per_worker < 0.0 {
        return Err(SolverError::InvalidProblem(
            "shortage_penalty_per_worker must be non-negative".into(),
        ));
    }
    if problem.workers.is_empty() {
        return Err(SolverError::InvalidProblem(
            "at least one worker is required".into(),
        ));
    }
    if problem.shifts.is_empty() {
        return Err(SolverError::InvalidProblem(
            "at least one shift is required".into(),
        ));
    }

    let mut worker_ids = HashSet::new();
    for worker in &problem.workers {
        if !worker_ids.insert(worker.id.as_str()) {
            return Err(SolverError::InvalidProblem(format!(
                "duplicate worker identifier: {}",
                worker.id
            )));
        }
        worker.check_invariants()?;
    }

    let mut shift_ids = HashSet::new();
    for shift in &problem.shifts {
        if !shift_ids.insert(shift.id.as_str()) {
            return Err(SolverError::InvalidProblem(format!(
                "duplicate shift identifier: {}",
                shift.id
            )));
        }
        shift.check_invariants()?;
    }

    Ok(())
}
