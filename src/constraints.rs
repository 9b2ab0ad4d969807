//! Constraint queries for the search-based solver.
//!
//! Pure functions over a problem plus a candidate (possibly partial)
//! assignment map: skill-eligibility candidate lists, per-shift
//! shortage, per-worker hours, hour-cap and overlap checks. The search
//! consults these at every node; tests use the whole-assignment audits.

use std::collections::BTreeMap;

use crate::error::{Result, SolverError};
use crate::models::{SchedulingProblem, ShiftDemand, Worker};
use crate::time_grid::TimeGrid;

/// Worker id → assigned shift ids, in assignment order.
pub type AssignmentsByWorker = BTreeMap<String, Vec<String>>;

/// Shift id → unmet headcount.
pub type ShortfallByShift = BTreeMap<String, i32>;

/// Slack applied wherever hour totals are compared, absorbing the
/// floating-point rounding of slot-derived durations.
pub const HOURS_TOLERANCE: f64 = 1e-6;

fn lookup_shift<'a>(problem: &'a SchedulingProblem, shift_id: &str) -> Result<&'a ShiftDemand> {
    problem.shift(shift_id).ok_or_else(|| {
        SolverError::InvalidProblem(format!("assignment references unknown shift: {shift_id}"))
    })
}

/// Workers eligible for a shift, in problem-declared order.
///
/// The declared order seeds the combination enumeration of the search,
/// so it must be stable and deterministic.
pub fn eligible_workers<'a>(problem: &'a SchedulingProblem, shift: &ShiftDemand) -> Vec<&'a Worker> {
    problem
        .workers
        .iter()
        .filter(|w| w.has_skill(&shift.required_skill))
        .collect()
}

/// Eligible worker ids per shift id, for every shift in the problem.
pub fn assignment_candidates(problem: &SchedulingProblem) -> BTreeMap<String, Vec<String>> {
    problem
        .shifts
        .iter()
        .map(|shift| {
            let ids = eligible_workers(problem, shift)
                .into_iter()
                .map(|w| w.id.clone())
                .collect();
            (shift.id.clone(), ids)
        })
        .collect()
}

/// Unmet headcount for a shift given how many workers it received.
pub fn shortage_for_shift(shift: &ShiftDemand, assigned_count: usize) -> i32 {
    (shift.required_headcount - assigned_count as i32).max(0)
}

/// Hours consumed per worker under an assignment map.
///
/// Every problem worker appears in the output, at 0.0 when unassigned.
pub fn hours_consumed(
    assignments: &AssignmentsByWorker,
    problem: &SchedulingProblem,
    grid: &TimeGrid,
) -> Result<BTreeMap<String, f64>> {
    let mut hours: BTreeMap<String, f64> = problem
        .workers
        .iter()
        .map(|w| (w.id.clone(), 0.0))
        .collect();
    for (worker_id, shift_ids) in assignments {
        let mut total = 0.0;
        for shift_id in shift_ids {
            let shift = lookup_shift(problem, shift_id)?;
            total += grid.shift_duration_hours(shift)?;
        }
        hours.insert(worker_id.clone(), total);
    }
    Ok(hours)
}

/// Whether adding `shift_to_add` keeps the worker within their hour cap.
pub fn respects_hour_cap(
    worker: &Worker,
    assignments: &AssignmentsByWorker,
    problem: &SchedulingProblem,
    grid: &TimeGrid,
    shift_to_add: &ShiftDemand,
) -> Result<bool> {
    let mut consumed = 0.0;
    if let Some(shift_ids) = assignments.get(&worker.id) {
        for shift_id in shift_ids {
            let shift = lookup_shift(problem, shift_id)?;
            consumed += grid.shift_duration_hours(shift)?;
        }
    }
    let added = grid.shift_duration_hours(shift_to_add)?;
    Ok(consumed + added <= worker.max_hours_per_week + HOURS_TOLERANCE)
}

/// Half-open interval overlap: a shift ending exactly when another
/// starts does not overlap it.
pub fn overlaps(a: &ShiftDemand, b: &ShiftDemand) -> bool {
    a.start < b.end && b.start < a.end
}

/// Whether `shift_to_add` overlaps any shift already assigned to the
/// worker.
pub fn has_overlap(
    worker: &Worker,
    assignments: &AssignmentsByWorker,
    problem: &SchedulingProblem,
    shift_to_add: &ShiftDemand,
) -> Result<bool> {
    let Some(shift_ids) = assignments.get(&worker.id) else {
        return Ok(false);
    };
    for shift_id in shift_ids {
        let assigned = lookup_shift(problem, shift_id)?;
        if overlaps(assigned, shift_to_add) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Whether the worker/shift pair is feasible against the current
/// partial assignment: required skill present, no overlap created, and
/// the hour cap (with tolerance) respected after adding the shift.
pub fn is_feasible(
    worker: &Worker,
    assignments: &AssignmentsByWorker,
    problem: &SchedulingProblem,
    grid: &TimeGrid,
    shift_to_add: &ShiftDemand,
) -> Result<bool> {
    if !worker.has_skill(&shift_to_add.required_skill) {
        return Ok(false);
    }
    if has_overlap(worker, assignments, problem, shift_to_add)? {
        return Ok(false);
    }
    respects_hour_cap(worker, assignments, problem, grid, shift_to_add)
}

/// Audit: every worker stays within their hour cap (with tolerance).
pub fn max_hours_respected(
    assignments: &AssignmentsByWorker,
    problem: &SchedulingProblem,
    grid: &TimeGrid,
) -> Result<bool> {
    let hours = hours_consumed(assignments, problem, grid)?;
    for worker in &problem.workers {
        let consumed = hours.get(&worker.id).copied().unwrap_or(0.0);
        if consumed - HOURS_TOLERANCE > worker.max_hours_per_week {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Audit: no worker holds two overlapping shifts.
pub fn no_overlaps(assignments: &AssignmentsByWorker, problem: &SchedulingProblem) -> Result<bool> {
    for shift_ids in assignments.values() {
        for (i, shift_id) in shift_ids.iter().enumerate() {
            let a = lookup_shift(problem, shift_id)?;
            for other_id in &shift_ids[i + 1..] {
                let b = lookup_shift(problem, other_id)?;
                if overlaps(a, b) {
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}
