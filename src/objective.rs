//! Objective terms for the search-based solver.
//!
//! The objective is `labor_cost + shortage_penalty`, minimized. Both
//! terms are non-negative, which is the property the search's pruning
//! bound relies on: extending a partial assignment can only add cost,
//! never remove it.

use crate::constraints::{AssignmentsByWorker, ShortfallByShift};
use crate::error::{Result, SolverError};
use crate::models::SchedulingProblem;
use crate::time_grid::TimeGrid;

/// Labor cost: Σ hourly cost × shift duration over all assigned pairs.
pub fn labor_cost(
    assignments: &AssignmentsByWorker,
    problem: &SchedulingProblem,
    grid: &TimeGrid,
) -> Result<f64> {
    let mut total = 0.0;
    for worker in &problem.workers {
        let Some(shift_ids) = assignments.get(&worker.id) else {
            continue;
        };
        for shift_id in shift_ids {
            let shift = problem.shift(shift_id).ok_or_else(|| {
                SolverError::InvalidProblem(format!(
                    "assignment references unknown shift: {shift_id}"
                ))
            })?;
            total += worker.cost_per_hour * grid.shift_duration_hours(shift)?;
        }
    }
    Ok(total)
}

/// Shortage penalty: Σ over shifts with unmet headcount of
/// `shortage × penalty rate × shift weight`.
pub fn shortage_penalty(shortfall: &ShortfallByShift, problem: &SchedulingProblem) -> Result<f64> {
    let mut penalty = 0.0;
    for (shift_id, &shortage) in shortfall {
        if shortage <= 0 {
            continue;
        }
        let shift = problem.shift(shift_id).ok_or_else(|| {
            SolverError::InvalidProblem(format!("shortfall references unknown shift: {shift_id}"))
        })?;
        penalty += shortage as f64 * problem.shortage_penalty_per_worker * shift.weight;
    }
    Ok(penalty)
}

/// Combined objective to minimize.
pub fn total_objective(
    assignments: &AssignmentsByWorker,
    shortfall: &ShortfallByShift,
    problem: &SchedulingProblem,
    grid: &TimeGrid,
) -> Result<f64> {
    Ok(labor_cost(assignments, problem, grid)? + shortage_penalty(shortfall, problem)?)
}
