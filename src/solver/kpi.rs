//! Schedule quality metrics (KPIs).
//!
//! Computes staffing performance indicators from a completed solve
//! result and its input problem.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage Rate | fully staffed shifts / shifts with demand |
//! | Total Shortage | Σ unmet headcount |
//! | Labor Cost | Σ hourly cost × assigned hours |
//! | Shortage Penalty | Σ shortage × penalty rate × weight |
//! | Utilization | assigned hours / hour cap, per worker |

use serde::Serialize;
use std::collections::BTreeMap;

use crate::constraints;
use crate::error::Result;
use crate::models::{SchedulingProblem, SolveResult};
use crate::objective;
use crate::time_grid::TimeGrid;

/// Staffing performance indicators for one solve result.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleKpi {
    /// Number of worker/shift assignments.
    pub assignment_count: usize,
    /// Total assigned hours across all workers.
    pub total_assigned_hours: f64,
    /// Labor term of the objective.
    pub labor_cost: f64,
    /// Shortage term of the objective.
    pub shortage_penalty: f64,
    /// Shifts demanding at least one worker.
    pub demanded_shifts: usize,
    /// Demanded shifts that received their full headcount.
    pub fully_staffed_shifts: usize,
    /// fully_staffed_shifts / demanded_shifts (1.0 when nothing is demanded).
    pub coverage_rate: f64,
    /// Sum of unmet headcount across all shifts.
    pub total_shortage: i32,
    /// Assigned hours per worker (0.0 when unassigned).
    pub hours_by_worker: BTreeMap<String, f64>,
    /// Assigned hours / hour cap per worker (0.0 for a zero cap).
    pub utilization_by_worker: BTreeMap<String, f64>,
}

impl ScheduleKpi {
    /// Computes KPIs from a solve result and its input problem.
    pub fn calculate(
        result: &SolveResult,
        problem: &SchedulingProblem,
        grid: &TimeGrid,
    ) -> Result<Self> {
        let hours_by_worker = constraints::hours_consumed(&result.assignments, problem, grid)?;
        let labor_cost = objective::labor_cost(&result.assignments, problem, grid)?;
        let shortage_penalty = objective::shortage_penalty(&result.shortage_by_shift, problem)?;

        let assignment_count = result.assignments.values().map(|shifts| shifts.len()).sum();
        let total_assigned_hours = hours_by_worker.values().sum();

        let demanded_shifts = problem
            .shifts
            .iter()
            .filter(|s| s.required_headcount > 0)
            .count();
        let fully_staffed_shifts = problem
            .shifts
            .iter()
            .filter(|s| {
                s.required_headcount > 0
                    && result
                        .shortage_by_shift
                        .get(&s.id)
                        .copied()
                        .unwrap_or(s.required_headcount)
                        == 0
            })
            .count();
        let coverage_rate = if demanded_shifts == 0 {
            1.0
        } else {
            fully_staffed_shifts as f64 / demanded_shifts as f64
        };

        let utilization_by_worker = problem
            .workers
            .iter()
            .map(|worker| {
                let hours = hours_by_worker.get(&worker.id).copied().unwrap_or(0.0);
                let utilization = if worker.max_hours_per_week > 0.0 {
                    hours / worker.max_hours_per_week
                } else {
                    0.0
                };
                (worker.id.clone(), utilization)
            })
            .collect();

        Ok(Self {
            assignment_count,
            total_assigned_hours,
            labor_cost,
            shortage_penalty,
            demanded_shifts,
            fully_staffed_shifts,
            coverage_rate,
            total_shortage: result.total_shortage(),
            hours_by_worker,
            utilization_by_worker,
        })
    }
}
