//! Report rendering for solve results.
//!
//! Projects a [`SolveResult`] into a serializable report (for JSON
//! output) and a plain-text summary (for terminal output). The core
//! result types stay serialization-free beyond their serde derives;
//! all presentation lives here.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{SchedulingProblem, SolveResult, SolveStatus};
use crate::solver::ScheduleKpi;
use crate::time_grid::TimeGrid;

/// One worker/shift pair in the report's assignment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignedShift {
    pub worker_id: String,
    pub shift_id: String,
}

/// Serializable projection of a solve result.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    /// Outcome classification.
    pub status: SolveStatus,
    /// Objective value of the returned assignment.
    pub objective_value: f64,
    /// Flattened assignment pairs, ordered by worker id.
    pub assignments: Vec<AssignedShift>,
    /// Unmet headcount per shift.
    pub shortage_by_shift: BTreeMap<String, i32>,
    /// Quality indicators.
    pub kpi: ScheduleKpi,
}

impl SolveReport {
    /// Builds a report from a result and the problem it solved.
    pub fn new(result: &SolveResult, problem: &SchedulingProblem) -> Result<Self> {
        let grid = TimeGrid::from_problem(problem)?;
        let kpi = ScheduleKpi::calculate(result, problem, &grid)?;
        let assignments = result
            .assigned_pairs()
            .into_iter()
            .map(|(worker_id, shift_id)| AssignedShift { worker_id, shift_id })
            .collect();
        Ok(Self {
            status: result.status,
            objective_value: result.objective_value,
            assignments,
            shortage_by_shift: result.shortage_by_shift.clone(),
            kpi,
        })
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Renders a plain-text summary block.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Status: {:?}", self.status));
        lines.push(format!("Objective: {:.2}", self.objective_value));
        lines.push(format!(
            "Coverage: {}/{} shifts ({:.0}%)",
            self.kpi.fully_staffed_shifts,
            self.kpi.demanded_shifts,
            self.kpi.coverage_rate * 100.0
        ));
        lines.push(format!("Assignments ({}):", self.assignments.len()));
        for assignment in &self.assignments {
            lines.push(format!(
                "  {} -> {}",
                assignment.worker_id, assignment.shift_id
            ));
        }
        let shortages: Vec<_> = self
            .shortage_by_shift
            .iter()
            .filter(|(_, &missing)| missing > 0)
            .collect();
        if shortages.is_empty() {
            lines.push("All shifts fully staffed".to_string());
        } else {
            lines.push("Shortages:".to_string());
            for (shift_id, missing) in shortages {
                lines.push(format!("  {shift_id}: {missing} missing"));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_data::minimal_problem;
    use crate::solver::solve;

    #[test]
    fn test_report_fields() {
        let problem = minimal_problem().unwrap();
        let result = solve(&problem).unwrap();
        let report = SolveReport::new(&result, &problem).unwrap();

        assert_eq!(report.status, SolveStatus::Optimal);
        assert_eq!(report.assignments.len(), 2);
        assert_eq!(report.shortage_by_shift.len(), 2);
        assert!(report
            .assignments
            .contains(&AssignedShift {
                worker_id: "alice".to_string(),
                shift_id: "shift_2".to_string(),
            }));
    }

    #[test]
    fn test_report_json_shape() {
        let problem = minimal_problem().unwrap();
        let result = solve(&problem).unwrap();
        let report = SolveReport::new(&result, &problem).unwrap();
        let json = report.to_json_pretty().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "Optimal");
        assert!(value["objective_value"].is_f64() || value["objective_value"].is_u64());
        assert!(value["assignments"].is_array());
        assert!(value["shortage_by_shift"].is_object());
        assert!(value["kpi"]["coverage_rate"].is_number());
    }

    #[test]
    fn test_summary_mentions_shortages() {
        let problem = minimal_problem().unwrap();
        let result = solve(&problem).unwrap();
        let report = SolveReport::new(&result, &problem).unwrap();
        let summary = report.summary();
        assert!(summary.contains("Status: Optimal"));
        assert!(summary.contains("All shifts fully staffed"));

        let mut understaffed = problem.clone();
        understaffed.workers[0].skills.remove("back");
        let result = solve(&understaffed).unwrap();
        let report = SolveReport::new(&result, &understaffed).unwrap();
        assert!(report.summary().contains("shift_2: 1 missing"));
    }
}
