//! Solve result model.
//!
//! The immutable outcome of one search invocation: final status, best
//! objective value, the winning assignment map, and per-shift shortage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome classification of a solve run.
///
/// The exhaustive search reports `Optimal`, or `Feasible` when a time
/// limit cut the search short of proving optimality. `Infeasible` is
/// part of the shared status contract so alternative solver backends
/// can report through the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Best solution over the exhaustive search of this exact model.
    Optimal,
    /// Best incumbent found before the time limit expired.
    Feasible,
    /// No solution satisfies the model.
    Infeasible,
}

/// Final result of a solve invocation.
///
/// Produced exactly once per search; immutable. Maps are keyed by
/// identifier so reports serialize in a stable order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Outcome classification.
    pub status: SolveStatus,
    /// Objective value of the returned assignment.
    pub objective_value: f64,
    /// Worker id → assigned shift ids, in assignment order.
    pub assignments: BTreeMap<String, Vec<String>>,
    /// Shift id → unmet headcount (≥ 0); covers every problem shift.
    pub shortage_by_shift: BTreeMap<String, i32>,
}

impl SolveResult {
    /// Flattens the assignment map into (worker id, shift id) pairs.
    pub fn assigned_pairs(&self) -> Vec<(String, String)> {
        self.assignments
            .iter()
            .flat_map(|(worker, shifts)| {
                shifts.iter().map(move |shift| (worker.clone(), shift.clone()))
            })
            .collect()
    }

    /// Sum of unmet headcount across all shifts.
    pub fn total_shortage(&self) -> i32 {
        self.shortage_by_shift.values().sum()
    }

    /// Whether every shift received its full headcount.
    pub fn is_fully_staffed(&self) -> bool {
        self.total_shortage() == 0
    }
}
