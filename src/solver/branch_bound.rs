//! Exhaustive branch-and-bound assignment search.
//!
//! # Algorithm
//!
//! 1. Sort shifts by `(start, id)`; one shift is decided per recursion
//!    depth.
//! 2. Per shift, enumerate subsets of its eligible workers by
//!    descending size, from `min(|eligible|, required_headcount)` down
//!    to the empty subset. Larger subsets first tend to find
//!    low-shortage incumbents early, tightening the pruning bound.
//! 3. A subset is explored only if every member is feasible against
//!    the current partial assignment (skill, overlap, hour cap).
//! 4. Commit the subset, compute the partial objective over everything
//!    decided so far, and recurse only while it is strictly below the
//!    incumbent objective — both objective terms are non-negative, so
//!    the partial objective is a true lower bound on any completion.
//!    Roll back after every attempt, including improving ones.
//! 5. A complete assignment strictly below the incumbent replaces it.
//!
//! Strict `<` on both the pruning gate and incumbent replacement is the
//! contract: an equal-cost alternative found later never displaces the
//! incumbent, so results are deterministic under the fixed orderings.
//!
//! The search is single-threaded depth-first recursion. The in-progress
//! assignment and shortfall maps are owned by the search state; each
//! frame commits before recursing and rolls back after, so no two
//! frames ever observe inconsistent state.

use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{debug, info};

use crate::constraints::{self, AssignmentsByWorker, ShortfallByShift};
use crate::error::{Result, SolverError};
use crate::models::{SchedulingProblem, ShiftDemand, SolveResult, SolveStatus, Worker};
use crate::objective;
use crate::time_grid::TimeGrid;

/// Exhaustive solver for [`SchedulingProblem`]s.
///
/// # Example
///
/// ```
/// use shift_solver::demo_data::minimal_problem;
/// use shift_solver::solver::BranchAndBoundSolver;
///
/// let problem = minimal_problem().unwrap();
/// let result = BranchAndBoundSolver::new().solve(&problem).unwrap();
/// assert!(result.is_fully_staffed());
/// ```
#[derive(Debug, Clone)]
pub struct BranchAndBoundSolver {
    time_limit: Option<Duration>,
}

impl BranchAndBoundSolver {
    /// Creates a solver that runs to proven optimality.
    pub fn new() -> Self {
        Self { time_limit: None }
    }

    /// Bounds the search wall-clock time.
    ///
    /// On expiry the search unwinds and the best incumbent is returned
    /// with status [`SolveStatus::Feasible`] instead of
    /// [`SolveStatus::Optimal`]. The limit is only honored once a first
    /// complete assignment exists, so a solution is always produced.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Runs the search and returns the best assignment found.
    ///
    /// Validates the problem first and propagates
    /// [`SolverError::InvalidProblem`] / [`SolverError::InvalidWorker`]
    /// / [`SolverError::InvalidShift`] if the caller skipped
    /// validation. Fails with [`SolverError::NoFeasibleAssignment`]
    /// only when no complete assignment was ever reached.
    pub fn solve(&self, problem: &SchedulingProblem) -> Result<SolveResult> {
        problem.validate()?;
        let grid = TimeGrid::from_problem(problem)?;

        let mut shifts: Vec<&ShiftDemand> = problem.shifts.iter().collect();
        shifts.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        let eligible: Vec<Vec<&Worker>> = shifts
            .iter()
            .map(|shift| constraints::eligible_workers(problem, shift))
            .collect();

        info!(
            "solving problem with {} workers and {} shifts",
            problem.workers.len(),
            problem.shifts.len()
        );
        let started = Instant::now();

        let mut search = Search {
            problem,
            grid: &grid,
            shifts,
            eligible,
            assignments: problem
                .workers
                .iter()
                .map(|w| (w.id.clone(), Vec::new()))
                .collect(),
            shortfall: problem.shifts.iter().map(|s| (s.id.clone(), 0)).collect(),
            best: None,
            deadline: self.time_limit.map(|limit| Instant::now() + limit),
            deadline_hit: false,
            nodes: 0,
        };
        search.run(0)?;

        debug!(
            "explored {} nodes in {:.2?}",
            search.nodes,
            started.elapsed()
        );

        let Some(best) = search.best else {
            return Err(SolverError::NoFeasibleAssignment);
        };
        let status = if search.deadline_hit {
            SolveStatus::Feasible
        } else {
            SolveStatus::Optimal
        };
        info!(
            "search finished with status {:?}, objective {:.4}",
            status, best.objective
        );

        Ok(SolveResult {
            status,
            objective_value: best.objective,
            assignments: best.assignments,
            shortage_by_shift: best.shortfall,
        })
    }
}

impl Default for BranchAndBoundSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Solves with default options.
///
/// # Example
///
/// ```
/// use shift_solver::demo_data::minimal_problem;
/// use shift_solver::solver::solve;
///
/// let result = solve(&minimal_problem().unwrap()).unwrap();
/// assert_eq!(result.total_shortage(), 0);
/// ```
pub fn solve(problem: &SchedulingProblem) -> Result<SolveResult> {
    BranchAndBoundSolver::new().solve(problem)
}

/// Best complete solution found so far.
struct Incumbent {
    objective: f64,
    assignments: AssignmentsByWorker,
    shortfall: ShortfallByShift,
}

struct Search<'a> {
    problem: &'a SchedulingProblem,
    grid: &'a TimeGrid,
    /// Shifts in `(start, id)` order; one decided per recursion depth.
    shifts: Vec<&'a ShiftDemand>,
    /// Eligible workers per sorted shift, in problem-declared order.
    eligible: Vec<Vec<&'a Worker>>,
    assignments: AssignmentsByWorker,
    shortfall: ShortfallByShift,
    best: Option<Incumbent>,
    deadline: Option<Instant>,
    deadline_hit: bool,
    nodes: u64,
}

impl<'a> Search<'a> {
    fn beats_incumbent(&self, objective: f64) -> bool {
        match &self.best {
            None => true,
            Some(best) => objective < best.objective,
        }
    }

    fn run(&mut self, shift_index: usize) -> Result<()> {
        self.nodes += 1;

        if let Some(deadline) = self.deadline {
            if self.best.is_some() && Instant::now() >= deadline {
                self.deadline_hit = true;
                return Ok(());
            }
        }

        if shift_index == self.shifts.len() {
            let objective = objective::total_objective(
                &self.assignments,
                &self.shortfall,
                self.problem,
                self.grid,
            )?;
            if self.beats_incumbent(objective) {
                debug!("new incumbent: objective {:.4}", objective);
                self.best = Some(Incumbent {
                    objective,
                    assignments: self.assignments.clone(),
                    shortfall: self.shortfall.clone(),
                });
            }
            return Ok(());
        }

        let shift = self.shifts[shift_index];
        let eligible = self.eligible[shift_index].clone();
        let max_assignable = eligible.len().min(shift.required_headcount.max(0) as usize);

        for count in (0..=max_assignable).rev() {
            for combo in eligible.iter().copied().combinations(count) {
                let mut feasible = true;
                for worker in &combo {
                    if !constraints::is_feasible(
                        worker,
                        &self.assignments,
                        self.problem,
                        self.grid,
                        shift,
                    )? {
                        feasible = false;
                        break;
                    }
                }
                if !feasible {
                    continue;
                }

                for worker in &combo {
                    self.assignments
                        .entry(worker.id.clone())
                        .or_default()
                        .push(shift.id.clone());
                }
                self.shortfall
                    .insert(shift.id.clone(), shift.required_headcount - count as i32);

                let partial = objective::total_objective(
                    &self.assignments,
                    &self.shortfall,
                    self.problem,
                    self.grid,
                )?;
                if self.beats_incumbent(partial) {
                    self.run(shift_index + 1)?;
                }

                // Rollback, even when the recursion replaced the incumbent.
                for worker in &combo {
                    if let Some(sequence) = self.assignments.get_mut(&worker.id) {
                        sequence.pop();
                    }
                }
                self.shortfall.insert(shift.id.clone(), 0);

                if self.deadline_hit {
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_data::minimal_problem;
    use crate::models::{ShiftDemand, Worker};
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    /// Enumerates every feasible complete assignment without pruning and
    /// returns the minimum objective. Cross-checks the search's
    /// optimality claim on small instances.
    fn brute_force_minimum(problem: &SchedulingProblem) -> f64 {
        fn recurse(
            problem: &SchedulingProblem,
            grid: &TimeGrid,
            shifts: &[&ShiftDemand],
            index: usize,
            assignments: &mut AssignmentsByWorker,
            shortfall: &mut ShortfallByShift,
            best: &mut f64,
        ) {
            if index == shifts.len() {
                let objective =
                    objective::total_objective(assignments, shortfall, problem, grid).unwrap();
                if objective < *best {
                    *best = objective;
                }
                return;
            }
            let shift = shifts[index];
            let eligible = constraints::eligible_workers(problem, shift);
            let limit = eligible.len().min(shift.required_headcount.max(0) as usize);
            for count in 0..=limit {
                for combo in eligible.iter().copied().combinations(count) {
                    if !combo.iter().all(|w| {
                        constraints::is_feasible(w, assignments, problem, grid, shift).unwrap()
                    }) {
                        continue;
                    }
                    for worker in &combo {
                        assignments
                            .entry(worker.id.clone())
                            .or_default()
                            .push(shift.id.clone());
                    }
                    shortfall.insert(shift.id.clone(), shift.required_headcount - count as i32);
                    recurse(problem, grid, shifts, index + 1, assignments, shortfall, best);
                    for worker in &combo {
                        assignments.get_mut(&worker.id).unwrap().pop();
                    }
                    shortfall.insert(shift.id.clone(), 0);
                }
            }
        }

        let grid = TimeGrid::from_problem(problem).unwrap();
        let shifts: Vec<&ShiftDemand> = problem.shifts.iter().collect();
        let mut assignments: AssignmentsByWorker = problem
            .workers
            .iter()
            .map(|w| (w.id.clone(), Vec::new()))
            .collect();
        let mut shortfall: ShortfallByShift =
            problem.shifts.iter().map(|s| (s.id.clone(), 0)).collect();
        let mut best = f64::INFINITY;
        recurse(
            problem,
            &grid,
            &shifts,
            0,
            &mut assignments,
            &mut shortfall,
            &mut best,
        );
        best
    }

    #[test]
    fn test_demo_problem_fully_covered() {
        let problem = minimal_problem().unwrap();
        let result = solve(&problem).unwrap();

        assert_eq!(result.status, SolveStatus::Optimal);
        assert!(result.is_fully_staffed());
        // Alice is the only worker carrying "back".
        assert!(result.assignments["alice"].contains(&"shift_2".to_string()));
        let pairs = result.assigned_pairs();
        assert!(pairs.iter().any(|(_, shift)| shift == "shift_1"));
        // Cheapest full cover: bob on shift_1 (48.0), alice on shift_2 (60.0).
        assert!((result.objective_value - 108.0).abs() < 1e-9);
        assert_eq!(result.assignments["bob"], vec!["shift_1".to_string()]);
    }

    #[test]
    fn test_hour_cap_forces_shortage() {
        let workers = vec![Worker::new("w1", "W", ["front"], 4.0, 10.0).unwrap()];
        let shifts = vec![
            ShiftDemand::new("s1", dt(9), dt(13), "front", 1).unwrap(),
            ShiftDemand::new("s2", dt(13), dt(17), "front", 1).unwrap(),
        ];
        let problem = SchedulingProblem::new(workers, shifts);

        let result = solve(&problem).unwrap();
        // Both shifts fit time-wise, but the 4-hour cap allows only one.
        assert_eq!(result.total_shortage(), 1);
        assert_eq!(result.assignments["w1"].len(), 1);
        assert_eq!(result.shortage_by_shift["s1"], 0);
        assert_eq!(result.shortage_by_shift["s2"], 1);
        assert!((result.objective_value - (4.0 * 10.0 + 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_overlapping_shifts_force_shortage() {
        let workers = vec![Worker::new("w1", "W", ["front"], 40.0, 10.0).unwrap()];
        let shifts = vec![
            ShiftDemand::new("s1", dt(9), dt(13), "front", 1).unwrap(),
            ShiftDemand::new("s2", dt(9), dt(13), "front", 1).unwrap(),
        ];
        let problem = SchedulingProblem::new(workers, shifts);

        let result = solve(&problem).unwrap();
        // Identical time windows: the one worker takes at most one shift.
        assert_eq!(result.assignments["w1"].len(), 1);
        assert_eq!(result.total_shortage(), 1);
    }

    #[test]
    fn test_unvalidated_problem_rejected_before_search() {
        let mut problem = minimal_problem().unwrap();
        problem.shifts[0].required_headcount = -1;
        assert!(matches!(
            solve(&problem),
            Err(SolverError::InvalidShift { .. })
        ));
    }

    #[test]
    fn test_no_eligible_workers_yields_full_shortage() {
        let workers = vec![Worker::new("w1", "W", ["front"], 40.0, 10.0).unwrap()];
        let shifts =
            vec![ShiftDemand::new("s1", dt(9), dt(13), "forklift", 2).unwrap()];
        let problem = SchedulingProblem::new(workers, shifts);

        // The empty subset keeps every shift decidable.
        let result = solve(&problem).unwrap();
        assert_eq!(result.status, SolveStatus::Optimal);
        assert_eq!(result.shortage_by_shift["s1"], 2);
        assert!(result.assignments["w1"].is_empty());
        assert!((result.objective_value - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_headcount_above_eligible_pool() {
        let workers = vec![
            Worker::new("w1", "W1", ["front"], 40.0, 10.0).unwrap(),
            Worker::new("w2", "W2", ["back"], 40.0, 10.0).unwrap(),
        ];
        let shifts = vec![ShiftDemand::new("s1", dt(9), dt(13), "front", 3).unwrap()];
        let problem = SchedulingProblem::new(workers, shifts);

        let result = solve(&problem).unwrap();
        assert_eq!(result.assignments["w1"], vec!["s1".to_string()]);
        assert_eq!(result.shortage_by_shift["s1"], 2);
    }

    #[test]
    fn test_zero_headcount_shift_needs_nobody() {
        let workers = vec![Worker::new("w1", "W", ["front"], 40.0, 10.0).unwrap()];
        let shifts = vec![ShiftDemand::new("s1", dt(9), dt(13), "front", 0).unwrap()];
        let problem = SchedulingProblem::new(workers, shifts);

        let result = solve(&problem).unwrap();
        assert_eq!(result.total_shortage(), 0);
        assert!(result.assignments["w1"].is_empty());
        assert_eq!(result.objective_value, 0.0);
    }

    #[test]
    fn test_shortfall_covers_every_shift() {
        let problem = minimal_problem().unwrap();
        let result = solve(&problem).unwrap();
        let mut expected: Vec<&str> = problem.shifts.iter().map(|s| s.id.as_str()).collect();
        expected.sort_unstable();
        let got: Vec<&str> = result.shortage_by_shift.keys().map(|s| s.as_str()).collect();
        assert_eq!(got, expected);
        assert!(result.shortage_by_shift.values().all(|&v| v >= 0));
    }

    #[test]
    fn test_solver_is_deterministic() {
        let problem = minimal_problem().unwrap();
        let first = solve(&problem).unwrap();
        let second = solve(&problem).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_equal_cost_tie_keeps_first_worker() {
        // Strict `<` never lets an equal-cost later subset displace the
        // incumbent, so the first-declared worker wins the tie.
        let workers = vec![
            Worker::new("w1", "W1", ["front"], 40.0, 10.0).unwrap(),
            Worker::new("w2", "W2", ["front"], 40.0, 10.0).unwrap(),
        ];
        let shifts = vec![ShiftDemand::new("s1", dt(9), dt(13), "front", 1).unwrap()];
        let problem = SchedulingProblem::new(workers, shifts);

        let result = solve(&problem).unwrap();
        assert_eq!(result.assignments["w1"], vec!["s1".to_string()]);
        assert!(result.assignments["w2"].is_empty());
    }

    #[test]
    fn test_result_respects_caps_and_overlaps() {
        let workers = vec![
            Worker::new("w1", "W1", ["front", "back"], 8.0, 14.0).unwrap(),
            Worker::new("w2", "W2", ["front"], 12.0, 9.0).unwrap(),
            Worker::new("w3", "W3", ["back"], 4.0, 11.0).unwrap(),
        ];
        let shifts = vec![
            ShiftDemand::new("s1", dt(8), dt(12), "front", 2).unwrap(),
            ShiftDemand::new("s2", dt(10), dt(14), "back", 1).unwrap(),
            ShiftDemand::new("s3", dt(12), dt(16), "front", 1).unwrap(),
            ShiftDemand::new("s4", dt(14), dt(18), "back", 1).unwrap(),
        ];
        let problem = SchedulingProblem::new(workers, shifts);
        let grid = TimeGrid::from_problem(&problem).unwrap();

        let result = solve(&problem).unwrap();
        assert!(constraints::max_hours_respected(&result.assignments, &problem, &grid).unwrap());
        assert!(constraints::no_overlaps(&result.assignments, &problem).unwrap());
    }

    #[test]
    fn test_optimality_matches_brute_force() {
        let workers = vec![
            Worker::new("w1", "W1", ["front", "back"], 12.0, 14.0).unwrap(),
            Worker::new("w2", "W2", ["front"], 8.0, 9.0).unwrap(),
            Worker::new("w3", "W3", ["back"], 4.0, 11.0).unwrap(),
        ];
        let shifts = vec![
            ShiftDemand::new("s1", dt(8), dt(12), "front", 2).unwrap(),
            ShiftDemand::new("s2", dt(10), dt(14), "back", 1)
                .unwrap()
                .with_weight(3.0)
                .unwrap(),
            ShiftDemand::new("s3", dt(12), dt(16), "front", 1).unwrap(),
        ];
        let problem = SchedulingProblem::new(workers, shifts).with_shortage_penalty(50.0);

        let result = solve(&problem).unwrap();
        let expected = brute_force_minimum(&problem);
        assert!(
            (result.objective_value - expected).abs() < 1e-9,
            "search found {}, brute force found {}",
            result.objective_value,
            expected
        );
    }

    #[test]
    fn test_time_limit_reports_feasible() {
        let problem = minimal_problem().unwrap();
        let result = BranchAndBoundSolver::new()
            .with_time_limit(Duration::ZERO)
            .solve(&problem)
            .unwrap();

        // An expired limit still yields the first complete assignment.
        assert_eq!(result.status, SolveStatus::Feasible);
        assert_eq!(result.shortage_by_shift.len(), problem.shifts.len());
        assert!(result.is_fully_staffed());
        // First descent staffs greedily in declared order: alice takes
        // both shifts at 15.0/h over 8 hours.
        assert!((result.objective_value - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_without_limit_beats_first_descent() {
        let problem = minimal_problem().unwrap();
        let bounded = BranchAndBoundSolver::new()
            .with_time_limit(Duration::ZERO)
            .solve(&problem)
            .unwrap();
        let optimal = solve(&problem).unwrap();
        assert!(optimal.objective_value <= bounded.objective_value);
    }
}
