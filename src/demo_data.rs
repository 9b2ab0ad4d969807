//! Shared demo problem used by documentation, tests, and the CLI.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Result, SolverError};
use crate::models::{SchedulingProblem, ShiftDemand, Worker};

fn timestamp(year: i32, month: u32, day: u32, hour: u32) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .ok_or_else(|| {
            SolverError::InvalidProblem(format!(
                "invalid demo timestamp {year}-{month:02}-{day:02} {hour:02}:00"
            ))
        })
}

/// A small validated problem: two workers, two back-to-back four-hour
/// shifts on one day.
///
/// Alice (front + back, 20h cap, 15.0/h) and Bob (front only, 15h cap,
/// 12.0/h) against a morning "front" shift and an afternoon "back"
/// shift, each demanding one worker.
pub fn minimal_problem() -> Result<SchedulingProblem> {
    let workers = vec![
        Worker::new("alice", "Alice", ["front", "back"], 20.0, 15.0)?,
        Worker::new("bob", "Bob", ["front"], 15.0, 12.0)?,
    ];
    let shifts = vec![
        ShiftDemand::new(
            "shift_1",
            timestamp(2024, 1, 1, 9)?,
            timestamp(2024, 1, 1, 13)?,
            "front",
            1,
        )?,
        ShiftDemand::new(
            "shift_2",
            timestamp(2024, 1, 1, 13)?,
            timestamp(2024, 1, 1, 17)?,
            "back",
            1,
        )?
        .with_weight(2.0)?,
    ];

    let problem = SchedulingProblem::new(workers, shifts).with_slot_minutes(60);
    problem.validate()?;
    Ok(problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_problem_is_valid() {
        let problem = minimal_problem().unwrap();
        assert_eq!(problem.workers.len(), 2);
        assert_eq!(problem.shifts.len(), 2);
        assert!(problem.validate().is_ok());
        assert!((problem.shifts[1].weight - 2.0).abs() < 1e-10);
    }
}
