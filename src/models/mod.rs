//! Scheduling domain models.
//!
//! Core data types for shift scheduling problems and their solutions.
//! Records are immutable after validated construction; the aggregate
//! problem is re-validated once before every search.
//!
//! | Type | Role |
//! |------|------|
//! | [`Worker`] | person with skills, hour cap, hourly cost |
//! | [`ShiftDemand`] | time-bounded demand for N skilled workers |
//! | [`SchedulingProblem`] | workers + shifts + solver options |
//! | [`SolveResult`] | status, objective, assignments, shortage |

mod problem;
mod shift;
mod solution;
mod worker;

pub use problem::SchedulingProblem;
pub use shift::ShiftDemand;
pub use solution::{SolveResult, SolveStatus};
pub use worker::Worker;
