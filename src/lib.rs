//! Workforce shift scheduling via exhaustive branch-and-bound search.
//!
//! Assigns workers to time-bounded shift demands under skill,
//! hour-cap, and non-overlap constraints, minimizing labor cost plus
//! weighted shortage penalties.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Worker`, `ShiftDemand`,
//!   `SchedulingProblem`, `SolveResult`
//! - **`validation`**: Structural checks run once before search
//! - **`time_grid`**: Slot discretization of the scheduling horizon
//! - **`constraints`**: Eligibility, shortage, hour-cap, and overlap
//!   queries
//! - **`objective`**: Labor cost + shortage penalty terms
//! - **`solver`**: The branch-and-bound search and KPI metrics
//! - **`report`**: JSON/text rendering of results
//! - **`demo_data`**: Shared example problem
//!
//! # Example
//!
//! ```
//! use shift_solver::demo_data::minimal_problem;
//! use shift_solver::solver::solve;
//!
//! let problem = minimal_problem().unwrap();
//! let result = solve(&problem).unwrap();
//! assert!(result.is_fully_staffed());
//! ```
//!
//! # References
//!
//! - Land & Doig (1960), "An Automatic Method of Solving Discrete
//!   Programming Problems"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod constraints;
pub mod demo_data;
pub mod error;
pub mod models;
pub mod objective;
pub mod report;
pub mod solver;
pub mod time_grid;
pub mod validation;

pub use error::{Result, SolverError};
pub use models::{SchedulingProblem, ShiftDemand, SolveResult, SolveStatus, Worker};
pub use solver::{solve, BranchAndBoundSolver};
pub use time_grid::TimeGrid;
