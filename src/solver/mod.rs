//! Exhaustive search and result metrics.
//!
//! Provides the branch-and-bound assignment search and schedule
//! quality indicators for its results.
//!
//! # Algorithm
//!
//! [`BranchAndBoundSolver`] explores worker subsets per shift in a
//! fixed deterministic order, pruning with the partial objective as an
//! admissible lower bound. "Optimal" means optimal with respect to
//! exhaustive search over this exact model; the search is exponential
//! by construction and intended for small-to-moderate instances.
//!
//! # Reference
//!
//! - Land & Doig (1960), "An Automatic Method of Solving Discrete
//!   Programming Problems"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

mod branch_bound;
mod kpi;

pub use branch_bound::{solve, BranchAndBoundSolver};
pub use kpi::ScheduleKpi;
