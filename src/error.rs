//! Error taxonomy for scheduling and solving.
//!
//! Validation failures (`InvalidWorker`, `InvalidShift`, `InvalidProblem`)
//! are raised before the search starts, never during it. Time-indexing
//! failures (`OutOfHorizon`, `MisalignedTimestamp`) surface immediately and
//! are not retried. `NoFeasibleAssignment` terminates a search with no
//! recovery. Every failure is fatal to the current solve attempt; there is
//! no partial-success contract.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SolverError>;

/// All failure modes of problem construction, time indexing, and search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// A worker record violates a structural invariant.
    #[error("invalid worker '{id}': {reason}")]
    InvalidWorker { id: String, reason: String },

    /// A shift demand record violates a structural invariant.
    #[error("invalid shift '{id}': {reason}")]
    InvalidShift { id: String, reason: String },

    /// The aggregate problem violates a structural rule.
    #[error("invalid problem: {0}")]
    InvalidProblem(String),

    /// A timestamp falls outside the scheduling horizon.
    #[error("timestamp {timestamp} is outside the scheduling horizon")]
    OutOfHorizon { timestamp: NaiveDateTime },

    /// A timestamp does not land on a slot boundary.
    #[error("timestamp {timestamp} does not align with the {slot_minutes}-minute slot grid")]
    MisalignedTimestamp {
        timestamp: NaiveDateTime,
        slot_minutes: i64,
    },

    /// The search never reached a complete assignment.
    #[error("no feasible assignment found")]
    NoFeasibleAssignment,
}

impl SolverError {
    pub(crate) fn invalid_worker(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidWorker {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_shift(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidShift {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_error_messages() {
        let err = SolverError::invalid_worker("w1", "max_hours_per_week must be non-negative");
        assert_eq!(
            err.to_string(),
            "invalid worker 'w1': max_hours_per_week must be non-negative"
        );

        let err = SolverError::InvalidProblem("at least one shift is required".into());
        assert_eq!(err.to_string(), "invalid problem: at least one shift is required");

        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let err = SolverError::MisalignedTimestamp {
            timestamp: ts,
            slot_minutes: 60,
        };
        assert!(err.to_string().contains("60-minute slot grid"));
    }
}
