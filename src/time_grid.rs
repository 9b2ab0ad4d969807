//! Discretization of the scheduling horizon into fixed-width slots.
//!
//! The grid is a pure function of the problem: horizon start is the
//! earliest shift start, horizon end the latest shift end, slot width
//! the configured granularity. It can be rebuilt freely; there is no
//! shared mutable state.

use chrono::{Duration, NaiveDateTime};

use crate::error::{Result, SolverError};
use crate::models::{SchedulingProblem, ShiftDemand};

/// Maps timestamps onto a fixed-width slot grid over the horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    /// Horizon start (earliest shift start).
    pub start: NaiveDateTime,
    /// Horizon end (latest shift end).
    pub end: NaiveDateTime,
    /// Slot width in minutes.
    pub slot_minutes: i64,
}

impl TimeGrid {
    /// Derives a grid from a shift collection.
    ///
    /// Fails with [`SolverError::InvalidProblem`] on an empty collection
    /// or non-positive granularity.
    pub fn from_shifts(shifts: &[ShiftDemand], slot_minutes: i64) -> Result<Self> {
        if slot_minutes <= 0 {
            return Err(SolverError::InvalidProblem(
                "slot_minutes must be greater than zero".into(),
            ));
        }
        let start = shifts.iter().map(|s| s.start).min().ok_or_else(|| {
            SolverError::InvalidProblem("at least one shift is required to build a time grid".into())
        })?;
        let end = shifts.iter().map(|s| s.end).max().ok_or_else(|| {
            SolverError::InvalidProblem("at least one shift is required to build a time grid".into())
        })?;
        Ok(Self {
            start,
            end,
            slot_minutes,
        })
    }

    /// Derives a grid from a problem's shifts and slot granularity.
    pub fn from_problem(problem: &SchedulingProblem) -> Result<Self> {
        Self::from_shifts(&problem.shifts, problem.slot_minutes)
    }

    /// Slot width as a [`Duration`].
    pub fn slot_width(&self) -> Duration {
        Duration::minutes(self.slot_minutes)
    }

    /// Index of the slot starting at `timestamp`.
    ///
    /// Fails with [`SolverError::OutOfHorizon`] when the timestamp
    /// precedes the horizon start or follows its end, and with
    /// [`SolverError::MisalignedTimestamp`] when the offset from the
    /// horizon start is not an exact multiple of the slot width.
    pub fn slot_index(&self, timestamp: NaiveDateTime) -> Result<usize> {
        if timestamp < self.start || timestamp > self.end {
            return Err(SolverError::OutOfHorizon { timestamp });
        }
        let offset = timestamp - self.start;
        let seconds = offset.num_seconds();
        let slot_seconds = self.slot_minutes * 60;
        if offset != Duration::seconds(seconds) || seconds % slot_seconds != 0 {
            return Err(SolverError::MisalignedTimestamp {
                timestamp,
                slot_minutes: self.slot_minutes,
            });
        }
        Ok((seconds / slot_seconds) as usize)
    }

    /// Hours between two grid-aligned timestamps.
    ///
    /// Both endpoints resolve through [`TimeGrid::slot_index`], so their
    /// failures propagate unchanged.
    pub fn duration_hours(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<f64> {
        let start_idx = self.slot_index(start)?;
        let end_idx = self.slot_index(end)?;
        if end_idx <= start_idx {
            return Err(SolverError::InvalidProblem(
                "time range end must occur after start".into(),
            ));
        }
        Ok((end_idx - start_idx) as f64 * self.slot_minutes as f64 / 60.0)
    }

    /// Hours covered by a shift.
    pub fn shift_duration_hours(&self, shift: &ShiftDemand) -> Result<f64> {
        self.duration_hours(shift.start, shift.end)
    }

    /// Total slot count over the horizon.
    ///
    /// Fails with [`SolverError::MisalignedTimestamp`] when the horizon
    /// length is not a whole number of slots.
    pub fn slot_count(&self) -> Result<usize> {
        let span = self.end - self.start;
        let seconds = span.num_seconds();
        let slot_seconds = self.slot_minutes * 60;
        if span != Duration::seconds(seconds) || seconds % slot_seconds != 0 {
            return Err(SolverError::MisalignedTimestamp {
                timestamp: self.end,
                slot_minutes: self.slot_minutes,
            });
        }
        Ok((seconds / slot_seconds) as usize)
    }
}
