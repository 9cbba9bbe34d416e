//! Intraday stepping inside a `[start, end]` time-of-day window.
//!
//! Kept free of calendar arithmetic: the caller decides which day a time
//! belongs to, this module only decides where in the window a time falls.

use std::num::NonZeroU32;

use chrono::{Duration, NaiveTime};

use crate::error::{Result, ScheduleError};
use crate::schedule::IntervalUnit;

/// Where the next slot lies relative to a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The time precedes the window; the next slot is the window start.
    UseStart,
    /// The next slot on the same day.
    Advance(NaiveTime),
    /// The window is exhausted for this day.
    RollOver,
}

/// A step of `amount` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub amount: NonZeroU32,
    pub unit: IntervalUnit,
}

impl Step {
    pub fn new(amount: NonZeroU32, unit: IntervalUnit) -> Self {
        Self { amount, unit }
    }

    pub fn duration(&self) -> Duration {
        self.unit.duration(self.amount)
    }
}

/// A non-empty time-of-day window, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// # Errors
    /// Returns [`ScheduleError::InvalidTimeWindow`] unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidTimeWindow);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Advance `current` by one step.
    ///
    /// Inside the window the result is `current + step`, capped at the window
    /// end. A step that would run past midnight is capped the same way.
    pub fn step(&self, current: NaiveTime, step: Step) -> StepResult {
        if current < self.start {
            return StepResult::UseStart;
        }
        if current >= self.end {
            return StepResult::RollOver;
        }
        let (next, wrapped) = current.overflowing_add_signed(step.duration());
        if wrapped != 0 || next > self.end {
            StepResult::Advance(self.end)
        } else {
            StepResult::Advance(next)
        }
    }
}
