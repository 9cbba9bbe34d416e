//! Error types for cadence-engine operations.
//!
//! The rendered text of every variant is part of the external contract:
//! schedulers downstream compare these messages byte for byte, so the
//! `#[error]` strings must not change.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Every way a schedule can fail to yield an occurrence.
///
/// Configuration errors (`StartAfterEnd`, `InvalidMonthDate`,
/// `NonPositiveMonths`, `InvalidTimeWindow`) do not depend on the reference
/// timestamp. `Cancelled` and `PastEndDate` are runtime errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleError {
    #[error("Start date can't be later than end date")]
    StartAfterEnd,

    #[error("Schedule was cancelled!")]
    Cancelled,

    #[error("Invalid month date!")]
    InvalidMonthDate,

    #[error("Number of months can't be non positive!")]
    NonPositiveMonths,

    #[error("Starting time can't be later than or equal to ending time")]
    InvalidTimeWindow,

    #[error("Current date is past end date!")]
    PastEndDate,
}

impl ScheduleError {
    /// Whether this error is independent of the reference timestamp.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ScheduleError::StartAfterEnd
                | ScheduleError::InvalidMonthDate
                | ScheduleError::NonPositiveMonths
                | ScheduleError::InvalidTimeWindow
        )
    }
}

impl Serialize for ScheduleError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
