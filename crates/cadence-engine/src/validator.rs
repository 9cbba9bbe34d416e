//! Schedule validation.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. start date not after end date
//! 2. schedule enabled
//! 3. day (or day position) resolvable
//! 4. month step positive
//! 5. time window non-empty (recurring variants only)
//! 6. reference date not after end date

use chrono::NaiveDateTime;

use crate::error::ScheduleError;
use crate::schedule::Schedule;

/// Run every check against `schedule` as seen from `reference`.
///
/// Returns the first failing check, or `None` when the schedule can produce
/// occurrences from `reference` on.
pub fn validate(schedule: &Schedule, reference: NaiveDateTime) -> Option<ScheduleError> {
    validate_definition(schedule).or_else(|| check_reference(schedule, reference))
}

/// Checks 1 to 5, which only look at the definition itself.
pub fn validate_definition(schedule: &Schedule) -> Option<ScheduleError> {
    let common = schedule.common();

    if common
        .end_date
        .is_some_and(|end_date| common.start_date > end_date)
    {
        return Some(ScheduleError::StartAfterEnd);
    }
    if !common.is_enabled {
        return Some(ScheduleError::Cancelled);
    }
    if !schedule.day_rule().is_valid() {
        return Some(ScheduleError::InvalidMonthDate);
    }
    if common.every_after_months < 1 {
        return Some(ScheduleError::NonPositiveMonths);
    }
    if schedule
        .time_window()
        .is_some_and(|(starting_time, ending_time)| starting_time >= ending_time)
    {
        return Some(ScheduleError::InvalidTimeWindow);
    }
    None
}

fn check_reference(schedule: &Schedule, reference: NaiveDateTime) -> Option<ScheduleError> {
    schedule
        .common()
        .end_date
        .filter(|&end_date| reference.date() > end_date)
        .map(|_| ScheduleError::PastEndDate)
}
