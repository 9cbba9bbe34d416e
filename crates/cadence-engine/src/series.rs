//! Series generation: repeated next-occurrence calculation where each
//! occurrence becomes the reference point of the next.
//!
//! Errors are sticky. Once a slot fails, every later slot carries the same
//! error and nothing further is computed.

use chrono::NaiveDateTime;

use crate::error::ScheduleError;
use crate::occurrence::{OccurrencePlan, Outcome};
use crate::schedule::Schedule;
use crate::validator;

/// Search state threaded from one slot to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Next slot is the first occurrence strictly after this timestamp.
    At(NaiveDateTime),
    /// Every remaining slot is this error.
    Halted(ScheduleError),
}

/// Compute `count` consecutive outcomes of `schedule` after `reference`.
///
/// The result always has exactly `count` entries. A definition that fails
/// validation yields `count` copies of that error.
///
/// # Example
/// ```
/// use cadence_engine::{series, MonthlyDayOnce, Schedule, ScheduleCommon, ScheduleError};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let schedule: Schedule = MonthlyDayOnce {
///     common: ScheduleCommon::new(date(2020, 1, 1), 2).with_end_date(date(2020, 10, 1)),
///     monthly_day: 4,
///     execution_time: NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
/// }
/// .into();
///
/// let reference = date(2020, 5, 4).and_hms_opt(1, 0, 0).unwrap();
/// let outcomes = series(&schedule, reference, 4);
/// assert_eq!(outcomes[0], Ok(date(2020, 5, 4).and_hms_opt(2, 0, 0).unwrap()));
/// assert_eq!(outcomes[3], Err(ScheduleError::PastEndDate));
/// ```
pub fn series(schedule: &Schedule, reference: NaiveDateTime, count: usize) -> Vec<Outcome> {
    Series::new(schedule, reference).take(count).collect()
}

/// The unbounded sequence of outcomes of a schedule after a reference point.
///
/// Validation happens once, in [`Series::new`]. The iterator never ends; an
/// error is repeated forever once reached, so bound it with `take`.
#[derive(Debug, Clone)]
pub struct Series<'a> {
    state: State<'a>,
}

#[derive(Debug, Clone)]
enum State<'a> {
    Running {
        plan: OccurrencePlan<'a>,
        reference: NaiveDateTime,
    },
    Halted(ScheduleError),
}

impl<'a> Series<'a> {
    pub fn new(schedule: &'a Schedule, reference: NaiveDateTime) -> Self {
        let checked = match validator::validate(schedule, reference) {
            Some(err) => Err(err),
            None => OccurrencePlan::compile(schedule),
        };
        let state = match checked {
            Ok(plan) => State::Running { plan, reference },
            Err(err) => {
                tracing::debug!(
                    schedule = %schedule.name(),
                    %reference,
                    error = %err,
                    "schedule rejected"
                );
                State::Halted(err)
            }
        };
        Self { state }
    }

    pub fn cursor(&self) -> Cursor {
        match &self.state {
            State::Running { reference, .. } => Cursor::At(*reference),
            State::Halted(err) => Cursor::Halted(*err),
        }
    }
}

impl Iterator for Series<'_> {
    type Item = Outcome;

    fn next(&mut self) -> Option<Outcome> {
        let outcome = match &mut self.state {
            State::Halted(err) => return Some(Err(*err)),
            State::Running { plan, reference } => {
                let outcome = plan.next_after(*reference);
                if let Ok(occurrence) = outcome {
                    *reference = occurrence;
                }
                outcome
            }
        };
        if let Err(err) = outcome {
            tracing::debug!(error = %err, "series halted");
            self.state = State::Halted(err);
        }
        Some(outcome)
    }
}
