//! Next-occurrence calculation.
//!
//! A schedule is first compiled into an [`OccurrencePlan`] (month cycle, day
//! rule, daily slots), which then answers "what is the first occurrence
//! strictly after this timestamp" for any reference. The same plan serves
//! every step of a series.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::cycle::{MonthCycle, YearMonth};
use crate::day::DayRule;
use crate::error::{Result, ScheduleError};
use crate::schedule::Schedule;
use crate::stepper::{Step, StepResult, TimeWindow};
use crate::validator;

/// The result of one requested slot: an occurrence or the reason there is none.
pub type Outcome = std::result::Result<NaiveDateTime, ScheduleError>;

/// Compute the first occurrence of `schedule` strictly after `reference`.
///
/// Runs the full validation first, so this is safe to call on any definition.
pub fn next_occurrence(schedule: &Schedule, reference: NaiveDateTime) -> Outcome {
    if let Some(err) = validator::validate(schedule, reference) {
        return Err(err);
    }
    OccurrencePlan::compile(schedule)?.next_after(reference)
}

/// Times of day at which an active day produces occurrences.
#[derive(Debug, Clone, Copy)]
enum DailySlots {
    Once(NaiveTime),
    Stepped { window: TimeWindow, step: Step },
}

impl DailySlots {
    fn of(schedule: &Schedule) -> Result<Self> {
        Ok(match schedule {
            Schedule::MonthlyDayOnce(s) => DailySlots::Once(s.execution_time),
            Schedule::MonthlyDayRecurring(s) => DailySlots::Stepped {
                window: TimeWindow::new(s.starting_time, s.ending_time)?,
                step: Step::new(s.every_after, s.interval_unit),
            },
            Schedule::MonthlyPeriodRecurring(s) => DailySlots::Stepped {
                window: TimeWindow::new(s.starting_time, s.ending_time)?,
                step: Step::new(s.every_after, s.interval_unit),
            },
        })
    }

    fn first(&self) -> NaiveTime {
        match self {
            DailySlots::Once(time) => *time,
            DailySlots::Stepped { window, .. } => window.start(),
        }
    }

    /// First slot strictly after `time` on the same day.
    fn after(&self, time: NaiveTime) -> Option<NaiveTime> {
        match self {
            DailySlots::Once(execution_time) => (time < *execution_time).then_some(*execution_time),
            DailySlots::Stepped { window, step } => match window.step(time, *step) {
                StepResult::UseStart => Some(window.start()),
                StepResult::Advance(next) => Some(next),
                StepResult::RollOver => None,
            },
        }
    }
}

/// A schedule reduced to the pieces the calculation needs.
#[derive(Debug, Clone)]
pub struct OccurrencePlan<'a> {
    name: &'a str,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    cycle: MonthCycle,
    day_rule: DayRule,
    slots: DailySlots,
}

impl<'a> OccurrencePlan<'a> {
    /// # Errors
    /// Fails with the configuration error of the first piece that cannot be
    /// built: day rule, month cycle, then time window. Bounds and the enabled
    /// flag are not checked here; see [`validator::validate`].
    pub fn compile(schedule: &'a Schedule) -> Result<Self> {
        let common = schedule.common();
        let day_rule = schedule.day_rule();
        if !day_rule.is_valid() {
            return Err(ScheduleError::InvalidMonthDate);
        }
        Ok(Self {
            name: &common.name,
            start_date: common.start_date,
            end_date: common.end_date,
            cycle: MonthCycle::new(common.start_date, common.every_after_months)?,
            day_rule,
            slots: DailySlots::of(schedule)?,
        })
    }

    /// First occurrence strictly after `reference`, and never before the
    /// start date.
    ///
    /// # Errors
    /// [`ScheduleError::PastEndDate`] when that occurrence falls after the end
    /// date (or beyond the representable calendar).
    pub fn next_after(&self, reference: NaiveDateTime) -> Outcome {
        let (origin_date, origin_time) = if reference.date() < self.start_date {
            (self.start_date, None)
        } else {
            (reference.date(), Some(reference.time()))
        };

        let mut month = self
            .cycle
            .next_on_or_after(YearMonth::of(origin_date))
            .ok_or(ScheduleError::PastEndDate)?;

        // Terminates: every cycle month resolves a day, each iteration moves
        // to a later month, and the cycle yields no month past the end of the
        // representable calendar.
        let occurrence = loop {
            if let Some(date) = self.day_rule.resolve(month).and_then(|day| month.date(day)) {
                let slot = match date.cmp(&origin_date) {
                    Ordering::Greater => Some(self.slots.first()),
                    Ordering::Equal => match origin_time {
                        Some(time) => self.slots.after(time),
                        None => Some(self.slots.first()),
                    },
                    Ordering::Less => None,
                };
                if let Some(time) = slot {
                    break date.and_time(time);
                }
            }
            month = self
                .cycle
                .next_after(month)
                .ok_or(ScheduleError::PastEndDate)?;
        };

        if self.end_date.is_some_and(|end_date| occurrence.date() > end_date) {
            tracing::trace!(
                schedule = %self.name,
                %reference,
                %occurrence,
                "next occurrence falls after end date"
            );
            return Err(ScheduleError::PastEndDate);
        }

        tracing::trace!(schedule = %self.name, %reference, %occurrence, "computed next occurrence");
        Ok(occurrence)
    }
}
