//! Declarative definitions of the monthly schedule variants.
//!
//! Definitions are plain data. They deserialize from JSON documents tagged by
//! `kind`, e.g.
//!
//! ```json
//! {
//!   "kind": "monthly_day_once",
//!   "name": "backup",
//!   "is_enabled": true,
//!   "start_date": "2020-01-01",
//!   "end_date": "2020-10-01",
//!   "every_after_months": 2,
//!   "monthly_day": 4,
//!   "execution_time": "02:00:00"
//! }
//! ```
//!
//! Nothing here is validated on construction; see [`crate::validator`].

use std::num::NonZeroU32;

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::day::DayRule;

/// Fields shared by every schedule variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCommon {
    /// Opaque label. Has no effect on computation.
    #[serde(default)]
    pub name: String,
    pub is_enabled: bool,
    /// Anchor of the month cycle. No occurrence precedes this date.
    pub start_date: NaiveDate,
    /// Last date on which an occurrence may fall. `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Month-cycle step. Must be at least 1.
    pub every_after_months: i32,
}

impl ScheduleCommon {
    /// An enabled, unnamed, unbounded definition.
    pub fn new(start_date: NaiveDate, every_after_months: i32) -> Self {
        Self {
            name: String::new(),
            is_enabled: true,
            start_date,
            end_date: None,
            every_after_months,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }
}

/// Unit of the intraday step of the recurring variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Hours,
    Minutes,
    Seconds,
}

impl IntervalUnit {
    /// Length of `amount` units.
    pub fn duration(self, amount: NonZeroU32) -> Duration {
        let amount = i64::from(amount.get());
        match self {
            IntervalUnit::Hours => Duration::hours(amount),
            IntervalUnit::Minutes => Duration::minutes(amount),
            IntervalUnit::Seconds => Duration::seconds(amount),
        }
    }
}

/// Which days of the month a positional schedule counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCategory {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    /// Saturday or Sunday.
    WeekendDay,
}

impl DayCategory {
    pub fn matches(self, weekday: Weekday) -> bool {
        match self {
            DayCategory::Monday => weekday == Weekday::Mon,
            DayCategory::Tuesday => weekday == Weekday::Tue,
            DayCategory::Wednesday => weekday == Weekday::Wed,
            DayCategory::Thursday => weekday == Weekday::Thu,
            DayCategory::Friday => weekday == Weekday::Fri,
            DayCategory::Saturday => weekday == Weekday::Sat,
            DayCategory::Sunday => weekday == Weekday::Sun,
            DayCategory::WeekendDay => matches!(weekday, Weekday::Sat | Weekday::Sun),
        }
    }
}

/// Ordinal selector among the matching days of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

/// One occurrence per active month, on a fixed day, at a fixed time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyDayOnce {
    #[serde(flatten)]
    pub common: ScheduleCommon,
    pub monthly_day: i32,
    pub execution_time: NaiveTime,
}

/// Stepped occurrences within a time window, on a fixed day of each active month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyDayRecurring {
    #[serde(flatten)]
    pub common: ScheduleCommon,
    pub monthly_day: i32,
    pub every_after: NonZeroU32,
    pub interval_unit: IntervalUnit,
    pub starting_time: NaiveTime,
    pub ending_time: NaiveTime,
}

/// Stepped occurrences within a time window, on the Nth (or last) matching
/// weekday of each active month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPeriodRecurring {
    #[serde(flatten)]
    pub common: ScheduleCommon,
    pub day_category: DayCategory,
    pub position: Position,
    pub every_after: NonZeroU32,
    pub interval_unit: IntervalUnit,
    pub starting_time: NaiveTime,
    pub ending_time: NaiveTime,
}

/// Any monthly-family schedule definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    MonthlyDayOnce(MonthlyDayOnce),
    MonthlyDayRecurring(MonthlyDayRecurring),
    MonthlyPeriodRecurring(MonthlyPeriodRecurring),
}

impl Schedule {
    pub fn common(&self) -> &ScheduleCommon {
        match self {
            Schedule::MonthlyDayOnce(s) => &s.common,
            Schedule::MonthlyDayRecurring(s) => &s.common,
            Schedule::MonthlyPeriodRecurring(s) => &s.common,
        }
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }

    /// How the target day of an active month is chosen.
    pub fn day_rule(&self) -> DayRule {
        match self {
            Schedule::MonthlyDayOnce(s) => DayRule::Fixed(s.monthly_day),
            Schedule::MonthlyDayRecurring(s) => DayRule::Fixed(s.monthly_day),
            Schedule::MonthlyPeriodRecurring(s) => DayRule::Positional {
                category: s.day_category,
                position: s.position,
            },
        }
    }

    /// The `(starting_time, ending_time)` window of the recurring variants.
    pub fn time_window(&self) -> Option<(NaiveTime, NaiveTime)> {
        match self {
            Schedule::MonthlyDayOnce(_) => None,
            Schedule::MonthlyDayRecurring(s) => Some((s.starting_time, s.ending_time)),
            Schedule::MonthlyPeriodRecurring(s) => Some((s.starting_time, s.ending_time)),
        }
    }
}

impl From<MonthlyDayOnce> for Schedule {
    fn from(s: MonthlyDayOnce) -> Self {
        Schedule::MonthlyDayOnce(s)
    }
}

impl From<MonthlyDayRecurring> for Schedule {
    fn from(s: MonthlyDayRecurring) -> Self {
        Schedule::MonthlyDayRecurring(s)
    }
}

impl From<MonthlyPeriodRecurring> for Schedule {
    fn from(s: MonthlyPeriodRecurring) -> Self {
        Schedule::MonthlyPeriodRecurring(s)
    }
}
