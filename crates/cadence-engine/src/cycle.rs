//! Month-cycle resolution.
//!
//! A schedule is active in the months `start.month + k * every_after_months`
//! for `k >= 0`, rolling over into following years. Months are handled as a
//! linear index (`year * 12 + month - 1`) so the arithmetic never has to think
//! about year boundaries.

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, ScheduleError};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// `month` is 1-based. Returns `None` outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn days_in_month(self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// The date of `day` in this month, if it exists in the calendar.
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        self.date(1)
    }

    /// The following month. `None` past the end of the representable calendar.
    pub fn succ(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    fn index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month - 1)
    }

    /// `None` for months outside chrono's representable calendar.
    fn from_index(index: i64) -> Option<Self> {
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
        let month = Self { year, month };
        month.first_day().map(|_| month)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// The set of active months of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCycle {
    anchor: YearMonth,
    step: i64,
}

impl MonthCycle {
    /// Build the cycle anchored at `start_date`'s month.
    ///
    /// # Errors
    /// Returns [`ScheduleError::NonPositiveMonths`] when `every_after_months < 1`.
    pub fn new(start_date: NaiveDate, every_after_months: i32) -> Result<Self> {
        if every_after_months < 1 {
            return Err(ScheduleError::NonPositiveMonths);
        }
        Ok(Self {
            anchor: YearMonth::of(start_date),
            step: i64::from(every_after_months),
        })
    }

    pub fn anchor(&self) -> YearMonth {
        self.anchor
    }

    pub fn contains(&self, month: YearMonth) -> bool {
        let offset = month.index() - self.anchor.index();
        offset >= 0 && offset % self.step == 0
    }

    /// Smallest active month `>= month`. `None` only past the end of the
    /// representable calendar.
    pub fn next_on_or_after(&self, month: YearMonth) -> Option<YearMonth> {
        let offset = month.index() - self.anchor.index();
        if offset <= 0 {
            return Some(self.anchor);
        }
        let cycles = (offset + self.step - 1) / self.step;
        YearMonth::from_index(self.anchor.index() + cycles * self.step)
    }

    /// Smallest active month `> month`.
    pub fn next_after(&self, month: YearMonth) -> Option<YearMonth> {
        self.next_on_or_after(month.succ()?)
    }
}
