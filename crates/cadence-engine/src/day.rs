//! Resolution of the target day inside an active month.

use chrono::Datelike;

use crate::cycle::YearMonth;
use crate::schedule::{DayCategory, Position};

/// How a schedule picks its day within an active month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRule {
    /// A fixed day of the month, 1..=31.
    Fixed(i32),
    /// The Nth (or last) day of the month matching a category.
    Positional {
        category: DayCategory,
        position: Position,
    },
}

impl DayRule {
    /// Whether the rule can name a day at all.
    pub fn is_valid(&self) -> bool {
        match self {
            DayRule::Fixed(day) => (1..=31).contains(day),
            // Every (category, position) pair names a day that exists in
            // every month: each single weekday occurs at least four times a
            // month, and weekend days at least eight.
            DayRule::Positional { .. } => true,
        }
    }

    /// The day of `month` this rule selects.
    ///
    /// A fixed day past the end of a short month is clamped to the month's
    /// last day. Returns `None` for an invalid rule, or when the requested
    /// position does not occur in `month`.
    pub fn resolve(&self, month: YearMonth) -> Option<u32> {
        match *self {
            DayRule::Fixed(day) => {
                if !self.is_valid() {
                    return None;
                }
                let day = u32::try_from(day).ok()?;
                Some(day.min(month.days_in_month()))
            }
            DayRule::Positional { category, position } => {
                positional_day(month, category, position)
            }
        }
    }
}

/// The `position`-th day of `month` whose weekday matches `category`.
///
/// For [`DayCategory::WeekendDay`] Saturdays and Sundays are counted together
/// in calendar order, so `First` is whichever weekend day comes first.
pub fn positional_day(month: YearMonth, category: DayCategory, position: Position) -> Option<u32> {
    let mut matching = (1..=month.days_in_month()).filter(|&day| {
        month
            .date(day)
            .is_some_and(|date| category.matches(date.weekday()))
    });

    match position {
        Position::First => matching.next(),
        Position::Second => matching.nth(1),
        Position::Third => matching.nth(2),
        Position::Fourth => matching.nth(3),
        Position::Last => matching.last(),
    }
}
