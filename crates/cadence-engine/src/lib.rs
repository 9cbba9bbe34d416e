//! # cadence-engine
//!
//! Next-occurrence calculation for monthly recurring schedules.
//!
//! Given a schedule definition ("every 2 months on the 4th at 02:00", "every
//! month on the first Monday, every 30 minutes between 02:00 and 04:00") and a
//! reference timestamp, the engine produces a fixed-length series of outcomes:
//! each one is either the next occurrence or the reason there is none. All
//! timestamps are naive local values; time zones are the caller's concern.
//!
//! ## Modules
//!
//! - [`schedule`]: Definitions of the three monthly schedule variants
//! - [`validator`]: Ordered validation checks
//! - [`cycle`]: Month-cycle resolution (which months are active)
//! - [`day`]: Target-day resolution (fixed day or Nth weekday)
//! - [`stepper`]: Intraday stepping inside a time window
//! - [`occurrence`]: Single next-occurrence calculation
//! - [`series`]: Chained series generation with sticky errors
//! - [`error`]: Error types

pub mod cycle;
pub mod day;
pub mod error;
pub mod occurrence;
pub mod schedule;
pub mod series;
pub mod stepper;
pub mod validator;

pub use error::ScheduleError;
pub use occurrence::{next_occurrence, Outcome};
pub use schedule::{
    DayCategory, IntervalUnit, MonthlyDayOnce, MonthlyDayRecurring, MonthlyPeriodRecurring,
    Position, Schedule, ScheduleCommon,
};
pub use series::{series, Cursor, Series};
pub use validator::{validate, validate_definition};
