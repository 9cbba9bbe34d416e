//! Positional weekday schedules ("first Monday", "last weekend day", ...).
//!
//! Calendar facts used below:
//! - June 2020: Mondays 1, 8, 15, 22, 29
//! - July 2020: Mondays 6, 13, 20, 27
//! - August 2020: weekend days 1, 2, 8, 9, ..., 29, 30
//! - January 2020: Fridays 3, 10, 17, 24, 31; March 2020: last Friday 27

use std::num::NonZeroU32;

use cadence_engine::cycle::YearMonth;
use cadence_engine::day::{positional_day, DayRule};
use cadence_engine::{
    series, DayCategory, IntervalUnit, MonthlyPeriodRecurring, Position, Schedule, ScheduleCommon,
    ScheduleError,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_time(time(h, min))
}

fn period(
    common: ScheduleCommon,
    day_category: DayCategory,
    position: Position,
    every_after: u32,
    interval_unit: IntervalUnit,
    window: (NaiveTime, NaiveTime),
) -> Schedule {
    MonthlyPeriodRecurring {
        common,
        day_category,
        position,
        every_after: NonZeroU32::new(every_after).unwrap(),
        interval_unit,
        starting_time: window.0,
        ending_time: window.1,
    }
    .into()
}

fn first_monday_hourly(common: ScheduleCommon) -> Schedule {
    period(
        common,
        DayCategory::Monday,
        Position::First,
        1,
        IntervalUnit::Hours,
        (time(2, 0), time(4, 0)),
    )
}

#[test]
fn first_monday_same_month_when_still_upcoming() {
    let schedule = first_monday_hourly(ScheduleCommon::new(date(2020, 1, 1), 1));
    assert_eq!(
        series(&schedule, at(2020, 6, 1, 1, 0), 5),
        vec![
            Ok(at(2020, 6, 1, 2, 0)),
            Ok(at(2020, 6, 1, 3, 0)),
            Ok(at(2020, 6, 1, 4, 0)),
            Ok(at(2020, 7, 6, 2, 0)),
            Ok(at(2020, 7, 6, 3, 0)),
        ]
    );
}

#[test]
fn first_monday_after_window_moves_to_next_month() {
    let schedule = first_monday_hourly(ScheduleCommon::new(date(2020, 1, 1), 1));
    assert_eq!(
        series(&schedule, at(2020, 6, 1, 5, 0), 1),
        vec![Ok(at(2020, 7, 6, 2, 0))]
    );
    assert_eq!(
        series(&schedule, at(2020, 6, 2, 0, 0), 1),
        vec![Ok(at(2020, 7, 6, 2, 0))]
    );
}

#[test]
fn first_weekend_day_same_month_when_still_upcoming() {
    let schedule = period(
        ScheduleCommon::new(date(2020, 1, 1), 1),
        DayCategory::WeekendDay,
        Position::First,
        1,
        IntervalUnit::Hours,
        (time(2, 0), time(3, 0)),
    );
    assert_eq!(
        series(&schedule, at(2020, 8, 1, 0, 30), 3),
        vec![
            Ok(at(2020, 8, 1, 2, 0)),
            Ok(at(2020, 8, 1, 3, 0)),
            // September 2020 starts on a Tuesday; Saturday the 5th is first.
            Ok(at(2020, 9, 5, 2, 0)),
        ]
    );
}

#[test]
fn last_friday_every_two_months_from_start_date() {
    let schedule = period(
        ScheduleCommon::new(date(2020, 1, 10), 2),
        DayCategory::Friday,
        Position::Last,
        30,
        IntervalUnit::Minutes,
        (time(9, 0), time(10, 0)),
    );
    assert_eq!(
        series(&schedule, at(2020, 1, 1, 0, 0), 4),
        vec![
            Ok(at(2020, 1, 31, 9, 0)),
            Ok(at(2020, 1, 31, 9, 30)),
            Ok(at(2020, 1, 31, 10, 0)),
            Ok(at(2020, 3, 27, 9, 0)),
        ]
    );
}

#[test]
fn end_date_cuts_positional_series() {
    let schedule = first_monday_hourly(
        ScheduleCommon::new(date(2020, 1, 1), 1).with_end_date(date(2020, 7, 1)),
    );
    assert_eq!(
        series(&schedule, at(2020, 6, 1, 3, 0), 3),
        vec![
            Ok(at(2020, 6, 1, 4, 0)),
            Err(ScheduleError::PastEndDate),
            Err(ScheduleError::PastEndDate),
        ]
    );
}

#[test]
fn inverted_window_is_rejected() {
    let schedule = period(
        ScheduleCommon::new(date(2020, 1, 1), 1),
        DayCategory::Sunday,
        Position::Second,
        1,
        IntervalUnit::Hours,
        (time(4, 0), time(2, 0)),
    );
    let result = series(&schedule, at(2020, 6, 1, 0, 0), 2);
    assert_eq!(result, vec![Err(ScheduleError::InvalidTimeWindow); 2]);
    assert_eq!(
        result[0].unwrap_err().to_string(),
        "Starting time can't be later than or equal to ending time"
    );
}

// ---------------------------------------------------------------------------
// Day resolver
// ---------------------------------------------------------------------------

#[test]
fn fourth_weekend_day_of_february_2020() {
    // February 2020 starts on a Saturday: 1, 2, 8, 9.
    let feb = YearMonth::new(2020, 2).unwrap();
    assert_eq!(
        positional_day(feb, DayCategory::WeekendDay, Position::Fourth),
        Some(9)
    );
}

#[test]
fn last_weekend_day_can_be_a_saturday() {
    let october = YearMonth::new(2020, 10).unwrap();
    assert_eq!(
        positional_day(october, DayCategory::WeekendDay, Position::Last),
        Some(31)
    );
}

#[test]
fn every_pair_resolves_in_every_month_of_a_year() {
    let categories = [
        DayCategory::Monday,
        DayCategory::Tuesday,
        DayCategory::Wednesday,
        DayCategory::Thursday,
        DayCategory::Friday,
        DayCategory::Saturday,
        DayCategory::Sunday,
        DayCategory::WeekendDay,
    ];
    let positions = [
        Position::First,
        Position::Second,
        Position::Third,
        Position::Fourth,
        Position::Last,
    ];
    for month in 1..=12 {
        let month = YearMonth::new(2021, month).unwrap();
        for category in categories {
            for position in positions {
                let rule = DayRule::Positional { category, position };
                assert!(rule.is_valid());
                assert!(
                    rule.resolve(month).is_some(),
                    "{category:?} {position:?} in {month:?}"
                );
            }
        }
    }
}

#[test]
fn positional_series_stops_at_end_of_calendar() {
    let schedule = period(
        ScheduleCommon::new(date(2020, 1, 1), 1),
        DayCategory::WeekendDay,
        Position::Last,
        1,
        IntervalUnit::Hours,
        (time(2, 0), time(4, 0)),
    );

    let late = NaiveDate::MAX.and_time(time(23, 0));
    assert_eq!(
        cadence_engine::next_occurrence(&schedule, late),
        Err(ScheduleError::PastEndDate)
    );
    assert_eq!(
        series(&schedule, late, 2),
        vec![Err(ScheduleError::PastEndDate); 2]
    );

    // The final month still yields its last weekend day, then nothing.
    let early = NaiveDate::MAX.with_day(1).unwrap().and_time(NaiveTime::MIN);
    let result = series(&schedule, early, 5);
    let slots: Vec<NaiveDateTime> = result[..3].iter().copied().map(Result::unwrap).collect();
    assert!(slots.iter().all(|slot| slot.date() == slots[0].date()));
    assert_eq!(slots[0].date().month(), 12);
    assert_eq!(slots[0].date().year(), NaiveDate::MAX.year());
    assert_eq!(
        slots.iter().map(|slot| slot.time()).collect::<Vec<_>>(),
        vec![time(2, 0), time(3, 0), time(4, 0)]
    );
    assert_eq!(&result[3..], &[Err(ScheduleError::PastEndDate); 2]);
}
