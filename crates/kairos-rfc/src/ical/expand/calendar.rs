//! Calendar arithmetic used by recurrence expansion.
//!
//! Weeks follow RFC 5545 §3.3.10: a week starts on WKST and week 1 of a year
//! is the first week holding at least four days of that year.

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::ical::core::Weekday;

#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

#[must_use]
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Returns the length of `month` (1-12) in `year`, or 0 for an invalid month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Returns the first day of week 1 of `year`. It may fall in the previous year.
#[must_use]
pub fn week_one_start(year: i32, wkst: Weekday) -> Option<NaiveDate> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let offset = Weekday::from_chrono(jan1.weekday()).days_from(wkst);
    let start = jan1.checked_sub_signed(TimeDelta::days(i64::from(offset)))?;
    if 7 - offset >= 4 {
        Some(start)
    } else {
        start.checked_add_signed(TimeDelta::days(7))
    }
}

/// Returns the number of weeks (52 or 53) in the week-year `year`.
#[must_use]
pub fn weeks_in_year(year: i32, wkst: Weekday) -> Option<i64> {
    let this = week_one_start(year, wkst)?;
    let next = week_one_start(year + 1, wkst)?;
    Some((next - this).num_days() / 7)
}

/// Returns the week-year and week number `date` belongs to.
///
/// Days at the edges of a year may belong to the neighbouring week-year:
/// with `wkst = MO`, 2024-12-30 is week 1 of 2025.
#[must_use]
pub fn week_number(date: NaiveDate, wkst: Weekday) -> Option<(i32, i64)> {
    let year = date.year();
    if date >= week_one_start(year + 1, wkst)? {
        return Some((year + 1, 1));
    }
    let this = week_one_start(year, wkst)?;
    if date < this {
        let prev = week_one_start(year - 1, wkst)?;
        return Some((year - 1, (date - prev).num_days() / 7 + 1));
    }
    Some((year, (date - this).num_days() / 7 + 1))
}

/// Returns whether the day at zero-based `index` of a span of `len` days is
/// the `ordinal`-th occurrence of its weekday in that span. Negative
/// ordinals count from the end.
#[must_use]
pub fn is_nth_in_span(index: i64, len: i64, ordinal: i64) -> bool {
    if ordinal > 0 {
        index / 7 + 1 == ordinal
    } else {
        (len - 1 - index) / 7 + 1 == -ordinal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2026));
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2026), 365);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2026, 4), 30);
        assert_eq!(days_in_month(2026, 12), 31);
        assert_eq!(days_in_month(2026, 13), 0);
    }

    #[test]
    fn week_one_with_monday_start() {
        // 2026-01-01 is a Thursday, so week 1 starts on Monday 2025-12-29
        assert_eq!(week_one_start(2026, Weekday::Monday), Some(date(2025, 12, 29)));
        // 2027-01-01 is a Friday, so week 1 starts on Monday 2027-01-04
        assert_eq!(week_one_start(2027, Weekday::Monday), Some(date(2027, 1, 4)));
    }

    #[test]
    fn week_numbers_match_iso_for_monday() {
        assert_eq!(week_number(date(2024, 12, 30), Weekday::Monday), Some((2025, 1)));
        assert_eq!(week_number(date(2027, 1, 1), Weekday::Monday), Some((2026, 53)));
        assert_eq!(week_number(date(1997, 5, 12), Weekday::Monday), Some((1997, 20)));
        assert_eq!(weeks_in_year(2026, Weekday::Monday), Some(53));
        assert_eq!(weeks_in_year(2025, Weekday::Monday), Some(52));
    }

    #[test]
    fn week_numbers_depend_on_week_start() {
        // 1997-01-01 is a Wednesday; with Sunday weeks, Dec 29 1996 starts week 1
        assert_eq!(week_one_start(1997, Weekday::Sunday), Some(date(1996, 12, 29)));
        assert_eq!(week_number(date(1997, 1, 4), Weekday::Sunday), Some((1997, 1)));
        assert_eq!(week_number(date(1997, 1, 5), Weekday::Sunday), Some((1997, 2)));
    }

    #[test]
    fn nth_in_span() {
        // In a 31-day month, day index 0 is first and day index 30 is last
        assert!(is_nth_in_span(0, 31, 1));
        assert!(is_nth_in_span(30, 31, -1));
        assert!(is_nth_in_span(24, 31, -1));
        assert!(!is_nth_in_span(23, 31, -1));
        assert!(is_nth_in_span(28, 31, 5));
    }
}
