//! Value type parsers for iCalendar recurrence (RFC 5545 §3.3).
//!
//! Error sources are discarded during parsing (`map_err_ignore`); the
//! `ParseErrorKind` and context carry what callers need.
#![expect(
    clippy::map_err_ignore,
    reason = "Value parsers discard integer parse error sources in favor of ParseErrorKind"
)]

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::ical::core::{
    Date, DateTime, DateTimeForm, Frequency, RRule, RRuleUntil, Time, Weekday, WeekdayNum,
};

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<Date> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line, col)
            .with_context(format!("expected YYYYMMDD, got {s:?}")));
    }

    let year = s[0..4]
        .parse::<u16>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate, line, col))?;
    let month = s[4..6]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate, line, col))?;
    let day = s[6..8]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate, line, col))?;

    // Basic validation; month lengths are checked when converting to chrono
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line, col)
            .with_context(format!("month or day out of range in {s}")));
    }

    Ok(Date { year, month, day })
}

/// Parses a TIME value (RFC 5545 §3.3.12).
///
/// Format: HHMMSS[Z] (e.g., "133000", "133000Z")
///
/// ## Errors
/// Returns an error if the string is not a valid 6-digit time.
pub fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<Time> {
    let (time_str, is_utc) = if let Some(stripped) = s.strip_suffix('Z') {
        (stripped, true)
    } else {
        (s, false)
    };

    if time_str.len() != 6 || !time_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line, col)
            .with_context(format!("expected HHMMSS[Z], got {s:?}")));
    }

    let hour = time_str[0..2]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTime, line, col))?;
    let minute = time_str[2..4]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTime, line, col))?;
    let second = time_str[4..6]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTime, line, col))?;

    // Allow 60 for leap seconds
    if hour > 23 || minute > 59 || second > 60 {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line, col)
            .with_context(format!("hour, minute or second out of range in {s}")));
    }

    Ok(Time {
        hour,
        minute,
        second,
        is_utc,
    })
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDD"T"HHMMSS[Z] (e.g., "19970714T133000Z")
///
/// `tzid` comes from the property parameter, not from the value itself, and
/// is ignored for UTC values.
///
/// ## Errors
/// Returns an error if the string is not a valid datetime format.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<DateTime> {
    let t_pos = s.find(['T', 't']).ok_or_else(|| {
        ParseError::new(ParseErrorKind::InvalidDateTime, line, col)
            .with_context(format!("expected YYYYMMDDTHHMMSS[Z], got {s:?}"))
    })?;

    let date_str = &s[..t_pos];
    let time_str = &s[t_pos + 1..];

    let date = parse_date(date_str, line, col)?;
    let time = parse_time(time_str, line, col + t_pos + 1)?;

    let form = if time.is_utc {
        DateTimeForm::Utc
    } else if let Some(tz) = tzid {
        DateTimeForm::Zoned {
            tzid: tz.to_string(),
        }
    } else {
        DateTimeForm::Floating
    };

    Ok(DateTime {
        year: date.year,
        month: date.month,
        day: date.day,
        hour: time.hour,
        minute: time.minute,
        second: time.second,
        form,
    })
}

/// Parses a RECUR (RRULE) value (RFC 5545 §3.3.10).
///
/// Accepts an optional `RRULE:` prefix. Part names are case-insensitive and
/// unknown parts are ignored. `col` is the column of the first character of
/// `s`; errors point at the offending part.
///
/// ## Errors
/// Returns an error if a part is malformed, out of range, or repeated (FREQ,
/// INTERVAL, COUNT, UNTIL and WKST), if both COUNT and UNTIL are present, or
/// if FREQ is missing.
pub fn parse_rrule(s: &str, line: usize, col: usize) -> ParseResult<RRule> {
    let (body, body_col) = strip_rrule_prefix(s.trim_end(), col);
    if body.trim().is_empty() {
        return Err(ParseError::new(ParseErrorKind::InvalidRRule, line, col)
            .with_context("empty recurrence rule"));
    }

    let mut rrule = RRule::new();
    let mut seen: Vec<String> = Vec::new();
    let mut offset = 0;

    for part in body.split(';') {
        let part_col = body_col + offset;
        offset += part.len() + 1;
        if part.trim().is_empty() {
            continue;
        }

        let (key, value) = part.split_once('=').ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidRRule, line, part_col)
                .with_context(format!("expected NAME=VALUE, got {part:?}"))
        })?;
        let key = key.trim().to_ascii_uppercase();

        if matches!(
            key.as_str(),
            "FREQ" | "INTERVAL" | "COUNT" | "UNTIL" | "WKST"
        ) {
            if seen.contains(&key) {
                return Err(ParseError::new(ParseErrorKind::DuplicatePart, line, part_col)
                    .with_context(format!("{key} given more than once")));
            }
            seen.push(key.clone());
        }

        let value_col = part_col + part.len() - value.len();
        parse_rrule_part(&mut rrule, &key, value.trim(), line, value_col)?;
    }

    if rrule.freq.is_none() {
        return Err(ParseError::new(ParseErrorKind::MissingFrequency, line, col));
    }

    Ok(rrule)
}

/// Strips a leading `RRULE:` and returns the body with its column.
fn strip_rrule_prefix(s: &str, col: usize) -> (&str, usize) {
    const PREFIX: &str = "RRULE:";
    match s.get(..PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(PREFIX) => (&s[PREFIX.len()..], col + PREFIX.len()),
        _ => (s, col),
    }
}

/// Parses a single RRULE key-value pair.
fn parse_rrule_part(
    rrule: &mut RRule,
    key: &str,
    value: &str,
    line: usize,
    col: usize,
) -> ParseResult<()> {
    match key {
        "FREQ" => {
            rrule.freq = Some(Frequency::parse(value).ok_or_else(|| {
                ParseError::new(ParseErrorKind::InvalidFrequency, line, col)
                    .with_context(format!("unknown FREQ {value:?}"))
            })?);
        }
        "INTERVAL" => {
            // Non-positive intervals read as 1
            let interval = parse_integer(value, line, col)?;
            rrule.interval = Some(u32::try_from(interval).ok().filter(|i| *i >= 1).unwrap_or(1));
        }
        "COUNT" => parse_rrule_count(rrule, value, line, col)?,
        "UNTIL" => parse_rrule_until(rrule, value, line, col)?,
        "WKST" => {
            rrule.wkst = Some(Weekday::parse(value).ok_or_else(|| {
                ParseError::new(ParseErrorKind::InvalidWeekday, line, col)
                    .with_context(format!("unknown WKST {value:?}"))
            })?);
        }
        "BYSECOND" => rrule.by_second = parse_unsigned_list(key, value, 0, 60, line, col)?,
        "BYMINUTE" => rrule.by_minute = parse_unsigned_list(key, value, 0, 59, line, col)?,
        "BYHOUR" => rrule.by_hour = parse_unsigned_list(key, value, 0, 23, line, col)?,
        "BYDAY" => rrule.by_day = parse_byday(value, line, col)?,
        "BYMONTHDAY" => rrule.by_monthday = parse_signed_list(key, value, 31, line, col)?,
        "BYYEARDAY" => rrule.by_yearday = parse_signed_list(key, value, 366, line, col)?,
        "BYWEEKNO" => rrule.by_weekno = parse_signed_list(key, value, 53, line, col)?,
        "BYMONTH" => rrule.by_month = parse_unsigned_list(key, value, 1, 12, line, col)?,
        "BYSETPOS" => rrule.by_setpos = parse_signed_list(key, value, 366, line, col)?,
        _ => {
            tracing::trace!(part = key, "Ignoring unknown RRULE part");
        }
    }
    Ok(())
}

/// Parses the COUNT component of an RRULE.
fn parse_rrule_count(rrule: &mut RRule, value: &str, line: usize, col: usize) -> ParseResult<()> {
    if rrule.until.is_some() {
        return Err(ParseError::new(
            ParseErrorKind::UntilCountConflict,
            line,
            col,
        ));
    }
    let count = parse_integer(value, line, col)?;
    let count = u32::try_from(count)
        .ok()
        .filter(|c| *c >= 1)
        .ok_or_else(|| {
            ParseError::new(ParseErrorKind::ValueOutOfRange, line, col)
                .with_context(format!("COUNT must be at least 1, got {value}"))
        })?;
    rrule.count = Some(count);
    Ok(())
}

/// Parses the UNTIL component of an RRULE.
fn parse_rrule_until(rrule: &mut RRule, value: &str, line: usize, col: usize) -> ParseResult<()> {
    if rrule.count.is_some() {
        return Err(ParseError::new(
            ParseErrorKind::UntilCountConflict,
            line,
            col,
        ));
    }
    // UNTIL can be DATE or DATE-TIME
    if value.len() == 8 {
        rrule.until = Some(RRuleUntil::Date(parse_date(value, line, col)?));
    } else {
        rrule.until = Some(RRuleUntil::DateTime(parse_datetime(
            value, None, line, col,
        )?));
    }
    Ok(())
}

/// Parses an INTEGER value with an optional sign (RFC 5545 §3.3.8).
fn parse_integer(s: &str, line: usize, col: usize) -> ParseResult<i64> {
    s.parse().map_err(|_| {
        ParseError::new(ParseErrorKind::InvalidInteger, line, col)
            .with_context(format!("expected an integer, got {s:?}"))
    })
}

/// Splits a comma-separated list, yielding each trimmed item with its column.
fn list_items(s: &str, col: usize) -> impl Iterator<Item = (&str, usize)> {
    let mut offset = 0;
    s.split(',').map(move |item| {
        let item_col = col + offset;
        offset += item.len() + 1;
        (item.trim(), item_col)
    })
}

fn out_of_range(key: &str, value: i64, range: &str, line: usize, col: usize) -> ParseError {
    ParseError::new(ParseErrorKind::ValueOutOfRange, line, col)
        .with_context(format!("{key} value {value} is outside {range}"))
}

/// Parses a list of values in `min..=max`, dropping repeats.
fn parse_unsigned_list(
    key: &str,
    s: &str,
    min: u8,
    max: u8,
    line: usize,
    col: usize,
) -> ParseResult<Vec<u8>> {
    let mut values = Vec::new();
    for (item, item_col) in list_items(s, col) {
        let n = parse_integer(item, line, item_col)?;
        let v = u8::try_from(n)
            .ok()
            .filter(|v| (min..=max).contains(v))
            .ok_or_else(|| out_of_range(key, n, &format!("{min}..={max}"), line, item_col))?;
        if !values.contains(&v) {
            values.push(v);
        }
    }
    Ok(values)
}

/// Parses a list of non-zero values in `-max..=max`, dropping repeats.
fn parse_signed_list<T>(key: &str, s: &str, max: i16, line: usize, col: usize) -> ParseResult<Vec<T>>
where
    T: TryFrom<i64> + PartialEq,
{
    let mut values = Vec::new();
    for (item, item_col) in list_items(s, col) {
        let n = parse_integer(item, line, item_col)?;
        let in_range = n != 0 && (-i64::from(max)..=i64::from(max)).contains(&n);
        let v = T::try_from(n)
            .ok()
            .filter(|_| in_range)
            .ok_or_else(|| out_of_range(key, n, &format!("±1..={max}"), line, item_col))?;
        if !values.contains(&v) {
            values.push(v);
        }
    }
    Ok(values)
}

/// Parses a BYDAY value (weekdays with optional ordinals).
fn parse_byday(s: &str, line: usize, col: usize) -> ParseResult<Vec<WeekdayNum>> {
    let mut days = Vec::new();
    for (item, item_col) in list_items(s, col) {
        let day = parse_weekday_num(item, line, item_col)?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    Ok(days)
}

/// Parses a single weekday with optional ordinal (e.g., "MO", "1MO", "-1FR", "+2TU").
fn parse_weekday_num(s: &str, line: usize, col: usize) -> ParseResult<WeekdayNum> {
    let invalid = || {
        ParseError::new(ParseErrorKind::InvalidWeekday, line, col)
            .with_context(format!("expected [+-][n]SU..SA, got {s:?}"))
    };

    let split = s.len().checked_sub(2).ok_or_else(invalid)?;
    let weekday_str = s.get(split..).ok_or_else(invalid)?;
    let ordinal_str = &s[..split];

    let weekday = Weekday::parse(weekday_str).ok_or_else(invalid)?;

    if ordinal_str.is_empty() {
        return Ok(WeekdayNum::every(weekday));
    }

    let digits = ordinal_str.trim_start_matches(['+', '-']);
    if digits.is_empty()
        || digits.len() > 2
        || ordinal_str.len() - digits.len() > 1
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let n = parse_integer(ordinal_str, line, col)?;
    let ordinal = i8::try_from(n)
        .ok()
        .filter(|n| *n != 0 && (-53..=53).contains(n))
        .ok_or_else(|| out_of_range("BYDAY", n, "±1..=53", line, col))?;

    Ok(WeekdayNum {
        ordinal: Some(ordinal),
        weekday,
    })
}
