//! The DATE / DATE-TIME value recurrence expansion works with.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Date, DateTime, DateTimeForm};
use crate::ical::expand::{ConversionError, TimeZoneResolver, convert_to_utc, utc_to_local};
use crate::ical::parse::{ParseError, ParseErrorKind, ParseResult, parse_date, parse_datetime};

/// A DATE or DATE-TIME value.
///
/// The wall clock is kept as a [`NaiveDateTime`] (midnight for DATE values)
/// next to its [`DateTimeForm`]. The derived ordering compares wall clocks
/// first and only orders values of one form (or one zone) as instants; use
/// [`ICalTime::compare`] across forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ICalTime {
    naive: NaiveDateTime,
    is_date: bool,
    form: DateTimeForm,
}

impl ICalTime {
    /// Creates a DATE value.
    #[must_use]
    pub fn date(date: NaiveDate) -> Self {
        Self {
            naive: date.and_time(NaiveTime::MIN),
            is_date: true,
            form: DateTimeForm::Floating,
        }
    }

    /// Creates a floating DATE-TIME value.
    #[must_use]
    pub fn floating(naive: NaiveDateTime) -> Self {
        Self {
            naive,
            is_date: false,
            form: DateTimeForm::Floating,
        }
    }

    /// Creates a UTC DATE-TIME value.
    #[must_use]
    pub fn utc(naive: NaiveDateTime) -> Self {
        Self {
            naive,
            is_date: false,
            form: DateTimeForm::Utc,
        }
    }

    /// Creates a DATE-TIME value local to `tzid`.
    #[must_use]
    pub fn zoned(naive: NaiveDateTime, tzid: impl Into<String>) -> Self {
        Self {
            naive,
            is_date: false,
            form: DateTimeForm::Zoned { tzid: tzid.into() },
        }
    }

    /// ## Summary
    /// Parses `YYYYMMDD`, `YYYYMMDDTHHMMSS`, `YYYYMMDDTHHMMSSZ` or
    /// `TZID=<zone>:YYYYMMDDTHHMMSS`.
    ///
    /// ## Errors
    /// Returns an error if the text is malformed or names a day that does
    /// not exist.
    pub fn parse(s: &str) -> ParseResult<Self> {
        Self::parse_with_tzid(s, None)
    }

    /// ## Summary
    /// Parses like [`ICalTime::parse`], attaching `tzid` to a non-UTC
    /// DATE-TIME. An inline `TZID=` prefix wins over `tzid`.
    ///
    /// ## Errors
    /// Returns an error if the text is malformed, names a day that does not
    /// exist, or attaches a TZID to a UTC value.
    pub fn parse_with_tzid(s: &str, tzid: Option<&str>) -> ParseResult<Self> {
        let s = s.trim();
        let (tzid, value, col) = match split_tzid_prefix(s) {
            Some((inline, value)) => (Some(inline), value, s.len() - value.len() + 1),
            None => (tzid, s, 1),
        };

        if value.len() == 8 {
            let date = parse_date(value, 1, col)?;
            return Self::from_date(date).ok_or_else(|| {
                ParseError::new(ParseErrorKind::InvalidDate, 1, col)
                    .with_context(format!("no such day: {value}"))
            });
        }

        let datetime = parse_datetime(value, None, 1, col)?;
        let naive = datetime.to_naive().ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidDateTime, 1, col)
                .with_context(format!("no such date-time: {value}"))
        })?;

        match (tzid.map(str::trim).filter(|t| !t.is_empty()), datetime.is_utc()) {
            (Some(_), true) => Err(ParseError::new(ParseErrorKind::InvalidDateTime, 1, col)
                .with_context("a UTC date-time cannot carry a TZID")),
            (Some(tzid), false) => Ok(Self::zoned(naive, tzid)),
            (None, true) => Ok(Self::utc(naive)),
            (None, false) => Ok(Self::floating(naive)),
        }
    }

    /// Converts a parsed DATE, or `None` if the day does not exist.
    #[must_use]
    pub fn from_date(date: Date) -> Option<Self> {
        date.to_naive().map(Self::date)
    }

    /// Converts a parsed DATE-TIME, or `None` if it has no wall clock.
    #[must_use]
    pub fn from_datetime(datetime: &DateTime) -> Option<Self> {
        Some(Self {
            naive: datetime.to_naive()?,
            is_date: false,
            form: datetime.form.clone(),
        })
    }

    /// Returns the wall clock (midnight for DATE values).
    #[must_use]
    pub const fn naive(&self) -> NaiveDateTime {
        self.naive
    }

    /// Returns the calendar date.
    #[must_use]
    pub fn date_naive(&self) -> NaiveDate {
        self.naive.date()
    }

    #[must_use]
    pub const fn is_date(&self) -> bool {
        self.is_date
    }

    #[must_use]
    pub const fn form(&self) -> &DateTimeForm {
        &self.form
    }

    #[must_use]
    pub fn is_utc(&self) -> bool {
        matches!(self.form, DateTimeForm::Utc)
    }

    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self.form, DateTimeForm::Floating)
    }

    /// Returns the timezone ID if this is a zoned time.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            _ => None,
        }
    }

    /// Returns a value with the same form and DATE flag at another wall clock.
    #[must_use]
    pub fn with_naive(&self, naive: NaiveDateTime) -> Self {
        Self {
            naive,
            is_date: self.is_date,
            form: self.form.clone(),
        }
    }

    /// Formats as `YYYYMMDD`, `YYYYMMDDTHHMMSS` or `YYYYMMDDTHHMMSSZ`.
    #[must_use]
    pub fn to_ical_string(&self) -> String {
        if self.is_date {
            return self.naive.format("%Y%m%d").to_string();
        }
        let mut s = self.naive.format("%Y%m%dT%H%M%S").to_string();
        if self.is_utc() {
            s.push('Z');
        }
        s
    }

    /// ## Summary
    /// Orders two values in time.
    ///
    /// When both are UTC or zoned DATE-TIMEs their instants are compared.
    /// Otherwise (a DATE or a floating value on either side) the wall clocks
    /// are compared.
    ///
    /// ## Errors
    /// Returns `ConversionError::UnknownTimezone` if a TZID cannot be resolved.
    pub fn compare(
        &self,
        other: &Self,
        resolver: &mut TimeZoneResolver,
    ) -> Result<Ordering, ConversionError> {
        if self.is_date || other.is_date || self.is_floating() || other.is_floating() {
            return Ok(self.naive.cmp(&other.naive));
        }
        Ok(self.to_utc(resolver)?.cmp(&other.to_utc(resolver)?))
    }

    /// ## Summary
    /// Moves this value onto `reference`'s form, keeping the instant, so the
    /// two wall clocks can be compared.
    ///
    /// DATE values, values already in that form and any value against a DATE
    /// `reference` are returned as they are. A floating `reference` takes
    /// this value's wall clock unchanged.
    ///
    /// ## Errors
    /// Returns `ConversionError::UnknownTimezone` if either TZID cannot be
    /// resolved.
    pub fn to_form_of(
        &self,
        reference: &Self,
        resolver: &mut TimeZoneResolver,
    ) -> Result<Self, ConversionError> {
        if self.is_date || reference.is_date || self.form == reference.form {
            return Ok(self.clone());
        }

        Ok(match &reference.form {
            DateTimeForm::Floating => reference.with_naive(self.naive),
            DateTimeForm::Utc => reference.with_naive(self.to_utc(resolver)?.naive_utc()),
            DateTimeForm::Zoned { tzid } => {
                let instant = self.to_utc(resolver)?;
                let tz = resolver.resolve(tzid)?;
                reference.with_naive(utc_to_local(tz, instant))
            }
        })
    }

    /// ## Summary
    /// Returns the instant this value denotes.
    ///
    /// Floating and DATE values are read as UTC. Zoned values resolve
    /// through `resolver`; see [`crate::ical::expand::local_to_utc`] for gap
    /// and fold handling.
    ///
    /// ## Errors
    /// Returns `ConversionError::UnknownTimezone` if the TZID cannot be resolved.
    pub fn to_utc(
        &self,
        resolver: &mut TimeZoneResolver,
    ) -> Result<chrono::DateTime<Utc>, ConversionError> {
        match &self.form {
            DateTimeForm::Zoned { tzid } if !self.is_date => {
                convert_to_utc(self.naive, tzid, resolver)
            }
            _ => Ok(self.naive.and_utc()),
        }
    }
}

/// Splits `TZID=<zone>:<value>` into zone and value.
fn split_tzid_prefix(s: &str) -> Option<(&str, &str)> {
    let head = s.get(..5)?;
    if !head.eq_ignore_ascii_case("TZID=") {
        return None;
    }
    s[5..].rsplit_once(':')
}

impl fmt::Display for ICalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ical_string())
    }
}

impl FromStr for ICalTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Serialized as iCalendar text; zoned values carry a `TZID=<zone>:` prefix.
impl Serialize for ICalTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.tzid() {
            Some(tzid) => serializer.collect_str(&format_args!("TZID={tzid}:{self}")),
            None => serializer.collect_str(self),
        }
    }
}

impl<'de> Deserialize<'de> for ICalTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
