//! RFC 5545 recurrence support for Kairos.
//!
//! - [`ical::core`]: DATE / DATE-TIME values and the RECUR (`RRULE`) type
//! - [`ical::parse`]: parsers for those values
//! - [`ical::expand`]: the occurrence iterator, recurrence sets and time zones
//!
//! ## Example
//!
//! ```rust
//! use kairos_rfc::occurrences;
//!
//! let dates = occurrences("FREQ=MONTHLY;BYDAY=-1FR", "20260101T090000", 3).unwrap();
//! let text: Vec<String> = dates.iter().map(ToString::to_string).collect();
//! assert_eq!(text, ["20260130T090000", "20260227T090000", "20260327T090000"]);
//! ```

pub mod error;
pub mod ical;

use error::RfcResult;
use ical::core::ICalTime;

/// ## Summary
/// Parses `rrule` and `dtstart` and returns up to `count` occurrences of the
/// rule, in order.
///
/// `dtstart` accepts `YYYYMMDD`, `YYYYMMDDTHHMMSS`, `YYYYMMDDTHHMMSSZ` and
/// `TZID=<zone>:YYYYMMDDTHHMMSS`.
///
/// ## Errors
/// Returns an error if either input fails to parse or the rule cannot be
/// expanded from `dtstart`.
pub fn occurrences(rrule: &str, dtstart: &str, count: usize) -> RfcResult<Vec<ICalTime>> {
    let dtstart = ICalTime::parse(dtstart)?;
    let rule = ical::parse::parse_rrule(rrule, 1, 1)?;
    Ok(rule.iter(&dtstart)?.take(count).collect())
}
