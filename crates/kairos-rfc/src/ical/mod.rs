//! iCalendar RFC 5545 recurrence implementation.
//!
//! - `core`: Type definitions for date, date-time and recurrence values
//! - `parse`: Parsers for those values
//! - `expand`: Recurrence expansion and time zone handling

pub mod core;
pub mod expand;
pub mod parse;

// Re-export commonly used items at module level
pub use core::{Frequency, ICalTime, RRule, Weekday, WeekdayNum};
pub use expand::{RRuleIterator, RecurrenceSet};
pub use parse::{ParseError, ParseResult, parse_rrule};
