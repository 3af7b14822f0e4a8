//! Parsers for iCalendar recurrence values.

mod error;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use values::{parse_date, parse_datetime, parse_rrule, parse_time};
