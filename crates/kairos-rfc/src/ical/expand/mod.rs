//! Recurrence expansion (RFC 5545 §3.3.10, §3.8.5).
//!
//! - `iterator`: the per-rule occurrence iterator
//! - `set`: DTSTART + RRULE + RDATE - EXDATE merging
//! - `timezone`: TZID resolution and UTC conversion

mod calendar;
mod iterator;
mod set;
mod timezone;
mod validate;

pub use calendar::{
    days_in_month, days_in_year, is_leap_year, is_nth_in_span, week_number, week_one_start,
    weeks_in_year,
};
pub use iterator::{IteratorOptions, IteratorState, RRuleIterator};
pub use set::{RecurrenceSet, RecurrenceSetIter};
pub use timezone::{
    ConversionError, TimeZoneResolver, convert_to_utc, local_to_utc, utc_to_local,
};
pub use validate::validate;

/// Errors that prevent a rule from being expanded.
#[derive(Debug, thiserror::Error)]
pub enum ExpansionError {
    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("Invalid DTSTART: {0}")]
    InvalidDtstart(String),

    #[error("Invalid iterator state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

pub type ExpansionResult<T> = std::result::Result<T, ExpansionError>;
