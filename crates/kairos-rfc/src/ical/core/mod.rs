//! Core iCalendar value types.

mod datetime;
mod rrule;
mod time;

pub use datetime::{Date, DateTime, DateTimeForm, Time};
pub use rrule::{Frequency, RRule, RRuleUntil, Weekday, WeekdayNum};
pub use time::ICalTime;
