use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use kairos_core::config::OutputFormat;
use kairos_core::constants::APP_NAME;

/// Expand an iCalendar recurrence rule and print its occurrences.
#[derive(Parser, Debug, Clone)]
#[command(
    name = APP_NAME,
    version,
    long_about = None,
    override_usage = "kairos <RRULE> <DTSTART> [COUNT]"
)]
pub struct Cli {
    /// Recurrence rule, e.g. `FREQ=MONTHLY;BYDAY=-1FR`.
    #[arg(value_name = "RRULE", allow_hyphen_values = true)]
    pub rrule: String,

    /// Start as `YYYYMMDD`, `YYYYMMDDTHHMMSS`, `YYYYMMDDTHHMMSSZ` or
    /// `TZID=<zone>:YYYYMMDDTHHMMSS`.
    #[arg(value_name = "DTSTART")]
    pub dtstart: String,

    /// Occurrences to print (defaults to `expansion.default_count`).
    #[arg(value_name = "COUNT", value_parser = clap::value_parser!(u32).range(1..))]
    pub count: Option<u32>,

    /// Time zone for DTSTART, RDATE, EXDATE and window values without one.
    #[arg(long, value_name = "ZONE")]
    pub tzid: Option<String>,

    /// Extra occurrence; repeatable or comma separated.
    #[arg(long = "rdate", value_name = "DATE", value_delimiter = ',', action = ArgAction::Append)]
    pub rdates: Vec<String>,

    /// Excluded occurrence (a DATE excludes the whole day); repeatable or comma separated.
    #[arg(long = "exdate", value_name = "DATE", value_delimiter = ',', action = ArgAction::Append)]
    pub exdates: Vec<String>,

    /// Print DTSTART first even when the rule does not produce it.
    #[arg(long, action = ArgAction::SetTrue)]
    pub include_dtstart: bool,

    /// Only print occurrences strictly after this value.
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only print occurrences strictly before this value.
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Output format (defaults to `output.format`).
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Configuration file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath, env = "KAIROS_CONFIG")]
    pub config: Option<PathBuf>,

    /// More logging on stderr; repeat for more.
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub quiet: bool,
}

impl Cli {
    /// Returns the log filter the verbosity flags ask for, if any.
    #[must_use]
    pub const fn log_level(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Ical,
    Utc,
    Rfc3339,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Ical => Self::Ical,
            FormatArg::Utc => Self::Utc,
            FormatArg::Rfc3339 => Self::Rfc3339,
            FormatArg::Json => Self::Json,
        }
    }
}
