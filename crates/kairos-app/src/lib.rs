//! The `kairos` command: expands a recurrence rule and prints occurrences.

pub mod cli;
pub mod error;
pub mod logging;
pub mod output;

use std::io::Write;

use chrono::NaiveDateTime;
use kairos_core::config::{OutputFormat, Settings};
use kairos_rfc::ical::expand::IteratorOptions;
use kairos_rfc::ical::{ICalTime, RecurrenceSet, parse_rrule};

use cli::Cli;
use error::AppResult;

/// ## Summary
/// Runs one invocation: parses DTSTART and the rule, expands the
/// recurrence set and writes the occurrences to `out`.
///
/// Returns how many occurrences were written.
///
/// ## Errors
/// Returns an error if DTSTART, the rule or any date option fails to parse,
/// the rule cannot be expanded from DTSTART, or writing fails.
pub fn run_with(cli: &Cli, settings: &Settings, out: &mut impl Write) -> AppResult<usize> {
    let tzid = cli.tzid.as_deref();
    let parse_time = |value: &str| ICalTime::parse_with_tzid(value, tzid);

    let dtstart = parse_time(&cli.dtstart)?;
    let rule = parse_rrule(&cli.rrule, 1, 1)?;

    let expansion = &settings.expansion;
    let requested = cli.count.unwrap_or(expansion.default_count);
    let count = requested.min(expansion.max_count);
    if count < requested {
        tracing::warn!(requested, max_count = expansion.max_count, "Capping occurrence count");
    }

    let options = IteratorOptions::default().with_max_empty_periods(expansion.max_empty_periods);
    let mut set = RecurrenceSet::new(dtstart)
        .with_rrule(rule)
        .include_dtstart(cli.include_dtstart)
        .with_options(options);
    for rdate in &cli.rdates {
        set = set.with_rdate(parse_time(rdate)?);
    }
    for exdate in &cli.exdates {
        set = set.with_exdate(parse_time(exdate)?);
    }

    let window_bound =
        |value: &str| -> AppResult<NaiveDateTime> { Ok(set.align(&parse_time(value)?)?.naive()) };
    let after = cli.after.as_deref().map(&window_bound).transpose()?;
    let before = cli.before.as_deref().map(&window_bound).transpose()?;

    let occurrences: Vec<ICalTime> = set
        .iter()?
        .skip_while(|occurrence| after.is_some_and(|after| occurrence.naive() <= after))
        .take_while(|occurrence| before.is_none_or(|before| occurrence.naive() < before))
        .take(usize::try_from(count).unwrap_or(usize::MAX))
        .collect();

    tracing::debug!(
        rrule = %cli.rrule,
        dtstart = %cli.dtstart,
        occurrences = occurrences.len(),
        "Expanded recurrence"
    );

    let format = cli
        .format
        .map_or(settings.output.format, OutputFormat::from);
    output::render(out, &occurrences, format)?;
    Ok(occurrences.len())
}
