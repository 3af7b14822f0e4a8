//! Rendering occurrences for the terminal.

use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use kairos_core::config::OutputFormat;
use kairos_rfc::ical::ICalTime;
use kairos_rfc::ical::expand::TimeZoneResolver;
use serde::Serialize;

use crate::error::AppResult;

/// One occurrence in `--format json` output.
#[derive(Debug, Serialize)]
struct JsonOccurrence<'a> {
    ical: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    local: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tzid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    utc: Option<chrono::DateTime<Utc>>,
}

/// ## Summary
/// Writes `occurrences` to `out` in `format`, one per line for the text
/// formats and as a single JSON array for [`OutputFormat::Json`].
///
/// DATE values have no instant, so the UTC and RFC 3339 formats print them
/// as dates.
///
/// ## Errors
/// Returns an error if a TZID cannot be resolved or writing fails.
pub fn render(
    out: &mut impl Write,
    occurrences: &[ICalTime],
    format: OutputFormat,
) -> AppResult<()> {
    let mut resolver = TimeZoneResolver::new();

    if format == OutputFormat::Json {
        let items = occurrences
            .iter()
            .map(|occurrence| {
                Ok(if occurrence.is_date() {
                    JsonOccurrence {
                        ical: occurrence.to_ical_string(),
                        date: Some(occurrence.date_naive()),
                        local: None,
                        tzid: None,
                        utc: None,
                    }
                } else {
                    JsonOccurrence {
                        ical: occurrence.to_ical_string(),
                        date: None,
                        local: Some(occurrence.naive()),
                        tzid: occurrence.tzid(),
                        utc: Some(occurrence.to_utc(&mut resolver)?),
                    }
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        serde_json::to_writer_pretty(&mut *out, &items)?;
        writeln!(out)?;
        return Ok(());
    }

    for occurrence in occurrences {
        let line = match format {
            OutputFormat::Utc if !occurrence.is_date() => occurrence
                .to_utc(&mut resolver)?
                .format("%Y%m%dT%H%M%SZ")
                .to_string(),
            OutputFormat::Rfc3339 if occurrence.is_date() => {
                occurrence.date_naive().format("%Y-%m-%d").to_string()
            }
            OutputFormat::Rfc3339 => occurrence
                .to_utc(&mut resolver)?
                .to_rfc3339_opts(SecondsFormat::Secs, false),
            _ => occurrence.to_ical_string(),
        };
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(values: &[&str], format: OutputFormat) -> String {
        let occurrences: Vec<ICalTime> = values
            .iter()
            .map(|v| ICalTime::parse(v).expect("test value should parse"))
            .collect();
        let mut out = Vec::new();
        render(&mut out, &occurrences, format).expect("render should succeed");
        String::from_utf8(out).expect("output should be UTF-8")
    }

    #[test]
    fn ical_lines() {
        assert_eq!(
            rendered(&["20260101", "20260101T090000", "20260101T090000Z"], OutputFormat::Ical),
            "20260101\n20260101T090000\n20260101T090000Z\n"
        );
    }

    #[test]
    fn utc_lines_convert_zoned_values() {
        assert_eq!(
            rendered(
                &["TZID=America/New_York:20260101T090000", "20260101"],
                OutputFormat::Utc
            ),
            "20260101T140000Z\n20260101\n"
        );
    }

    #[test]
    fn rfc3339_lines() {
        assert_eq!(
            rendered(
                &["TZID=Europe/Berlin:20260701T120000", "20260102"],
                OutputFormat::Rfc3339
            ),
            "2026-07-01T10:00:00+00:00\n2026-01-02\n"
        );
    }

    #[test]
    fn json_array() {
        let text = rendered(
            &["TZID=America/New_York:20260101T090000", "20260102"],
            OutputFormat::Json,
        );
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["ical"], "20260101T090000");
        assert_eq!(value[0]["tzid"], "America/New_York");
        assert_eq!(value[0]["utc"], "2026-01-01T14:00:00Z");
        assert_eq!(value[1]["date"], "2026-01-02");
        assert!(value[1].get("utc").is_none());
    }

    #[test]
    fn unknown_zone_is_a_conversion_error() {
        let occurrences = [ICalTime::parse("TZID=Mars/Olympus_Mons:20260101T090000").unwrap()];
        let err = render(&mut Vec::<u8>::new(), &occurrences, OutputFormat::Utc).unwrap_err();
        assert!(matches!(err, crate::error::AppError::ConversionError(_)));
    }
}
