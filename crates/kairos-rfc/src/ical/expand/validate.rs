//! Rule checks that depend on the frequency and on DTSTART.

use super::{ExpansionError, ExpansionResult};
use crate::ical::core::{Frequency, ICalTime, RRule};

fn invalid(message: impl Into<String>) -> ExpansionError {
    ExpansionError::InvalidRule(message.into())
}

/// ## Summary
/// Checks the BYxxx combinations RFC 5545 §3.3.10 allows for the rule's
/// frequency, and the parts a DATE `dtstart` cannot use.
///
/// Returns the rule's frequency.
///
/// ## Errors
/// Returns `ExpansionError::InvalidRule` describing the first violation.
pub fn validate(rule: &RRule, dtstart: &ICalTime) -> ExpansionResult<Frequency> {
    let freq = rule.freq.ok_or_else(|| invalid("FREQ is required"))?;

    if !rule.by_weekno.is_empty() && freq != Frequency::Yearly {
        return Err(invalid(format!("BYWEEKNO cannot be used with FREQ={freq}")));
    }

    if !rule.by_yearday.is_empty()
        && matches!(
            freq,
            Frequency::Daily | Frequency::Weekly | Frequency::Monthly
        )
    {
        return Err(invalid(format!("BYYEARDAY cannot be used with FREQ={freq}")));
    }

    if !rule.by_monthday.is_empty() && freq == Frequency::Weekly {
        return Err(invalid("BYMONTHDAY cannot be used with FREQ=WEEKLY"));
    }

    validate_byday_ordinals(rule, freq)?;

    if !rule.by_setpos.is_empty() && !rule.has_by_parts() {
        return Err(invalid("BYSETPOS requires another BYxxx rule part"));
    }

    if dtstart.is_date() {
        if freq.is_sub_daily() {
            return Err(invalid(format!(
                "FREQ={freq} cannot be used with a DATE start"
            )));
        }
        if !(rule.by_hour.is_empty() && rule.by_minute.is_empty() && rule.by_second.is_empty()) {
            return Err(invalid(
                "BYHOUR, BYMINUTE and BYSECOND cannot be used with a DATE start",
            ));
        }
    }

    Ok(freq)
}

fn validate_byday_ordinals(rule: &RRule, freq: Frequency) -> ExpansionResult<()> {
    let Some(first) = rule.by_day.iter().find(|d| d.ordinal.is_some()) else {
        return Ok(());
    };

    if !matches!(freq, Frequency::Monthly | Frequency::Yearly) {
        return Err(invalid(format!(
            "BYDAY={first} needs FREQ=MONTHLY or FREQ=YEARLY, not FREQ={freq}"
        )));
    }

    if freq == Frequency::Yearly && !rule.by_weekno.is_empty() {
        return Err(invalid(format!("BYDAY={first} cannot be combined with BYWEEKNO")));
    }

    let limit: u8 = if freq == Frequency::Monthly || !rule.by_month.is_empty() {
        5
    } else {
        53
    };
    if let Some(day) = rule
        .by_day
        .iter()
        .find(|d| d.ordinal.is_some_and(|n| n.unsigned_abs() > limit))
    {
        return Err(invalid(format!(
            "BYDAY={day} is outside ±1..={limit} for this rule"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ical::parse::parse_rrule;

    fn check(rule: &str, dtstart: &str) -> ExpansionResult<Frequency> {
        validate(
            &parse_rrule(rule, 1, 1).unwrap(),
            &ICalTime::parse(dtstart).unwrap(),
        )
    }

    #[test]
    fn accepts_rfc_combinations() {
        let ok = [
            "FREQ=YEARLY;BYWEEKNO=20;BYDAY=MO",
            "FREQ=YEARLY;BYYEARDAY=1,100,200",
            "FREQ=YEARLY;BYDAY=20MO",
            "FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU",
            "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1",
            "FREQ=WEEKLY;BYDAY=TU,TH",
            "FREQ=HOURLY;BYYEARDAY=1",
        ];
        for rule in ok {
            assert!(check(rule, "19970101T090000").is_ok(), "{rule}");
        }
    }

    #[test]
    fn rejects_invalid_combinations() {
        let bad = [
            "FREQ=MONTHLY;BYWEEKNO=1",
            "FREQ=MONTHLY;BYYEARDAY=1",
            "FREQ=DAILY;BYYEARDAY=1",
            "FREQ=WEEKLY;BYMONTHDAY=1",
            "FREQ=WEEKLY;BYDAY=1MO",
            "FREQ=DAILY;BYDAY=-1FR",
            "FREQ=YEARLY;BYWEEKNO=1;BYDAY=1MO",
            "FREQ=MONTHLY;BYDAY=6MO",
            "FREQ=YEARLY;BYMONTH=1;BYDAY=-6MO",
            "FREQ=MONTHLY;BYSETPOS=1",
        ];
        for rule in bad {
            let err = check(rule, "19970101T090000").expect_err(rule);
            assert!(matches!(err, ExpansionError::InvalidRule(_)), "{rule}");
        }
    }

    #[test]
    fn date_start_limits() {
        assert!(check("FREQ=DAILY", "19970101").is_ok());
        assert!(check("FREQ=HOURLY", "19970101").is_err());
        assert!(check("FREQ=DAILY;BYHOUR=9", "19970101").is_err());
        assert!(check("FREQ=DAILY;BYHOUR=9", "19970101T000000").is_ok());
    }

    #[test]
    fn missing_freq_on_built_rule() {
        let err = validate(&RRule::new(), &ICalTime::parse("19970101").unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid recurrence rule: FREQ is required");
    }
}
