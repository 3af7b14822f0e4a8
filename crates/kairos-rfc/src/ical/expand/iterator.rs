//! Lazy occurrence iterator for a single RRULE (RFC 5545 §3.3.10).
//!
//! Expansion walks the rule one period at a time (the year, month, week,
//! day, hour, minute or second the cursor is in). Each period is expanded
//! into its candidate days, filtered by the BYxxx parts, crossed with the
//! period's times, sorted, and reduced by BYSETPOS.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc,
};
use chrono_tz::Tz;
use kairos_core::constants::{DEFAULT_MAX_EMPTY_PERIODS, MAX_YEAR};
use serde::{Deserialize, Serialize};

use super::calendar::{days_in_month, days_in_year, is_nth_in_span, week_number, weeks_in_year};
use super::timezone::{TimeZoneResolver, local_to_utc};
use super::{ExpansionError, ExpansionResult, validate};
use crate::ical::core::{Frequency, ICalTime, RRule, RRuleUntil, Weekday, WeekdayNum};

/// Tuning for [`RRuleIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IteratorOptions {
    /// Consecutive periods without an occurrence before iteration stops.
    pub max_empty_periods: u32,
}

impl IteratorOptions {
    /// Sets how many consecutive empty periods end iteration.
    #[must_use]
    pub const fn with_max_empty_periods(mut self, max_empty_periods: u32) -> Self {
        self.max_empty_periods = max_empty_periods;
        self
    }
}

impl Default for IteratorOptions {
    fn default() -> Self {
        Self {
            max_empty_periods: DEFAULT_MAX_EMPTY_PERIODS,
        }
    }
}

/// UNTIL resolved against the DTSTART it bounds.
#[derive(Debug, Clone, Copy)]
enum UntilBound {
    /// Occurrence dates are compared.
    Date(NaiveDate),
    /// Occurrence wall clocks are compared.
    Local(NaiveDateTime),
    /// Zoned occurrences are compared as instants against a UTC UNTIL.
    Instant { until: DateTime<Utc>, tz: Tz },
}

impl UntilBound {
    fn resolve(until: &RRuleUntil, dtstart: &ICalTime, tz: Option<Tz>) -> ExpansionResult<Self> {
        let invalid = || ExpansionError::InvalidRule(format!("UNTIL={until} is not a valid date"));
        match until {
            RRuleUntil::Date(date) => Ok(Self::Date(date.to_naive().ok_or_else(invalid)?)),
            RRuleUntil::DateTime(datetime) => {
                let naive = datetime.to_naive().ok_or_else(invalid)?;
                if dtstart.is_date() {
                    return Ok(Self::Date(naive.date()));
                }
                Ok(match tz {
                    Some(tz) if datetime.is_utc() => Self::Instant {
                        until: naive.and_utc(),
                        tz,
                    },
                    _ => Self::Local(naive),
                })
            }
        }
    }

    fn is_passed_by(self, candidate: NaiveDateTime) -> bool {
        match self {
            Self::Date(date) => candidate.date() > date,
            Self::Local(until) => candidate > until,
            Self::Instant { until, tz } => {
                local_to_utc(tz, candidate).is_none_or(|instant| instant > until)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrdinalScope {
    Month,
    Year,
}

/// Rule parts with the DTSTART defaults applied.
#[derive(Debug, Clone)]
struct Plan {
    freq: Frequency,
    interval: i64,
    wkst: Weekday,
    months: Vec<u32>,
    weeknos: Vec<i64>,
    yeardays: Vec<i64>,
    monthdays: Vec<i64>,
    weekdays: Vec<WeekdayNum>,
    ordinal_scope: OrdinalScope,
    hours: Vec<u32>,
    minutes: Vec<u32>,
    seconds: Vec<u32>,
    setpos: Vec<i64>,
    start_time: NaiveTime,
}

fn sorted_u32(values: &[u8]) -> Vec<u32> {
    let mut out: Vec<u32> = values.iter().copied().map(u32::from).collect();
    out.sort_unstable();
    out
}

fn widened<T: Copy + Into<i64>>(values: &[T]) -> Vec<i64> {
    values.iter().copied().map(Into::into).collect()
}

impl Plan {
    fn new(rule: &RRule, freq: Frequency, start: NaiveDateTime) -> Self {
        let first_day = start.date();
        let day_selected = !(rule.by_weekno.is_empty()
            && rule.by_yearday.is_empty()
            && rule.by_monthday.is_empty()
            && rule.by_day.is_empty());

        let mut months = sorted_u32(&rule.by_month);
        let mut monthdays = widened(&rule.by_monthday);
        let mut weekdays = rule.by_day.clone();

        // Without day-selecting parts the date comes from DTSTART
        match freq {
            Frequency::Yearly if !day_selected => {
                if months.is_empty() {
                    months = vec![first_day.month()];
                }
                monthdays = vec![i64::from(first_day.day())];
            }
            Frequency::Monthly if !day_selected => {
                monthdays = vec![i64::from(first_day.day())];
            }
            Frequency::Weekly if !day_selected => {
                weekdays = vec![WeekdayNum::every(Weekday::from_chrono(first_day.weekday()))];
            }
            _ => {}
        }

        let ordinal_scope = if freq == Frequency::Monthly
            || (freq == Frequency::Yearly && !rule.by_month.is_empty())
        {
            OrdinalScope::Month
        } else {
            OrdinalScope::Year
        };

        Self {
            freq,
            interval: i64::from(rule.interval_or_default()),
            wkst: rule.week_start(),
            months,
            weeknos: widened(&rule.by_weekno),
            yeardays: widened(&rule.by_yearday),
            monthdays,
            weekdays,
            ordinal_scope,
            hours: sorted_u32(&rule.by_hour),
            minutes: sorted_u32(&rule.by_minute),
            seconds: sorted_u32(&rule.by_second),
            setpos: widened(&rule.by_setpos),
            start_time: start.time(),
        }
    }

    /// Returns the start of period 0: the period containing DTSTART.
    fn anchor(&self, start: NaiveDateTime) -> Option<NaiveDateTime> {
        let date = start.date();
        let midnight = |d: NaiveDate| d.and_time(NaiveTime::MIN);
        Some(match self.freq {
            Frequency::Yearly => midnight(NaiveDate::from_ymd_opt(date.year(), 1, 1)?),
            Frequency::Monthly => midnight(date.with_day(1)?),
            Frequency::Weekly => {
                let back = Weekday::from_chrono(date.weekday()).days_from(self.wkst);
                midnight(date.checked_sub_signed(TimeDelta::days(i64::from(back)))?)
            }
            Frequency::Daily => midnight(date),
            Frequency::Hourly => date.and_hms_opt(start.hour(), 0, 0)?,
            Frequency::Minutely => date.and_hms_opt(start.hour(), start.minute(), 0)?,
            Frequency::Secondly => start.with_nanosecond(0)?,
        })
    }

    fn matches_day(&self, date: NaiveDate) -> bool {
        if !self.months.is_empty() && !self.months.contains(&date.month()) {
            return false;
        }

        if !self.weeknos.is_empty() && !self.matches_weekno(date) {
            return false;
        }

        if !self.yeardays.is_empty() {
            let day = i64::from(date.ordinal());
            let len = i64::from(days_in_year(date.year()));
            if !self.yeardays.iter().any(|&n| n == day || n == day - len - 1) {
                return false;
            }
        }

        if !self.monthdays.is_empty() {
            let day = i64::from(date.day());
            let len = i64::from(days_in_month(date.year(), date.month()));
            if !self.monthdays.iter().any(|&n| n == day || n == day - len - 1) {
                return false;
            }
        }

        self.weekdays.is_empty()
            || self
                .weekdays
                .iter()
                .any(|weekday| self.matches_weekday(*weekday, date))
    }

    fn matches_weekno(&self, date: NaiveDate) -> bool {
        let Some((year, week)) = week_number(date, self.wkst) else {
            return false;
        };
        let Some(weeks) = weeks_in_year(year, self.wkst) else {
            return false;
        };
        self.weeknos
            .iter()
            .any(|&n| n == week || n == week - weeks - 1)
    }

    fn matches_weekday(&self, weekday: WeekdayNum, date: NaiveDate) -> bool {
        if weekday.weekday != Weekday::from_chrono(date.weekday()) {
            return false;
        }
        let Some(ordinal) = weekday.ordinal else {
            return true;
        };
        let (index, len) = match self.ordinal_scope {
            OrdinalScope::Month => (
                i64::from(date.day0()),
                i64::from(days_in_month(date.year(), date.month())),
            ),
            OrdinalScope::Year => (
                i64::from(date.ordinal0()),
                i64::from(days_in_year(date.year())),
            ),
        };
        is_nth_in_span(index, len, i64::from(ordinal))
    }

    /// Returns the times of day a period starting at `period_start` produces.
    ///
    /// Components at or below the frequency come from the period and are
    /// only filtered; coarser components are expanded, defaulting to DTSTART.
    fn times(&self, period_start: NaiveDateTime) -> Vec<NaiveTime> {
        let hours = component(
            &self.hours,
            self.freq <= Frequency::Hourly,
            period_start.hour(),
            self.start_time.hour(),
        );
        let minutes = component(
            &self.minutes,
            self.freq <= Frequency::Minutely,
            period_start.minute(),
            self.start_time.minute(),
        );
        let seconds = component(
            &self.seconds,
            self.freq == Frequency::Secondly,
            period_start.second(),
            self.start_time.second(),
        );

        let mut times = Vec::with_capacity(hours.len() * minutes.len() * seconds.len());
        for hour in hours {
            for &minute in &minutes {
                // Second 60 has no representation and is skipped
                times.extend(
                    seconds
                        .iter()
                        .filter_map(|&second| NaiveTime::from_hms_opt(hour, minute, second)),
                );
            }
        }
        times
    }
}

fn component(values: &[u32], from_period: bool, period_value: u32, default: u32) -> Vec<u32> {
    if from_period {
        if values.is_empty() || values.contains(&period_value) {
            vec![period_value]
        } else {
            Vec::new()
        }
    } else if values.is_empty() {
        vec![default]
    } else {
        values.to_vec()
    }
}

/// Picks BYSETPOS positions (1-based, negative from the end) out of a sorted set.
fn select_positions(set: &[NaiveDateTime], positions: &[i64]) -> Vec<NaiveDateTime> {
    let len = i64::try_from(set.len()).unwrap_or(i64::MAX);
    let mut picked: Vec<NaiveDateTime> = positions
        .iter()
        .filter_map(|&pos| {
            let index = if pos > 0 { pos - 1 } else { len + pos };
            usize::try_from(index).ok().and_then(|i| set.get(i)).copied()
        })
        .collect();
    picked.sort_unstable();
    picked.dedup();
    picked
}

/// Progress of an [`RRuleIterator`], enough to continue it later.
///
/// Taken with [`RRuleIterator::state`] and turned back into an iterator with
/// [`RRuleIterator::resume`]. The rule and times serialize as iCalendar text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IteratorState {
    pub rule: RRule,
    pub dtstart: ICalTime,
    pub options: IteratorOptions,
    /// Index of the next period to expand.
    pub period: i64,
    /// Wall clocks already expanded but not yet produced.
    pub pending: Vec<NaiveDateTime>,
    pub emitted: u32,
    pub empty_periods: u32,
    pub last: Option<ICalTime>,
    pub completed: bool,
}

/// Iterator over the occurrences of one RRULE, in order.
///
/// DTSTART itself is only produced when it matches the rule; use
/// [`super::RecurrenceSet`] for the RFC 5545 set semantics where DTSTART is
/// always the first instance.
///
/// ## Example
///
/// ```rust
/// use kairos_rfc::ical::{ICalTime, parse_rrule};
///
/// let rule = parse_rrule("FREQ=WEEKLY;BYDAY=TU,TH;COUNT=4", 1, 1).unwrap();
/// let dtstart = ICalTime::parse("19970902T090000").unwrap();
/// let dates: Vec<String> = rule.iter(&dtstart).unwrap().map(|t| t.to_string()).collect();
/// assert_eq!(
///     dates,
///     ["19970902T090000", "19970904T090000", "19970909T090000", "19970911T090000"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RRuleIterator {
    rule: RRule,
    dtstart: ICalTime,
    plan: Plan,
    until: Option<UntilBound>,
    options: IteratorOptions,
    anchor: NaiveDateTime,
    period: i64,
    pending: VecDeque<NaiveDateTime>,
    emitted: u32,
    empty_periods: u32,
    last: Option<ICalTime>,
    completed: bool,
}

impl RRuleIterator {
    /// ## Summary
    /// Creates an iterator for `rule` anchored at `dtstart`.
    ///
    /// ## Errors
    /// Returns `ExpansionError::InvalidRule` if the rule fails validation or
    /// its UNTIL is not a real date, `ExpansionError::InvalidDtstart` if
    /// `dtstart` lies past year 9999, and `ExpansionError::Conversion` if the
    /// DTSTART TZID is unknown.
    pub fn new(
        rule: &RRule,
        dtstart: &ICalTime,
        options: IteratorOptions,
    ) -> ExpansionResult<Self> {
        let freq = validate(rule, dtstart).inspect_err(|error| {
            tracing::debug!(%rule, %dtstart, %error, "Rejected recurrence rule");
        })?;

        let start = dtstart.naive();
        if start.year() > MAX_YEAR {
            return Err(ExpansionError::InvalidDtstart(format!(
                "{dtstart} is past year {MAX_YEAR}"
            )));
        }

        let tz = match dtstart.tzid() {
            Some(tzid) if !dtstart.is_date() => Some(TimeZoneResolver::new().resolve(tzid)?),
            _ => None,
        };
        let until = rule
            .until
            .as_ref()
            .map(|until| UntilBound::resolve(until, dtstart, tz))
            .transpose()?;

        let plan = Plan::new(rule, freq, start);
        let anchor = plan.anchor(start).ok_or_else(|| {
            ExpansionError::InvalidDtstart(format!("{dtstart} has no enclosing {freq} period"))
        })?;

        tracing::debug!(%rule, %dtstart, "Created recurrence iterator");

        Ok(Self {
            rule: rule.clone(),
            dtstart: dtstart.clone(),
            plan,
            until,
            options,
            anchor,
            period: 0,
            pending: VecDeque::new(),
            emitted: 0,
            empty_periods: 0,
            last: None,
            completed: false,
        })
    }

    /// ## Summary
    /// Recreates an iterator from a captured [`IteratorState`]. It produces
    /// the same occurrences the captured iterator would have produced next.
    ///
    /// ## Errors
    /// Fails like [`RRuleIterator::new`] for the state's rule and DTSTART,
    /// and with `ExpansionError::InvalidState` if the progress fields cannot
    /// belong to that rule.
    pub fn resume(state: IteratorState) -> ExpansionResult<Self> {
        let mut iter = Self::new(&state.rule, &state.dtstart, state.options)?;

        let start = state.dtstart.naive();
        if state.period < 0 {
            return Err(ExpansionError::InvalidState(format!(
                "negative period index {}",
                state.period
            )));
        }
        if state.pending.iter().any(|candidate| *candidate < start) {
            return Err(ExpansionError::InvalidState(format!(
                "pending occurrence before DTSTART {}",
                state.dtstart
            )));
        }

        iter.period = state.period;
        iter.pending = state.pending.into();
        iter.emitted = state.emitted;
        iter.empty_periods = state.empty_periods;
        iter.last = state.last;
        iter.completed = state.completed;

        tracing::debug!(
            rule = %iter.rule,
            period = iter.period,
            emitted = iter.emitted,
            "Resumed recurrence iterator"
        );
        Ok(iter)
    }

    /// Captures the iterator's progress so it can be resumed later.
    #[must_use]
    pub fn state(&self) -> IteratorState {
        IteratorState {
            rule: self.rule.clone(),
            dtstart: self.dtstart.clone(),
            options: self.options,
            period: self.period,
            pending: self.pending.iter().copied().collect(),
            emitted: self.emitted,
            empty_periods: self.empty_periods,
            last: self.last.clone(),
            completed: self.completed,
        }
    }

    /// Returns the rule being expanded.
    #[must_use]
    pub fn rule(&self) -> &RRule {
        &self.rule
    }

    /// Returns the DTSTART the rule is anchored at.
    #[must_use]
    pub fn dtstart(&self) -> &ICalTime {
        &self.dtstart
    }

    /// Returns whether the iterator has finished.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Returns how many occurrences have been produced so far.
    #[must_use]
    pub fn occurrence_number(&self) -> u32 {
        self.emitted
    }

    /// Returns the most recently produced occurrence.
    #[must_use]
    pub fn last_occurrence(&self) -> Option<&ICalTime> {
        self.last.as_ref()
    }

    /// Returns the start of period `index`, or `None` past year 9999.
    fn period_start(&self, index: i64) -> Option<NaiveDateTime> {
        let step = index.checked_mul(self.plan.interval)?;
        let anchor = self.anchor;
        let start = match self.plan.freq {
            Frequency::Yearly => {
                let year = i32::try_from(i64::from(anchor.year()).checked_add(step)?).ok()?;
                NaiveDate::from_ymd_opt(year, 1, 1)?.and_time(NaiveTime::MIN)
            }
            Frequency::Monthly => {
                let months = i64::from(anchor.year()) * 12 + i64::from(anchor.month0()) + step;
                let year = i32::try_from(months.div_euclid(12)).ok()?;
                let month = u32::try_from(months.rem_euclid(12)).ok()? + 1;
                NaiveDate::from_ymd_opt(year, month, 1)?.and_time(NaiveTime::MIN)
            }
            Frequency::Weekly => {
                anchor.checked_add_signed(TimeDelta::try_days(step.checked_mul(7)?)?)?
            }
            Frequency::Daily => anchor.checked_add_signed(TimeDelta::try_days(step)?)?,
            Frequency::Hourly => anchor.checked_add_signed(TimeDelta::try_hours(step)?)?,
            Frequency::Minutely => anchor.checked_add_signed(TimeDelta::try_minutes(step)?)?,
            Frequency::Secondly => anchor.checked_add_signed(TimeDelta::try_seconds(step)?)?,
        };
        (start.year() <= MAX_YEAR).then_some(start)
    }

    /// Returns the first period index starting at or after `target`.
    /// Only meaningful for sub-daily frequencies.
    fn index_at_or_after(&self, target: NaiveDateTime) -> Option<i64> {
        let unit = match self.plan.freq {
            Frequency::Hourly => 3600,
            Frequency::Minutely => 60,
            _ => 1,
        };
        let step = self.plan.interval.checked_mul(unit)?;
        let elapsed = (target - self.anchor).num_seconds();
        Some(elapsed.checked_add(step - 1)?.div_euclid(step))
    }

    /// For sub-daily frequencies, returns where the next usable period can
    /// begin when the one at `start` lies in an excluded day, hour or minute.
    fn skip_target(&self, start: NaiveDateTime) -> Option<NaiveDateTime> {
        let freq = self.plan.freq;
        if !freq.is_sub_daily() {
            return None;
        }

        let date = start.date();
        if !self.plan.matches_day(date) {
            return date.succ_opt().map(|next| next.and_time(NaiveTime::MIN));
        }

        let allows = |values: &[u32], value: u32| values.is_empty() || values.contains(&value);
        if freq < Frequency::Hourly && !allows(&self.plan.hours, start.hour()) {
            return date
                .and_hms_opt(start.hour(), 0, 0)?
                .checked_add_signed(TimeDelta::hours(1));
        }
        if freq < Frequency::Minutely && !allows(&self.plan.minutes, start.minute()) {
            return date
                .and_hms_opt(start.hour(), start.minute(), 0)?
                .checked_add_signed(TimeDelta::minutes(1));
        }
        None
    }

    /// Expands the period starting at `start` into its sorted occurrence set.
    fn expand_period(&self, start: NaiveDateTime) -> Vec<NaiveDateTime> {
        let times = self.plan.times(start);
        if times.is_empty() {
            return Vec::new();
        }

        let first = start.date();
        let days = match self.plan.freq {
            Frequency::Yearly => days_in_year(first.year()),
            Frequency::Monthly => days_in_month(first.year(), first.month()),
            Frequency::Weekly => 7,
            _ => 1,
        };

        let mut set: Vec<NaiveDateTime> = first
            .iter_days()
            .take(usize::try_from(days).unwrap_or_default())
            .filter(|day| self.plan.matches_day(*day))
            .flat_map(|day| times.iter().map(move |time| day.and_time(*time)))
            .collect();
        set.sort_unstable();
        set.dedup();

        if self.plan.setpos.is_empty() {
            set
        } else {
            select_positions(&set, &self.plan.setpos)
        }
    }

    /// Queues the occurrences of the current period and advances to the
    /// next one. Returns `false` once no further period can produce anything.
    fn fill_period(&mut self) -> bool {
        let Some(start) = self.period_start(self.period) else {
            tracing::debug!(rule = %self.rule, "Expansion reached the last supported year");
            return false;
        };

        if self.until.is_some_and(|until| until.is_passed_by(start)) {
            return false;
        }

        let set = match self.skip_target(start) {
            Some(target) => {
                let Some(next) = self.index_at_or_after(target) else {
                    return false;
                };
                self.period = next.max(self.period + 1);
                Vec::new()
            }
            None => {
                self.period += 1;
                self.expand_period(start)
            }
        };

        let dtstart = self.dtstart.naive();
        self.pending
            .extend(set.into_iter().filter(|candidate| *candidate >= dtstart));

        if self.pending.is_empty() {
            self.empty_periods += 1;
            if self.empty_periods >= self.options.max_empty_periods {
                tracing::debug!(
                    rule = %self.rule,
                    empty_periods = self.empty_periods,
                    "Stopping expansion after consecutive empty periods"
                );
                return false;
            }
        } else {
            self.empty_periods = 0;
        }
        true
    }

    fn finish(&mut self) {
        self.completed = true;
        self.pending.clear();
        tracing::trace!(rule = %self.rule, occurrences = self.emitted, "Recurrence iterator finished");
    }
}

impl Iterator for RRuleIterator {
    type Item = ICalTime;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.completed {
                return None;
            }

            if self.rule.count.is_some_and(|count| self.emitted >= count) {
                self.finish();
                return None;
            }

            if let Some(candidate) = self.pending.pop_front() {
                if self.until.is_some_and(|until| until.is_passed_by(candidate)) {
                    self.finish();
                    return None;
                }
                self.emitted = self.emitted.saturating_add(1);
                let occurrence = self.dtstart.with_naive(candidate);
                self.last = Some(occurrence.clone());
                return Some(occurrence);
            }

            if !self.fill_period() {
                self.finish();
            }
        }
    }
}

impl FusedIterator for RRuleIterator {}

impl RRule {
    /// ## Summary
    /// Creates an iterator over this rule's occurrences from `dtstart`.
    ///
    /// ## Errors
    /// See [`RRuleIterator::new`].
    #[expect(
        clippy::iter_not_returning_iterator,
        reason = "Creating the iterator validates the rule against DTSTART"
    )]
    pub fn iter(&self, dtstart: &ICalTime) -> ExpansionResult<RRuleIterator> {
        RRuleIterator::new(self, dtstart, IteratorOptions::default())
    }

    /// ## Summary
    /// Like [`RRule::iter`], with explicit bounding options.
    ///
    /// ## Errors
    /// See [`RRuleIterator::new`].
    pub fn iter_with_options(
        &self,
        dtstart: &ICalTime,
        options: IteratorOptions,
    ) -> ExpansionResult<RRuleIterator> {
        RRuleIterator::new(self, dtstart, options)
    }

    /// ## Summary
    /// Returns the first occurrence strictly after `after`, or `None` if the
    /// series ends first.
    ///
    /// `after` is moved onto DTSTART's form first, so a UTC bound against a
    /// zoned DTSTART is compared as an instant.
    ///
    /// ## Errors
    /// See [`RRuleIterator::new`]. Also fails if the TZID of `after` cannot
    /// be resolved.
    pub fn next_occurrence(
        &self,
        dtstart: &ICalTime,
        after: &ICalTime,
    ) -> ExpansionResult<Option<ICalTime>> {
        let after = after.to_form_of(dtstart, &mut TimeZoneResolver::new())?.naive();
        Ok(self.iter(dtstart)?.find(|occurrence| occurrence.naive() > after))
    }
}

#[cfg(test)]
#[path = "iterator_tests.rs"]
mod tests;
