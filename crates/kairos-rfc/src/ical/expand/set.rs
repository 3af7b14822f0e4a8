//! Recurrence sets: DTSTART, RRULEs and RDATEs, minus EXDATEs (RFC 5545 §3.8.5).

use std::collections::{BTreeSet, VecDeque};
use std::iter::{FusedIterator, Peekable};

use chrono::{NaiveDate, NaiveDateTime};

use super::iterator::{IteratorOptions, RRuleIterator};
use super::timezone::TimeZoneResolver;
use super::ExpansionResult;
use crate::ical::core::{ICalTime, RRule};

/// A recurrence set anchored at DTSTART.
///
/// ## Example
///
/// ```rust
/// use kairos_rfc::ical::{ICalTime, RecurrenceSet, parse_rrule};
///
/// let dtstart = ICalTime::parse("20260105T090000").unwrap();
/// let set = RecurrenceSet::new(dtstart)
///     .with_rrule(parse_rrule("FREQ=WEEKLY;COUNT=3", 1, 1).unwrap())
///     .with_exdate(ICalTime::parse("20260112T090000").unwrap())
///     .with_rdate(ICalTime::parse("20260107T120000").unwrap());
///
/// let dates: Vec<String> = set.take(10).unwrap().iter().map(ToString::to_string).collect();
/// assert_eq!(dates, ["20260105T090000", "20260107T120000", "20260119T090000"]);
/// ```
#[derive(Debug, Clone)]
pub struct RecurrenceSet {
    dtstart: ICalTime,
    rrules: Vec<RRule>,
    rdates: Vec<ICalTime>,
    exdates: Vec<ICalTime>,
    include_dtstart: bool,
    options: IteratorOptions,
}

impl RecurrenceSet {
    /// Creates a set holding only DTSTART.
    #[must_use]
    pub fn new(dtstart: ICalTime) -> Self {
        Self {
            dtstart,
            rrules: Vec::new(),
            rdates: Vec::new(),
            exdates: Vec::new(),
            include_dtstart: true,
            options: IteratorOptions::default(),
        }
    }

    #[must_use]
    pub fn with_rrule(mut self, rule: RRule) -> Self {
        self.rrules.push(rule);
        self
    }

    #[must_use]
    pub fn with_rdate(mut self, rdate: ICalTime) -> Self {
        self.rdates.push(rdate);
        self
    }

    #[must_use]
    pub fn with_exdate(mut self, exdate: ICalTime) -> Self {
        self.exdates.push(exdate);
        self
    }

    /// Sets whether DTSTART is emitted even when no rule produces it.
    #[must_use]
    pub const fn include_dtstart(mut self, include: bool) -> Self {
        self.include_dtstart = include;
        self
    }

    #[must_use]
    pub const fn with_options(mut self, options: IteratorOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn dtstart(&self) -> &ICalTime {
        &self.dtstart
    }

    #[must_use]
    pub fn rrules(&self) -> &[RRule] {
        &self.rrules
    }

    /// ## Summary
    /// Creates an iterator over the set in order, without duplicates.
    ///
    /// RDATE and EXDATE values written in another form than DTSTART (UTC
    /// against a zoned start, or another zone) are moved onto DTSTART's
    /// wall clock first.
    ///
    /// ## Errors
    /// Returns an error if a rule is invalid for DTSTART or a TZID cannot be
    /// resolved.
    #[expect(
        clippy::iter_not_returning_iterator,
        reason = "Creating the iterator validates every rule against DTSTART"
    )]
    pub fn iter(&self) -> ExpansionResult<RecurrenceSetIter> {
        let mut resolver = TimeZoneResolver::new();

        let rules = self
            .rrules
            .iter()
            .map(|rule| {
                rule.iter_with_options(&self.dtstart, self.options)
                    .map(Iterator::peekable)
            })
            .collect::<ExpansionResult<Vec<_>>>()?;

        let mut rdates = self
            .rdates
            .iter()
            .map(|rdate| self.align_with(rdate, &mut resolver))
            .collect::<ExpansionResult<Vec<_>>>()?;
        rdates.sort_by_key(ICalTime::naive);
        rdates.dedup_by_key(|rdate| rdate.naive());

        let mut ex_times = BTreeSet::new();
        let mut ex_dates = BTreeSet::new();
        for exdate in &self.exdates {
            let exdate = self.align_with(exdate, &mut resolver)?;
            if exdate.is_date() {
                ex_dates.insert(exdate.date_naive());
            } else {
                ex_times.insert(exdate.naive());
            }
        }

        tracing::debug!(
            dtstart = %self.dtstart,
            rules = rules.len(),
            rdates = rdates.len(),
            exdates = ex_times.len() + ex_dates.len(),
            "Created recurrence set iterator"
        );

        Ok(RecurrenceSetIter {
            dtstart: self.include_dtstart.then(|| self.dtstart.clone()),
            rules,
            rdates: rdates.into(),
            ex_times,
            ex_dates,
            last: None,
        })
    }

    /// ## Summary
    /// Returns the occurrences in `[start, end)`.
    ///
    /// ## Errors
    /// See [`RecurrenceSet::iter`].
    pub fn between(&self, start: &ICalTime, end: &ICalTime) -> ExpansionResult<Vec<ICalTime>> {
        let mut resolver = TimeZoneResolver::new();
        let start = self.align_with(start, &mut resolver)?.naive();
        let end = self.align_with(end, &mut resolver)?.naive();
        Ok(self
            .iter()?
            .skip_while(|occurrence| occurrence.naive() < start)
            .take_while(|occurrence| occurrence.naive() < end)
            .collect())
    }

    /// ## Summary
    /// Returns the occurrences strictly after `after`.
    ///
    /// ## Errors
    /// See [`RecurrenceSet::iter`].
    pub fn after(&self, after: &ICalTime) -> ExpansionResult<impl Iterator<Item = ICalTime>> {
        let after = self.align(after)?.naive();
        Ok(self
            .iter()?
            .skip_while(move |occurrence| occurrence.naive() <= after))
    }

    /// ## Summary
    /// Returns at most `n` occurrences from the start of the set.
    ///
    /// ## Errors
    /// See [`RecurrenceSet::iter`].
    pub fn take(&self, n: usize) -> ExpansionResult<Vec<ICalTime>> {
        Ok(self.iter()?.take(n).collect())
    }

    /// ## Summary
    /// Moves `value` onto DTSTART's form, so its wall clock can be compared
    /// with the set's occurrences. DATE values and values already in
    /// DTSTART's form are returned as they are. A floating DTSTART takes
    /// the wall clock of `value` unchanged.
    ///
    /// ## Errors
    /// Returns `ConversionError::UnknownTimezone` if either TZID cannot be
    /// resolved.
    pub fn align(&self, value: &ICalTime) -> ExpansionResult<ICalTime> {
        self.align_with(value, &mut TimeZoneResolver::new())
    }

    fn align_with(
        &self,
        value: &ICalTime,
        resolver: &mut TimeZoneResolver,
    ) -> ExpansionResult<ICalTime> {
        Ok(value.to_form_of(&self.dtstart, resolver)?)
    }
}

/// Iterator over a [`RecurrenceSet`].
#[derive(Debug)]
pub struct RecurrenceSetIter {
    dtstart: Option<ICalTime>,
    rules: Vec<Peekable<RRuleIterator>>,
    rdates: VecDeque<ICalTime>,
    ex_times: BTreeSet<NaiveDateTime>,
    ex_dates: BTreeSet<NaiveDate>,
    last: Option<NaiveDateTime>,
}

impl RecurrenceSetIter {
    fn is_excluded(&self, candidate: NaiveDateTime) -> bool {
        self.ex_times.contains(&candidate) || self.ex_dates.contains(&candidate.date())
    }

    /// Pops the earliest pending value from every source holding it.
    fn pop_earliest(&mut self) -> Option<ICalTime> {
        let earliest = self
            .dtstart
            .iter()
            .map(ICalTime::naive)
            .chain(
                self.rules
                    .iter_mut()
                    .filter_map(|rule| rule.peek().map(ICalTime::naive)),
            )
            .chain(self.rdates.front().map(ICalTime::naive))
            .min()?;

        let mut popped = self
            .dtstart
            .take_if(|dtstart| dtstart.naive() == earliest);
        for rule in &mut self.rules {
            if let Some(occurrence) = rule.next_if(|occurrence| occurrence.naive() == earliest) {
                popped.get_or_insert(occurrence);
            }
        }
        if self
            .rdates
            .front()
            .is_some_and(|rdate| rdate.naive() == earliest)
            && let Some(rdate) = self.rdates.pop_front()
        {
            popped.get_or_insert(rdate);
        }
        popped
    }
}

impl Iterator for RecurrenceSetIter {
    type Item = ICalTime;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let candidate = self.pop_earliest()?;
            let naive = candidate.naive();
            if self.last == Some(naive) {
                continue;
            }
            self.last = Some(naive);
            if self.is_excluded(naive) {
                tracing::trace!(occurrence = %candidate, "Excluded by EXDATE");
                continue;
            }
            return Some(candidate);
        }
    }
}

impl FusedIterator for RecurrenceSetIter {}
