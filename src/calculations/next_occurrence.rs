use crate::calendar::{add_months_clamped, add_months_exact, shift_month};
use crate::rule::{DayReference, RecurrenceRule, RepeatUnit};
use chrono::{Datelike, Days, NaiveDate};
use rayon::prelude::*;
use tracing::trace;

/// Computes next occurrence dates for a single rule.
///
/// Holds nothing but a borrow of the rule, so it is free to build per query
/// and safe to share across threads.
pub struct RecurrenceEngine<'a> {
    rule: &'a RecurrenceRule,
}

impl<'a> RecurrenceEngine<'a> {
    pub fn new(rule: &'a RecurrenceRule) -> Self {
        Self { rule }
    }

    /// The first occurrence strictly after `reference`, or `None` when the
    /// series has ended.
    ///
    /// `reference` is truncated to its calendar day first. A reference before
    /// the rule's start yields the start itself.
    pub fn next<R: DayReference>(&self, reference: R) -> Option<NaiveDate> {
        let rule = self.rule;
        let today = reference.calendar_day();

        if !rule.admits(today) {
            trace!(%today, until = ?rule.end(), "reference is past the end of the series");
            return None;
        }

        let candidate = if today < rule.start() {
            Some(rule.start())
        } else {
            match rule.unit() {
                RepeatUnit::Days => self.step_days(today, u64::from(rule.interval())),
                RepeatUnit::Weeks => self.step_days(today, u64::from(rule.interval()) * 7),
                RepeatUnit::Months => self.step_months(today, u64::from(rule.interval())),
                RepeatUnit::Years => self.step_months(today, u64::from(rule.interval()) * 12),
                RepeatUnit::DaysOfMonth => self.step_days_of_month(today),
            }
        };

        trace!(%today, rule = %rule, ?candidate, "computed next occurrence");
        candidate.filter(|date| rule.admits(*date))
    }

    /// `start + (passed + 1) * step` days, where `passed` counts the whole
    /// steps elapsed between start and `today`.
    fn step_days(&self, today: NaiveDate, step: u64) -> Option<NaiveDate> {
        let start = self.rule.start();
        let elapsed = u64::try_from((today - start).num_days()).ok()?;
        let passed = elapsed / step;
        let offset = passed.checked_add(1)?.checked_mul(step)?;
        start.checked_add_days(Days::new(offset))
    }

    /// Smallest `start + k * step` months (k >= 1) strictly after `today`,
    /// always measured from start so a clamped month never drags later
    /// occurrences off the original day.
    fn step_months(&self, today: NaiveDate, step: u64) -> Option<NaiveDate> {
        let start = self.rule.start();
        let mut steps = months_between(start, today) / step;
        loop {
            let offset = u32::try_from(steps.checked_mul(step)?).ok()?;
            let candidate = add_months_clamped(start, offset)?;
            if candidate > today {
                return Some(candidate);
            }
            steps += 1;
        }
    }

    /// Like [`Self::step_months`] but on the start's exact day of month,
    /// skipping months that cannot hold it.
    fn step_days_of_month(&self, today: NaiveDate) -> Option<NaiveDate> {
        let start = self.rule.start();
        let step = u64::from(self.rule.interval());
        let mut steps = months_between(start, today) / step;
        loop {
            let offset = u32::try_from(steps.checked_mul(step)?).ok()?;
            let (year, month) = shift_month(start, offset)?;
            // out of chrono's range ends the series
            let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
            if self.rule.end().is_some_and(|until| first_of_month >= until) {
                return None;
            }
            if let Some(candidate) = add_months_exact(start, offset) {
                if candidate > today {
                    return Some(candidate);
                }
            }
            steps += 1;
        }
    }
}

/// Whole calendar months from `from`'s month to `to`'s month (day ignored).
/// Zero when `to` is not after `from`.
fn months_between(from: NaiveDate, to: NaiveDate) -> u64 {
    let months = (i64::from(to.year()) - i64::from(from.year())) * 12
        + i64::from(to.month0())
        - i64::from(from.month0());
    u64::try_from(months).unwrap_or(0)
}

/// Next occurrence of `rule` strictly after `reference`.
pub fn next<R: DayReference>(rule: &RecurrenceRule, reference: R) -> Option<NaiveDate> {
    RecurrenceEngine::new(rule).next(reference)
}

/// Evaluate many rules against one reference date in parallel. Results line
/// up with the input order.
pub fn next_all<R>(rules: &[RecurrenceRule], reference: R) -> Vec<Option<NaiveDate>>
where
    R: DayReference,
{
    let today = reference.calendar_day();
    rules.par_iter().map(|rule| next(rule, today)).collect()
}

impl RecurrenceRule {
    /// See [`RecurrenceEngine::next`].
    pub fn next<R: DayReference>(&self, reference: R) -> Option<NaiveDate> {
        RecurrenceEngine::new(self).next(reference)
    }
}
