use crate::calculations::next_occurrence::RecurrenceEngine;
use crate::rule::{DayReference, RecurrenceRule};
use chrono::NaiveDate;
use std::iter::FusedIterator;

/// Successive occurrences of a rule, each one fed back in as the reference
/// for the next. Ends when the rule runs past `until`; unbounded otherwise.
#[derive(Debug, Clone)]
pub struct Occurrences {
    rule: RecurrenceRule,
    cursor: Option<NaiveDate>,
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let reference = self.cursor?;
        let next = RecurrenceEngine::new(&self.rule).next(reference);
        self.cursor = next;
        next
    }
}

impl FusedIterator for Occurrences {}

impl RecurrenceRule {
    /// Occurrences strictly after `from`, in increasing order.
    ///
    /// When `from` is before the start, the start is the first item.
    pub fn occurrences<R: DayReference>(&self, from: R) -> Occurrences {
        Occurrences {
            rule: *self,
            cursor: Some(from.calendar_day()),
        }
    }

    /// Occurrences strictly after `from` and strictly before `to`.
    pub fn occurrences_between<R, S>(&self, from: R, to: S) -> Vec<NaiveDate>
    where
        R: DayReference,
        S: DayReference,
    {
        let to = to.calendar_day();
        self.occurrences(from)
            .take_while(|date| *date < to)
            .collect()
    }
}
