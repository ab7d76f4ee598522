use crate::rule::{DayReference, RecurrenceRule};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type TaskId = u64;

/// A to-do item that may repeat.
///
/// Only the fields the recurrence engine needs to roll a task forward are
/// modelled here; storing and querying tasks is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// `None` until the owning store assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    pub title: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TaskId>,
    /// Day the task is due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<RecurrenceRule>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            done: false,
            children: Vec::new(),
            when: None,
            repeat: None,
        }
    }

    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn repeating(mut self, rule: RecurrenceRule) -> Self {
        self.repeat = Some(rule);
        self
    }

    pub fn due(mut self, when: NaiveDate) -> Self {
        self.when = Some(when);
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.repeat.is_some()
    }

    /// The next instance of a repeating task: same title and rule, no id, not
    /// done, no children, due on the rule's next occurrence after `reference`.
    ///
    /// `None` for one-off tasks and for series that have ended.
    pub fn next_instance<R: DayReference>(&self, reference: R) -> Option<Task> {
        let rule = self.repeat?;
        let when = rule.next(reference)?;
        Some(Task {
            id: None,
            title: self.title.clone(),
            done: false,
            children: Vec::new(),
            when: Some(when),
            repeat: Some(rule),
        })
    }
}
