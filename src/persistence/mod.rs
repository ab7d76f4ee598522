use crate::rule::RecurrenceRule;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleFileError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type RuleFileResult<T> = Result<T, RuleFileError>;

/// A rule with the label the user refers to it by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRule {
    pub name: String,
    pub rule: RecurrenceRule,
}

impl NamedRule {
    pub fn new(name: impl Into<String>, rule: RecurrenceRule) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }
}

/// Names must be non-blank, free of whitespace, and unique.
pub fn validate_rules(rules: &[NamedRule]) -> RuleFileResult<()> {
    let mut seen = HashSet::with_capacity(rules.len());
    for (idx, named) in rules.iter().enumerate() {
        if named.name.trim().is_empty() {
            return Err(RuleFileError::InvalidData(format!(
                "rule #{idx} requires a non-empty name"
            )));
        }
        if named.name.chars().any(char::is_whitespace) {
            return Err(RuleFileError::InvalidData(format!(
                "rule name '{}' must not contain whitespace",
                named.name
            )));
        }
        if !seen.insert(named.name.as_str()) {
            return Err(RuleFileError::InvalidData(format!(
                "duplicate rule name '{}'",
                named.name
            )));
        }
    }
    Ok(())
}

pub mod file;

pub use file::{load_rules_from_json, save_occurrences_to_csv, save_rules_to_json};
