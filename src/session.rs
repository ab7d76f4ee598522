use crate::persistence::{NamedRule, RuleFileError, RuleFileResult, validate_rules};
use crate::rule::RecurrenceRule;

/// The rules a CLI session is working with, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Session {
    rules: Vec<NamedRule>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[NamedRule] {
        &self.rules
    }

    pub fn get(&self, name: &str) -> Option<&RecurrenceRule> {
        self.rules
            .iter()
            .find(|named| named.name == name)
            .map(|named| &named.rule)
    }

    /// Insert or replace. Returns `true` when an existing rule was replaced.
    pub fn upsert(&mut self, name: &str, rule: RecurrenceRule) -> RuleFileResult<bool> {
        validate_rules(&[NamedRule::new(name, rule)])?;
        if let Some(existing) = self.rules.iter_mut().find(|named| named.name == name) {
            existing.rule = rule;
            return Ok(true);
        }
        self.rules.push(NamedRule::new(name, rule));
        Ok(false)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|named| named.name != name);
        self.rules.len() != before
    }

    /// Swap in a whole rule set, e.g. one loaded from disk.
    pub fn replace_all(&mut self, rules: Vec<NamedRule>) -> RuleFileResult<()> {
        validate_rules(&rules)?;
        self.rules = rules;
        Ok(())
    }

    pub fn require(&self, name: &str) -> RuleFileResult<&RecurrenceRule> {
        self.get(name)
            .ok_or_else(|| RuleFileError::InvalidData(format!("no rule named '{name}'")))
    }
}
