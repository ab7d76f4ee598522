pub mod calculations;
pub mod calendar;
pub mod persistence;
pub mod rule;
pub mod session;
pub mod task;

pub use calculations::{Occurrences, RecurrenceEngine, next, next_all};
pub use calendar::{days_in_month, is_leap_year};
pub use persistence::{
    NamedRule, RuleFileError, RuleFileResult, load_rules_from_json, save_occurrences_to_csv,
    save_rules_to_json, validate_rules,
};
pub use rule::{DayReference, RecurrenceError, RecurrenceRule, RepeatUnit, parse_day};
pub use session::Session;
pub use task::{Task, TaskId};
