pub mod next_occurrence;
pub mod series;

pub use next_occurrence::{RecurrenceEngine, next, next_all};
pub use series::Occurrences;
