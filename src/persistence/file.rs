use super::{NamedRule, RuleFileResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::debug;

#[derive(Serialize, Deserialize)]
struct RuleFileSnapshot {
    #[serde(default)]
    rules: Vec<NamedRule>,
}

pub fn save_rules_to_json<P: AsRef<Path>>(rules: &[NamedRule], path: P) -> RuleFileResult<()> {
    super::validate_rules(rules)?;
    let snapshot = RuleFileSnapshot {
        rules: rules.to_vec(),
    };
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    debug!(path = %path.as_ref().display(), count = rules.len(), "saved rules");
    Ok(())
}

pub fn load_rules_from_json<P: AsRef<Path>>(path: P) -> RuleFileResult<Vec<NamedRule>> {
    let file = File::open(path.as_ref())?;
    let snapshot: RuleFileSnapshot = serde_json::from_reader(file)?;
    super::validate_rules(&snapshot.rules)?;
    debug!(path = %path.as_ref().display(), count = snapshot.rules.len(), "loaded rules");
    Ok(snapshot.rules)
}

#[derive(Serialize)]
struct OccurrenceCsvRecord<'a> {
    name: &'a str,
    date: NaiveDate,
}

/// Write one `name,date` row per occurrence.
pub fn save_occurrences_to_csv<P: AsRef<Path>>(
    name: &str,
    dates: &[NaiveDate],
    path: P,
) -> RuleFileResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for date in dates {
        writer.serialize(OccurrenceCsvRecord { name, date: *date })?;
    }
    writer.flush()?;
    debug!(path = %path.as_ref().display(), count = dates.len(), "exported occurrences");
    Ok(())
}
