use chrono::{Local, NaiveDate};
use std::io::{self, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tudu::{
    RecurrenceRule, RepeatUnit, Session, load_rules_from_json, parse_day, save_occurrences_to_csv,
    save_rules_to_json,
};

const TODAY_ENV: &str = "TUDU_TODAY";

fn print_help() {
    println!(
        "Commands:\n  help                                     Show this help\n  units                                    List repeat units\n  rules                                    List rules in this session\n  rule <name> <start> <unit> <interval> [until]\n                                           Define or replace a rule (dates YYYY-MM-DD)\n  drop <name>                              Remove a rule\n  next <name> [date]                       Next occurrence after date (default today)\n  series <name> <count> [date]             Next <count> occurrences after date\n  export <name> <count> <csv_path> [date]  Write occurrences to CSV\n  today                                    Show the default reference date\n  save <json_path>                         Save rules to JSON\n  load <json_path>                         Load rules from JSON\n  quit|exit                                Exit"
    );
}

fn print_units() {
    println!("Available repeat units:");
    for (key, description) in RepeatUnit::variants() {
        println!("  {:<16} {}", key, description);
    }
}

fn print_rules(session: &Session) {
    if session.rules().is_empty() {
        println!("No rules defined.");
        return;
    }
    for named in session.rules() {
        println!("  {:<16} {}", named.name, named.rule);
    }
}

/// `TUDU_TODAY` pins the reference date; otherwise the local calendar day.
fn today() -> NaiveDate {
    match std::env::var(TODAY_ENV) {
        Ok(raw) => match parse_day(&raw) {
            Ok(date) => date,
            Err(e) => {
                warn!(error = %e, "ignoring {TODAY_ENV}");
                Local::now().date_naive()
            }
        },
        Err(_) => Local::now().date_naive(),
    }
}

fn reference_or_today(arg: Option<&str>) -> Result<NaiveDate, String> {
    match arg {
        Some(raw) => parse_day(raw).map_err(|e| e.to_string()),
        None => Ok(today()),
    }
}

fn parse_rule(
    start_s: &str,
    unit_s: &str,
    interval_s: &str,
    until_s: Option<&str>,
) -> Result<RecurrenceRule, String> {
    let start = parse_day(start_s).map_err(|e| e.to_string())?;
    let unit: RepeatUnit = unit_s.parse().map_err(|e: tudu::RecurrenceError| e.to_string())?;
    let interval: i64 = interval_s
        .parse()
        .map_err(|_| format!("Invalid interval '{interval_s}'"))?;
    let interval = u32::try_from(interval)
        .map_err(|_| tudu::RecurrenceError::InvalidInterval(interval).to_string())?;
    let rule = RecurrenceRule::new(start, unit, interval).map_err(|e| e.to_string())?;
    match until_s {
        Some(raw) => Ok(rule.until(parse_day(raw).map_err(|e| e.to_string())?)),
        None => Ok(rule),
    }
}

fn parse_count(s: &str) -> Result<usize, String> {
    s.parse::<usize>()
        .map_err(|_| format!("Invalid count '{s}'"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tudu=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut session = Session::new();
    info!(today = %today(), "starting session");

    println!("tudu recurrence CLI - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "units" => print_units(),
            "rules" => print_rules(&session),
            "today" => println!("Today is {}", today()),
            "rule" => {
                let name = parts.next();
                let start_s = parts.next();
                let unit_s = parts.next();
                let interval_s = parts.next();
                let until_s = parts.next();
                match (name, start_s, unit_s, interval_s) {
                    (Some(name), Some(start_s), Some(unit_s), Some(interval_s)) => {
                        let rule = match parse_rule(start_s, unit_s, interval_s, until_s) {
                            Ok(rule) => rule,
                            Err(e) => {
                                println!("Error: {e}");
                                continue;
                            }
                        };
                        match session.upsert(name, rule) {
                            Ok(true) => println!("Rule {name} replaced: {rule}"),
                            Ok(false) => println!("Rule {name} added: {rule}"),
                            Err(e) => println!("Error: {e}"),
                        }
                        if !rule.has_occurrences() {
                            println!("Warning: rule {name} ends before it starts and never occurs.");
                        }
                    }
                    _ => println!("Usage: rule <name> <start> <unit> <interval> [until]"),
                }
            }
            "drop" => match parts.next() {
                Some(name) => {
                    if session.remove(name) {
                        println!("Dropped rule {name}.");
                    } else {
                        println!("Rule {name} not found.");
                    }
                }
                None => println!("Usage: drop <name>"),
            },
            "next" => {
                let name = match parts.next() {
                    Some(name) => name,
                    None => {
                        println!("Usage: next <name> [date]");
                        continue;
                    }
                };
                let reference = match reference_or_today(parts.next()) {
                    Ok(date) => date,
                    Err(e) => {
                        println!("Error: {e}");
                        continue;
                    }
                };
                match session.require(name) {
                    Ok(rule) => match rule.next(reference) {
                        Some(date) => println!("Next occurrence of {name} after {reference}: {date}"),
                        None => println!("No next occurrence of {name} after {reference}."),
                    },
                    Err(e) => println!("Error: {e}"),
                }
            }
            "series" | "export" => {
                let name = parts.next();
                let count_s = parts.next();
                let path = if cmd == "export" { parts.next() } else { None };
                let usage = if cmd == "export" {
                    "Usage: export <name> <count> <csv_path> [date]"
                } else {
                    "Usage: series <name> <count> [date]"
                };
                let (name, count_s) = match (name, count_s) {
                    (Some(name), Some(count_s)) if cmd == "series" || path.is_some() => {
                        (name, count_s)
                    }
                    _ => {
                        println!("{usage}");
                        continue;
                    }
                };
                let parsed = parse_count(count_s)
                    .and_then(|count| Ok((count, reference_or_today(parts.next())?)));
                let (count, reference) = match parsed {
                    Ok(v) => v,
                    Err(e) => {
                        println!("Error: {e}");
                        continue;
                    }
                };
                let rule = match session.require(name) {
                    Ok(rule) => *rule,
                    Err(e) => {
                        println!("Error: {e}");
                        continue;
                    }
                };
                let dates: Vec<NaiveDate> = rule.occurrences(reference).take(count).collect();
                if dates.len() < count {
                    println!(
                        "Series {name} ends after {} occurrence(s).",
                        dates.len()
                    );
                }
                match path {
                    Some(path) => match save_occurrences_to_csv(name, &dates, path) {
                        Ok(_) => println!("Exported {} occurrence(s) to {path}", dates.len()),
                        Err(e) => println!("Export error: {e}"),
                    },
                    None => {
                        for date in &dates {
                            println!("  {date}");
                        }
                    }
                }
            }
            "save" => match parts.next() {
                Some(path) => match save_rules_to_json(session.rules(), path) {
                    Ok(_) => println!("Rules saved to {path}"),
                    Err(e) => println!("Save error: {e}"),
                },
                None => println!("Usage: save <json_path>"),
            },
            "load" => match parts.next() {
                Some(path) => match load_rules_from_json(path)
                    .and_then(|rules| session.replace_all(rules))
                {
                    Ok(_) => {
                        println!("Rules loaded from {path}");
                        print_rules(&session);
                    }
                    Err(e) => println!("Load error: {e}"),
                },
                None => println!("Usage: load <json_path>"),
            },
            _ => println!("Unknown command '{cmd}'. Type 'help' for commands."),
        }
    }
}
