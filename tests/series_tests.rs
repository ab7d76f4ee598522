use chrono::NaiveDate;
use tudu::{RecurrenceRule, RepeatUnit};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn series_from_before_start_begins_with_start() {
    let rule = RecurrenceRule::new(d(2023, 9, 12), RepeatUnit::Days, 3).unwrap();
    let dates: Vec<NaiveDate> = rule.occurrences(d(2023, 9, 1)).take(4).collect();
    assert_eq!(
        dates,
        vec![d(2023, 9, 12), d(2023, 9, 15), d(2023, 9, 18), d(2023, 9, 21)]
    );
}

#[test]
fn series_stops_before_until() {
    let rule = RecurrenceRule::new(d(2023, 9, 12), RepeatUnit::Weeks, 1)
        .unwrap()
        .until(d(2023, 10, 3));
    let dates: Vec<NaiveDate> = rule.occurrences(d(2023, 9, 12)).collect();
    assert_eq!(dates, vec![d(2023, 9, 19), d(2023, 9, 26)]);
}

#[test]
fn monthly_series_returns_to_original_day_after_clamping() {
    let rule = RecurrenceRule::new(d(2024, 1, 31), RepeatUnit::Months, 1).unwrap();
    let dates: Vec<NaiveDate> = rule.occurrences(d(2024, 1, 31)).take(4).collect();
    assert_eq!(
        dates,
        vec![d(2024, 2, 29), d(2024, 3, 31), d(2024, 4, 30), d(2024, 5, 31)]
    );
}

#[test]
fn days_of_month_series_only_hits_long_months() {
    let rule = RecurrenceRule::new(d(2024, 1, 31), RepeatUnit::DaysOfMonth, 1).unwrap();
    let dates = rule.occurrences_between(d(2024, 1, 31), d(2025, 1, 1));
    assert_eq!(
        dates,
        vec![
            d(2024, 3, 31),
            d(2024, 5, 31),
            d(2024, 7, 31),
            d(2024, 8, 31),
            d(2024, 10, 31),
            d(2024, 12, 31),
        ]
    );
}

#[test]
fn occurrences_between_excludes_upper_bound() {
    let rule = RecurrenceRule::new(d(2023, 1, 1), RepeatUnit::Years, 1).unwrap();
    let dates = rule.occurrences_between(d(2022, 6, 1), d(2025, 1, 1));
    assert_eq!(dates, vec![d(2023, 1, 1), d(2024, 1, 1)]);
}

#[test]
fn exhausted_series_stays_exhausted() {
    let rule = RecurrenceRule::new(d(2023, 9, 12), RepeatUnit::Days, 1)
        .unwrap()
        .until(d(2023, 9, 13));
    let mut series = rule.occurrences(d(2023, 9, 12));
    assert_eq!(series.next(), None);
    assert_eq!(series.next(), None);
}
