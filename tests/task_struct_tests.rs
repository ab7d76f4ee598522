use chrono::NaiveDate;
use tudu::{RecurrenceRule, RepeatUnit, Task};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn repeating_task_rolls_forward_as_fresh_instance() {
    let rule = RecurrenceRule::new(d(2023, 9, 12), RepeatUnit::Days, 3).unwrap();
    let mut task = Task::new("Water plants")
        .with_id(7)
        .due(d(2023, 9, 12))
        .repeating(rule);
    task.done = true;
    task.children = vec![8, 9];

    let next = task.next_instance(d(2023, 9, 14)).unwrap();
    assert_eq!(next.id, None);
    assert_eq!(next.title, "Water plants");
    assert!(!next.done);
    assert!(next.children.is_empty());
    assert_eq!(next.when, Some(d(2023, 9, 15)));
    assert_eq!(next.repeat, Some(rule));
}

#[test]
fn one_off_task_has_no_next_instance() {
    let task = Task::new("File taxes").due(d(2024, 4, 15));
    assert!(!task.is_recurring());
    assert_eq!(task.next_instance(d(2024, 4, 15)), None);
}

#[test]
fn finished_series_has_no_next_instance() {
    let rule = RecurrenceRule::new(d(2023, 9, 12), RepeatUnit::Days, 1)
        .unwrap()
        .until(d(2023, 9, 14));
    let task = Task::new("Standup").repeating(rule);
    assert_eq!(task.next_instance(d(2023, 9, 14)), None);
}

#[test]
fn task_json_omits_empty_fields() {
    let task = Task::new("Read");
    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value, serde_json::json!({"title": "Read", "done": false}));

    let rule = RecurrenceRule::new(d(2023, 1, 1), RepeatUnit::Months, 1).unwrap();
    let full = Task::new("Rent").with_id(1).due(d(2023, 1, 1)).repeating(rule);
    let text = serde_json::to_string(&full).unwrap();
    let back: Task = serde_json::from_str(&text).unwrap();
    assert_eq!(back, full);
}
