#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("tudu").expect("tudu binary");
    cmd.env("TUDU_TODAY", "2023-09-14")
        .env_remove("RUST_LOG")
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn cli_next_uses_pinned_today() {
    run_cli("rule plants 2023-09-12 days 3\nnext plants\nquit\n")
        .success()
        .stdout(str_contains("Rule plants added"))
        .stdout(str_contains(
            "Next occurrence of plants after 2023-09-14: 2023-09-15",
        ));
}

#[test]
fn cli_reports_end_of_series() {
    run_cli("rule standup 2023-09-12 days 1 2023-09-14\nnext standup\nquit\n")
        .success()
        .stdout(str_contains("No next occurrence of standup after 2023-09-14."));
}

#[test]
fn cli_rejects_zero_interval() {
    run_cli("rule broken 2023-09-12 days 0\nrules\nquit\n")
        .success()
        .stdout(str_contains("Error: interval must be a whole number"))
        .stdout(str_contains("No rules defined."));
}

#[test]
fn cli_lists_series_with_explicit_reference() {
    run_cli("rule rent 2024-01-31 months 1\nseries rent 3 2024-01-31\nquit\n")
        .success()
        .stdout(str_contains("2024-02-29"))
        .stdout(str_contains("2024-03-31"))
        .stdout(str_contains("2024-04-30"));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "rule keep 2023-09-12 weeks 1\nsave {path}\nrule temp 2023-09-12 days 1\nload {path}\nrules\nquit\n"
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Rules loaded from"), "expected load message:\n{output}");
    let after_reload = output.split("Rules loaded from").last().unwrap_or_default();
    assert!(after_reload.contains("keep"), "saved rule should remain");
    assert!(
        !after_reload.contains("temp "),
        "unsaved rule should not survive reload:\n{after_reload}"
    );
}

#[test]
fn cli_exports_series_to_csv() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().to_string();
    run_cli(&format!(
        "rule weekly 2023-09-12 weeks 1\nexport weekly 2 {path}\nquit\n"
    ))
    .success()
    .stdout(str_contains("Exported 2 occurrence(s)"));
    let text = std::fs::read_to_string(tmp.path()).unwrap();
    assert_eq!(text, "name,date\nweekly,2023-09-19\nweekly,2023-09-26\n");
}
