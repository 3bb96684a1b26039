use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn hours(config: &str) -> Command {
    let mut cmd = Command::cargo_bin("hours").unwrap();
    cmd.env_remove("HOURS_TIMEZONE")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(fixture(config));
    cmd
}

// Wednesday Feb 18 2026; Rome is UTC+1 in February.
const WED_13_00: &str = "2026-02-18T12:00:00Z";
const WED_16_00: &str = "2026-02-18T15:00:00Z";
const WED_23_00: &str = "2026-02-18T22:00:00Z";
const SAT_23_00: &str = "2026-02-21T22:00:00Z";
const SAT_23_01: &str = "2026-02-21T22:01:00Z";

// ── status ──────────────────────────────────────────────────────────────

#[test]
fn test_status_open() {
    hours("week.toml")
        .args(["status", "--at", WED_13_00])
        .assert()
        .success()
        .stdout("Restaurant is currently open for orders!\n");
}

#[test]
fn test_status_closed_between_services() {
    hours("week.toml")
        .args(["status", "--at", WED_16_00])
        .assert()
        .success()
        .stdout("Restaurant is currently closed. We'll be open Today at 18:00.\n");
}

#[test]
fn test_status_json() {
    let output = hours("week.toml")
        .args(["status", "--json", "--at", WED_16_00])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["isOpen"], false);
    assert_eq!(json["nextOpeningDescription"], "Today at 18:00");
    assert_eq!(
        json["statusMessage"],
        "Restaurant is currently closed. We'll be open Today at 18:00."
    );
}

#[test]
fn test_status_from_json_config() {
    hours("week.json")
        .args(["status", "--at", SAT_23_00])
        .assert()
        .success()
        .stdout(predicate::str::contains("currently open"));
}

#[test]
fn test_status_invalid_at() {
    hours("week.toml")
        .args(["status", "--at", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --at value"));
}

// ── is-open ─────────────────────────────────────────────────────────────

#[test]
fn test_is_open_at_weekend_closing_boundary() {
    hours("week.toml")
        .args(["is-open", "--at", SAT_23_00])
        .assert()
        .success()
        .stdout("open\n");
}

#[test]
fn test_is_open_exit_code_when_closed() {
    hours("week.toml")
        .args(["is-open", "--at", SAT_23_01])
        .assert()
        .code(1)
        .stdout("closed\n");
}

#[test]
fn test_timezone_flag_overrides_config() {
    // 12:00 UTC is 07:00 in New York: before lunch.
    hours("week.toml")
        .args(["--timezone", "America/New_York", "is-open", "--at", WED_13_00])
        .assert()
        .code(1)
        .stdout("closed\n");
}

#[test]
fn test_timezone_env_overrides_config() {
    hours("week.toml")
        .env("HOURS_TIMEZONE", "America/New_York")
        .args(["next", "--at", WED_13_00])
        .assert()
        .success()
        .stdout("Today at 12:00\n");
}

#[test]
fn test_invalid_timezone_flag() {
    hours("week.toml")
        .args(["--timezone", "Atlantis/Capital", "is-open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

// ── next ────────────────────────────────────────────────────────────────

#[test]
fn test_next_after_dinner() {
    hours("week.toml")
        .args(["next", "--at", WED_23_00])
        .assert()
        .success()
        .stdout("Tomorrow at 12:00\n");
}

#[test]
fn test_next_after_saturday_closing() {
    hours("week.toml")
        .args(["next", "--at", SAT_23_01])
        .assert()
        .success()
        .stdout("Tomorrow at 11:00\n");
}

#[test]
fn test_next_named_weekday() {
    // Only Wednesday and Saturday are scheduled in week.json.
    hours("week.json")
        .args(["next", "--at", WED_23_00])
        .assert()
        .success()
        .stdout("Saturday at 11:00\n");
}

#[test]
fn test_next_fallback_for_empty_schedule() {
    hours("empty.toml")
        .args(["next", "--at", WED_13_00])
        .assert()
        .success()
        .stdout("Please check opening hours\n")
        .stderr(predicate::str::contains("no opening found"));
}

// ── validate ────────────────────────────────────────────────────────────

#[test]
fn test_validate_clean_schedule() {
    hours("week.toml")
        .arg("validate")
        .assert()
        .success()
        .stdout("Schedule OK (Europe/Rome)\n");
}

#[test]
fn test_validate_reports_warnings() {
    hours("inverted.toml")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "warning: monday lunch closes (12:00) before it opens (14:30)",
        ))
        .stdout(predicate::str::contains(
            "warning: sunday has no opening hours",
        ));
}

#[test]
fn test_validate_strict_fails_on_warnings() {
    hours("empty.toml")
        .args(["validate", "--strict"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("no day has opening hours"));
}

#[test]
fn test_validate_rejects_wrong_day_shape() {
    hours("broken.toml")
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tuesday expects lunch and dinner ranges"));
}

// ── config handling ─────────────────────────────────────────────────────

#[test]
fn test_missing_config_file() {
    hours("does-not-exist.toml")
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_unsupported_config_extension() {
    let mut cmd = Command::cargo_bin("hours").unwrap();
    cmd.env_remove("HOURS_TIMEZONE")
        .arg("--config")
        .arg(format!("{}/tests/cli.rs", env!("CARGO_MANIFEST_DIR")))
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected .toml or .json"));
}

#[test]
fn test_show_normalizes_schedule() {
    let output = hours("week.toml").arg("show").output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["friday"]["dinner"]["close"], "22:30");
    assert_eq!(json["sunday"]["open"], "11:00");
    assert!(json["sunday"].get("lunch").is_none());
}
