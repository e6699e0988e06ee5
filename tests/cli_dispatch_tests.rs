use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_tuition")
}

fn fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("fixture should be written");
    path
}

const COURSES_CSV: &str = "UC Code,Course Title,Points,Faculty,Int Fees - 2026,Dom Fees - 2026\n\
ARTS101,Intro,15,Arts,$892.50,$500.00\n\
ARTS102,Unpriced,15,Arts,$0,$500.00\n";

#[test]
fn clean_command_emits_dataset_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "courses.csv", COURSES_CSV);

    let output = Command::new(bin())
        .args(["clean", "courses", path.to_string_lossy().as_ref()])
        .output()
        .expect("clean should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("clean should emit json");
    assert_eq!(payload["kind"], "courses");
    assert_eq!(payload["records"].as_array().map(Vec::len), Some(1));
    assert_eq!(payload["records"][0]["international_fee"], 892);
    assert_eq!(payload["faculties"], serde_json::json!(["Arts"]));
}

#[test]
fn validate_command_reports_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "courses.csv", COURSES_CSV);

    let output = Command::new(bin())
        .args(["validate", "courses", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation ok: rows_read=2 rows_kept=1"));
}

#[test]
fn validate_command_returns_non_zero_on_wrong_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "degrees.csv", COURSES_CSV);

    let output = Command::new(bin())
        .args(["validate", "degrees", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));
    assert!(stderr.contains("Owning Faculty"));
}

#[test]
fn missing_arguments_print_usage() {
    let output = Command::new(bin()).arg("clean").output().expect("clean should run");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: tuition clean"));

    let output = Command::new(bin()).output().expect("binary should run");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: tuition"));
}
