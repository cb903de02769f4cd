//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn symcheck() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("symcheck").unwrap()
}

/// Two questions with weights [2, 3] against bounds 2/4/6: answering the
/// first option on Q1 and the second on Q2 scores 5, classified high.
const DEFINITION: &str = r#"{
    "id": "mini-check",
    "title": "Mini Check",
    "questions": [
        {
            "kind": "choice",
            "prompt": "First question",
            "options": [
                {"value": "yes", "weight": 2, "text": "Yes"},
                {"value": "no", "weight": 0, "text": "No"}
            ]
        },
        {
            "kind": "scale",
            "prompt": "Second question",
            "options": [
                {"value": 0, "weight": 0},
                {"value": 3, "weight": 3}
            ]
        }
    ],
    "scoringRules": {
        "low": {"maxScore": 2},
        "moderate": {"maxScore": 4},
        "high": {"maxScore": 6}
    },
    "recommendations": {
        "low": ["Carry on."],
        "moderate": ["Keep an eye on it."],
        "high": ["Get it checked."]
    }
}"#;

fn write_definition(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("quiz.json");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn validate_valid_definition() {
    let dir = TempDir::new().unwrap();
    let path = write_definition(&dir, DEFINITION);

    symcheck()
        .arg("validate")
        .arg("--definition")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mini Check (2 questions)"))
        .stdout(predicate::str::contains("Definition valid"));
}

#[test]
fn validate_nonexistent_file() {
    symcheck()
        .arg("validate")
        .arg("--definition")
        .arg("no_such_quiz.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn validate_malformed_definition() {
    let dir = TempDir::new().unwrap();
    let path = write_definition(&dir, "this is not json");

    symcheck()
        .arg("validate")
        .arg("--definition")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed definition"));
}

#[test]
fn validate_empty_question_set() {
    let dir = TempDir::new().unwrap();
    let path = write_definition(
        &dir,
        r#"{"questions": [], "scoringRules": {
            "low": {"maxScore": 1}, "moderate": {"maxScore": 2}, "high": {"maxScore": 3}
        }}"#,
    );

    symcheck()
        .arg("validate")
        .arg("--definition")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no questions"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = write_definition(
        &dir,
        r#"{"questions": [
            {"kind": "choice", "prompt": "?", "options": [
                {"value": "a", "weight": 0, "text": "A"},
                {"value": "a", "weight": 0, "text": "Also A"}
            ]}
        ], "scoringRules": {
            "low": {"maxScore": 1}, "moderate": {"maxScore": 2}, "high": {"maxScore": 3}
        }}"#,
    );

    symcheck()
        .arg("validate")
        .arg("--definition")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"))
        .stdout(predicate::str::contains("duplicate option value"));
}

#[test]
fn run_completes_a_scripted_session() {
    let dir = TempDir::new().unwrap();
    let path = write_definition(&dir, DEFINITION);

    symcheck()
        .arg("run")
        .arg("--definition")
        .arg(&path)
        .write_stdin("1\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 2"))
        .stdout(predicate::str::contains("Question 2 of 2"))
        .stdout(predicate::str::contains("Score: 5 / 6 (High risk)"))
        .stdout(predicate::str::contains("Get it checked."));
}

#[test]
fn run_with_manual_advance() {
    let dir = TempDir::new().unwrap();
    let path = write_definition(&dir, DEFINITION);

    symcheck()
        .arg("run")
        .arg("--definition")
        .arg(&path)
        .arg("--no-auto-advance")
        .write_stdin("1\n\n2\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Press Enter to continue"))
        .stdout(predicate::str::contains("Score: 5 / 6 (High risk)"));
}

#[test]
fn run_writes_result_json() {
    let dir = TempDir::new().unwrap();
    let path = write_definition(&dir, DEFINITION);
    let output = dir.path().join("result.json");

    symcheck()
        .arg("run")
        .arg("--definition")
        .arg(&path)
        .arg("--output")
        .arg(&output)
        .write_stdin("1\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Result saved to"));

    let result: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(result["tool"], "mini-check");
    assert_eq!(result["score"], 5);
    assert_eq!(result["level"], "high");
    assert_eq!(result["answers"]["0"]["weight"], 2);
}

#[test]
fn run_quits_cleanly() {
    let dir = TempDir::new().unwrap();
    let path = write_definition(&dir, DEFINITION);

    symcheck()
        .arg("run")
        .arg("--definition")
        .arg(&path)
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score").not());
}

#[test]
fn run_rejects_unanswered_advance() {
    let dir = TempDir::new().unwrap();
    let path = write_definition(&dir, DEFINITION);

    symcheck()
        .arg("run")
        .arg("--definition")
        .arg(&path)
        .write_stdin("\n1\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Answer this question first."));
}

#[test]
fn init_creates_starter_definition() {
    let dir = TempDir::new().unwrap();

    symcheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created assessment.json"));

    assert!(dir.path().join("assessment.json").exists());

    // The starter definition must itself validate cleanly.
    symcheck()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--definition")
        .arg("assessment.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Definition valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    symcheck().current_dir(dir.path()).arg("init").assert().success();

    symcheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    symcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Symptom self-assessment quiz runner"));
}

#[test]
fn version_output() {
    symcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("symcheck"));
}
