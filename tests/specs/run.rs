//! Behavioral specs for `sweep run`.

use crate::prelude::*;

// =============================================================================
// CONFIGURATION ERRORS
// =============================================================================

#[test]
fn empty_target_list_fails_before_any_round() {
    let project = Project::empty();

    project
        .cmd()
        .args(["run", "--target", ","])
        .assert()
        .failure()
        .stderr(predicates::str::contains("no targets requested"));

    assert!(!project.path().join("out").exists());
}

#[test]
fn unknown_target_is_rejected() {
    let project = Project::empty();

    project
        .cmd()
        .args(["run", "--target", "upload"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("unknown target 'upload'"));
}

#[test]
fn unknown_browser_channel_is_rejected() {
    let project = Project::empty();

    project
        .cmd()
        .args(["run", "--target", "demo", "--browser", "firefox"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("unknown browser channel"));
}

#[test]
fn inverted_upload_window_is_rejected() {
    let project = Project::empty();

    project
        .cmd()
        .args([
            "run",
            "--target",
            "demo",
            "--upload-start",
            "20230110",
            "--upload-end",
            "20230101",
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("after it ends"));
}

#[test]
fn unit_target_requires_repository_dir() {
    let project = Project::empty();

    project
        .cmd()
        .args(["run", "--target", "unit"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("tfjs_dir"));
}

// =============================================================================
// ROUNDS
// =============================================================================

#[test]
fn performance_with_zero_iterations_reports_nothing() {
    let project = Project::empty();

    project
        .cmd()
        .args([
            "run",
            "--target",
            "performance",
            "--warmup-times",
            "0",
            "--run-times",
            "0",
            "--timestamp",
            "day",
            "--skip-prepare",
        ])
        .assert()
        .success();

    let rounds = project.rounds();
    assert_eq!(rounds.len(), 1);
    let report = project.report(&rounds[0]);
    assert_eq!(report["results"], serde_json::json!({}));
    assert!(report["duration"].as_str().unwrap().starts_with("performance: "));
}

#[test]
fn missing_collaborator_command_is_recorded_as_failure() {
    let project = Project::empty();

    project
        .cmd()
        .args(["run", "--target", "demo", "--skip-prepare"])
        .assert()
        .success();

    let rounds = project.rounds();
    let report = project.report(&rounds[0]);
    assert_eq!(
        report["results"]["demo"]["error"],
        "no demo command configured"
    );
}

#[cfg(unix)]
#[test]
fn demo_results_come_from_configured_command() {
    let project = Project::empty();
    project.file(
        "sweep.toml",
        r#"
[collaborators]
demo = ["sh", "-c", "echo '{\"fps\": 60}' > \"$SWEEP_RESULT_FILE\""]
"#,
    );

    project
        .cmd()
        .args(["run", "--target", "demo", "--skip-prepare"])
        .assert()
        .success();

    let rounds = project.rounds();
    let report = project.report(&rounds[0]);
    assert_eq!(report["results"]["demo"]["fps"], 60);
}

#[test]
fn fixed_trace_timestamp_writes_no_report() {
    let project = Project::empty();
    project.file("out/20221111101010/20221111101010.log", "");

    project
        .cmd()
        .args([
            "run",
            "--target",
            "trace",
            "--trace-timestamp",
            "20221111101010",
            "--skip-prepare",
        ])
        .assert()
        .success();

    assert!(!project.path().join("out/20221111101010/20221111.json").exists());
    let log = std::fs::read_to_string(project.path().join("out/20221111101010/20221111101010.log"))
        .unwrap();
    assert!(log.contains("trace test"));
}
