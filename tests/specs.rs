//! Behavioral specifications for the sweep CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, exit codes and the files a run leaves behind.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/run.rs"]
mod run;

#[path = "specs/upload.rs"]
mod upload;

use prelude::*;

#[test]
fn help_exits_successfully() {
    sweep_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("sweep"));
}

#[test]
fn version_exits_successfully() {
    sweep_cmd().arg("--version").assert().success();
}

#[test]
fn subcommand_is_required() {
    sweep_cmd().assert().failure();
}

#[test]
fn unknown_settings_key_is_rejected() {
    let project = Project::empty();
    project.file("sweep.toml", "colour = \"blue\"\n");

    project
        .cmd()
        .args(["run", "--target", "demo"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("invalid settings"));
}
