//! Behavioral specs for `sweep upload`.

use crate::prelude::*;

#[test]
fn upload_requires_remote_host() {
    let project = Project::empty();
    project.file("out/20230101/20230101.json", "{}");

    project
        .cmd()
        .arg("upload")
        .assert()
        .failure()
        .stderr(predicates::str::contains("remote.host"));
}

#[test]
fn inverted_window_is_rejected() {
    let project = Project::empty();

    project
        .cmd()
        .args(["upload", "--upload-start", "20230105", "--upload-end", "20230101"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("after it ends"));
}

#[test]
fn run_with_upload_requires_device_id() {
    let project = Project::empty();
    project.file(
        "sweep.toml",
        r#"
[remote]
host = "perf@archive.invalid"
root = "/srv/perf"
"#,
    );

    project
        .cmd()
        .args(["run", "--target", "demo", "--skip-prepare", "--upload"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("device_id"));
}
