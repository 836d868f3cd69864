// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use tempfile::TempDir;

use super::*;

fn suite(repo: &Path) -> TfjsSuite {
    TfjsSuite::new(repo, Path::new("/opt/chrome"), &[])
}

#[test]
fn only_webgpu_has_build_steps() {
    let suite = suite(Path::new("/repo"));
    assert!(suite.build_steps(Backend::Webgl).is_empty());

    let steps = suite.build_steps(Backend::Webgpu);
    let lines: Vec<String> = steps.iter().map(CommandSpec::display).collect();
    assert_eq!(
        lines,
        vec!["yarn build", "yarn", "yarn build", "yarn bazel build src:tests"]
    );
    assert_eq!(steps[0].cwd, Some(PathBuf::from("/repo/link-package-core")));
    assert_eq!(steps[3].cwd, Some(PathBuf::from("/repo/tfjs-backend-webgpu")));
}

#[test]
fn webgpu_tests_run_karma_with_filter() {
    let steps = suite(Path::new("/repo")).test_steps(Backend::Webgpu, Some("conv2d"));
    assert_eq!(steps.len(), 1);
    assert_eq!(
        steps[0].display(),
        "yarn karma start --browsers=chrome_webgpu --grep conv2d"
    );
}

#[test]
fn webgl_tests_install_then_test() {
    let steps = suite(Path::new("/repo")).test_steps(Backend::Webgl, None);
    let lines: Vec<String> = steps.iter().map(CommandSpec::display).collect();
    assert_eq!(lines, vec!["yarn", "yarn test"]);
    assert_eq!(steps[1].cwd, Some(PathBuf::from("/repo/tfjs-backend-webgl")));
}

#[test]
fn commands_point_karma_at_browser() {
    let steps = suite(Path::new("/repo")).test_steps(Backend::Webgl, None);
    assert!(steps[1]
        .env
        .contains(&("CHROME_BIN".to_string(), "/opt/chrome".to_string())));
}

#[test]
fn shell_wraps_every_command() {
    let suite = TfjsSuite::new(
        Path::new("/repo"),
        Path::new("/opt/chrome"),
        &["cmd".to_string(), "/c".to_string()],
    );
    let steps = suite.test_steps(Backend::Webgl, Some("nextFrame"));
    assert_eq!(steps[1].display(), "cmd /c yarn test --grep nextFrame");
}

#[test]
fn finish_build_stages_generated_bundle() {
    let temp = TempDir::new().unwrap();
    crate::test_utils::create_tree(
        temp.path(),
        &[
            ("bazel-bin/tfjs-backend-webgpu/src/tests.ts", "generated"),
            ("tfjs-backend-webgpu/src/tests.ts", "stale"),
        ],
    );

    suite(temp.path()).finish_build(Backend::Webgpu, &RunLog::console());

    let staged = temp.path().join("tfjs-backend-webgpu/src/tests.ts");
    assert_eq!(std::fs::read_to_string(staged).unwrap(), "generated");
}
