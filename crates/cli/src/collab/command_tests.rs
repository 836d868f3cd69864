// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::runlog::RunLog;
use crate::test_utils::test_config;
use crate::timestamp::Timestamp;

fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

struct Fixture {
    temp: TempDir,
    config: RunConfig,
    timestamp: Timestamp,
    round_dir: std::path::PathBuf,
    log: RunLog,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());
        let round_dir = temp.path().join("20230105120000");
        std::fs::create_dir_all(&round_dir).unwrap();
        Self {
            temp,
            config,
            timestamp: "20230105120000".parse().unwrap(),
            round_dir,
            log: RunLog::console(),
        }
    }

    fn ctx(&self) -> TargetContext<'_> {
        TargetContext {
            config: &self.config,
            timestamp: &self.timestamp,
            round_dir: &self.round_dir,
            browser_args: &self.config.browser_args,
            log: &self.log,
        }
    }
}

#[test]
fn missing_command_is_an_error() {
    let fixture = Fixture::new();
    let collab = CommandCollaborators::new(CollaboratorSettings::default(), fixture.temp.path());
    let err = collab.run_demo(&fixture.ctx()).unwrap_err();
    assert_eq!(err.to_string(), "no demo command configured");
}

#[test]
fn missing_prepare_command_is_a_no_op() {
    let fixture = Fixture::new();
    let collab = CommandCollaborators::new(CollaboratorSettings::default(), fixture.temp.path());
    collab.prepare(&fixture.config).unwrap();
}

#[cfg(unix)]
#[test]
fn benchmark_result_file_is_returned() {
    let fixture = Fixture::new();
    let settings = CollaboratorSettings {
        benchmark: sh(r#"printf '{"target":"%s","backends":"%s"}' "$SWEEP_TARGET" "$SWEEP_BACKENDS" > "$SWEEP_RESULT_FILE""#),
        ..CollaboratorSettings::default()
    };
    let collab = CommandCollaborators::new(settings, fixture.temp.path());

    let value = collab.run_benchmark(Target::Performance, &fixture.ctx()).unwrap();

    assert_eq!(value, json!({"target": "performance", "backends": "webgpu,webgl,wasm"}));
}

#[cfg(unix)]
#[test]
fn failing_command_is_an_error() {
    let fixture = Fixture::new();
    let settings = CollaboratorSettings {
        trace: sh("exit 4"),
        ..CollaboratorSettings::default()
    };
    let collab = CommandCollaborators::new(settings, fixture.temp.path());
    let err = collab.parse_trace(&fixture.ctx()).unwrap_err();
    assert!(err.to_string().contains("exited with 4"));
}

#[cfg(unix)]
#[test]
fn command_without_result_file_is_an_error() {
    let fixture = Fixture::new();
    let settings = CollaboratorSettings {
        demo: sh("true"),
        ..CollaboratorSettings::default()
    };
    let collab = CommandCollaborators::new(settings, fixture.temp.path());
    let err = collab.run_demo(&fixture.ctx()).unwrap_err();
    assert!(err.to_string().contains("wrote no results"));
}

#[cfg(unix)]
#[test]
fn earlier_result_file_is_not_reused() {
    let fixture = Fixture::new();
    let stale = fixture.round_dir.join("20230105120000-demo.json");
    std::fs::write(&stale, r#"{"stale":true}"#).unwrap();
    let settings = CollaboratorSettings {
        demo: sh("true"),
        ..CollaboratorSettings::default()
    };
    let collab = CommandCollaborators::new(settings, fixture.temp.path());

    let err = collab.run_demo(&fixture.ctx()).unwrap_err();

    assert!(err.to_string().contains("wrote no results"));
    assert!(!stale.exists());
}

#[test]
fn context_env_describes_round() {
    let fixture = Fixture::new();
    let ctx = fixture.ctx();
    let env = context_env(&ctx, &[Backend::Webgpu]);
    let get = |key: &str| {
        env.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap()
    };
    assert_eq!(get("SWEEP_TIMESTAMP"), "20230105120000");
    assert_eq!(get("SWEEP_BACKENDS"), "webgpu");
    assert_eq!(get("SWEEP_WARMUP"), "50");
    assert_eq!(get("SWEEP_BREAKDOWN"), "1");
    assert!(get("SWEEP_BROWSER_ARGS").starts_with("[\"--"));
}
