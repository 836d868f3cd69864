// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

use std::path::Path;

use anyhow::Context;

use sweep::cli::{Cli, RunArgs};
use sweep::collab::CommandCollaborators;
use sweep::config::{self, HostDirs, Platform, RunConfig};
use sweep::process::{self, CommandSpec};
use sweep::scheduler::Scheduler;
use sweep::timestamp::SystemClock;
use sweep::unit::TfjsSuite;

use crate::cmd_upload;

/// Run the requested rounds, then upload if asked.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<()> {
    let settings = crate::load_settings(cli)?;
    let config = config::resolve(
        &args.raw_options(),
        &settings,
        Platform::current(),
        &HostDirs::from_env(),
    )
    .context("invalid run configuration")?;
    tracing::debug!(
        "browser {} (profile {})",
        config.browser.executable.display(),
        config.browser.user_data_dir.display()
    );

    if config.kill_browser {
        kill_browser(&config);
    }

    let repo_dir = config.unit.repo_dir.as_deref().unwrap_or(Path::new("."));
    let suite = TfjsSuite::new(repo_dir, &config.browser.executable, &config.unit.shell);
    let collaborators =
        CommandCollaborators::new(settings.collaborators.clone(), &settings.base_dir);

    let rounds = Scheduler::new(&config, &collaborators, &suite, &SystemClock).run();
    for (i, round) in rounds.iter().enumerate() {
        let failed = round.results.targets().filter(|t| {
            round.results.get(*t).is_some_and(|r| r.is_failed())
        });
        let failed: Vec<String> = failed.map(|t| t.to_string()).collect();
        if failed.is_empty() {
            tracing::info!("round {} ({}) done: {}", i + 1, round.timestamp, round.duration.trim_end());
        } else {
            tracing::warn!(
                "round {} ({}) done with failures in {}",
                i + 1,
                round.timestamp,
                failed.join(", ")
            );
        }
    }

    if args.upload {
        cmd_upload::upload(&settings, &config.output_root, config.upload_window, config.platform)?;
    }
    Ok(())
}

/// Terminate running browser processes so the run starts from a clean state.
fn kill_browser(config: &RunConfig) {
    let spec = match config.platform {
        Platform::Windows => {
            CommandSpec::new("taskkill").args(["/F", "/IM", "chrome.exe", "/T"])
        }
        _ => CommandSpec::new("pkill").args([
            "-f".to_string(),
            config.browser.executable.display().to_string(),
        ]),
    };
    let log_file = config.output_root.join("kill-browser.txt");
    let outcome = process::run(&spec, &log_file, None);
    // pkill exits 1 when nothing matched.
    if outcome.error.is_some() {
        tracing::warn!("failed to kill browser: {}", outcome.describe());
    }
}
