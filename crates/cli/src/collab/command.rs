// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborators bound to external commands from `sweep.toml`.
//!
//! Each command receives the round context as `SWEEP_*` environment
//! variables and, where results are expected, writes JSON to the file named
//! by `SWEEP_RESULT_FILE`. Reports are written by [`JsonReporter`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};

use crate::backend::{Backend, Target};
use crate::config::RunConfig;
use crate::config::settings::CollaboratorSettings;
use crate::process::{self, CommandSpec};
use crate::report::{JsonReporter, RoundReport};

use super::{Collaborators, TargetContext};

pub struct CommandCollaborators {
    commands: CollaboratorSettings,
    working_dir: PathBuf,
    timeout: Option<Duration>,
}

impl CommandCollaborators {
    pub fn new(commands: CollaboratorSettings, working_dir: &Path) -> Self {
        let timeout = commands.timeout_secs.map(Duration::from_secs);
        Self {
            commands,
            working_dir: working_dir.to_path_buf(),
            timeout,
        }
    }

    /// Run a configured step for `name`, returning its JSON output if `expect_result`.
    fn invoke(
        &self,
        name: &str,
        argv: &[String],
        backends: &[Backend],
        ctx: &TargetContext<'_>,
        expect_result: bool,
    ) -> anyhow::Result<Option<serde_json::Value>> {
        let Some(spec) = CommandSpec::from_argv(argv) else {
            bail!("no {name} command configured");
        };
        let result_file = ctx.round_dir.join(format!("{}-{name}.json", ctx.timestamp));
        let log_file = ctx.round_dir.join(format!("{}-{name}.txt", ctx.timestamp));

        let mut spec = spec
            .current_dir(&self.working_dir)
            .env("SWEEP_TARGET", name)
            .env("SWEEP_RESULT_FILE", result_file.display().to_string());
        spec.env.extend(context_env(ctx, backends));

        // A result left by an earlier run in the same directory must not be
        // read back as this run's result.
        match std::fs::remove_file(&result_file) {
            Ok(()) => ctx.log.log(&format!("removed stale {}", result_file.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => bail!("failed to remove stale {}: {e}", result_file.display()),
        }

        ctx.log.log(&format!("run {name}: {}", spec.display()));
        let outcome = process::run(&spec, &log_file, self.timeout);
        if !outcome.success() {
            bail!(
                "{name} step {} (see {})",
                outcome.describe(),
                log_file.display()
            );
        }
        if !expect_result {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&result_file)
            .with_context(|| format!("{name} step wrote no results to {}", result_file.display()))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("invalid {name} results in {}", result_file.display()))?;
        Ok(Some(value))
    }
}

impl Collaborators for CommandCollaborators {
    fn prepare(&self, config: &RunConfig) -> anyhow::Result<()> {
        let Some(spec) = CommandSpec::from_argv(&self.commands.prepare) else {
            return Ok(());
        };
        let spec = spec.current_dir(&self.working_dir);
        let log_file = config.output_root.join("prepare.log");
        let outcome = process::run(&spec, &log_file, self.timeout);
        if !outcome.success() {
            bail!("prepare step {} (see {})", outcome.describe(), log_file.display());
        }
        Ok(())
    }

    fn run_benchmark(
        &self,
        target: Target,
        ctx: &TargetContext<'_>,
    ) -> anyhow::Result<serde_json::Value> {
        let backends = match target {
            Target::Conformance => &ctx.config.backends.conformance,
            _ => &ctx.config.backends.performance,
        };
        let value = self.invoke(target.as_str(), &self.commands.benchmark, backends, ctx, true)?;
        Ok(value.unwrap_or_default())
    }

    fn run_demo(&self, ctx: &TargetContext<'_>) -> anyhow::Result<serde_json::Value> {
        let value = self.invoke("demo", &self.commands.demo, &[], ctx, true)?;
        Ok(value.unwrap_or_default())
    }

    fn parse_trace(&self, ctx: &TargetContext<'_>) -> anyhow::Result<()> {
        let backends = &ctx.config.backends.performance;
        self.invoke("trace", &self.commands.trace, backends, ctx, false)?;
        Ok(())
    }

    fn report(&self, report: &RoundReport<'_>) -> anyhow::Result<()> {
        let path = JsonReporter.write(report)?;
        tracing::info!("report written to {}", path.display());
        Ok(())
    }
}

/// Environment describing the round to a collaborator command.
fn context_env(ctx: &TargetContext<'_>, backends: &[Backend]) -> Vec<(String, String)> {
    let config = ctx.config;
    let flag = |b: bool| if b { "1" } else { "0" }.to_string();
    let backends: Vec<&str> = backends.iter().map(Backend::as_str).collect();
    let browser_args =
        serde_json::to_string(ctx.browser_args.as_slice()).unwrap_or_else(|_| "[]".to_string());

    let mut env = vec![
        ("SWEEP_TIMESTAMP", ctx.timestamp.to_string()),
        ("SWEEP_OUT_DIR", ctx.round_dir.display().to_string()),
        ("SWEEP_BROWSER", config.browser.executable.display().to_string()),
        ("SWEEP_USER_DATA_DIR", config.browser.user_data_dir.display().to_string()),
        ("SWEEP_BROWSER_ARGS", browser_args),
        ("SWEEP_URL_ARGS", config.url_query.clone()),
        ("SWEEP_BACKENDS", backends.join(",")),
        ("SWEEP_WARMUP", config.counts.warmup.to_string()),
        ("SWEEP_RUN", config.counts.run.to_string()),
        ("SWEEP_PROFILE", config.counts.profile.to_string()),
        ("SWEEP_BREAKDOWN", flag(config.breakdown)),
        ("SWEEP_TRACE", flag(config.trace)),
        ("SWEEP_DRYRUN", flag(config.dryrun)),
        ("SWEEP_NEW_CONTEXT", flag(config.page.new_context)),
        ("SWEEP_QUIT_PAGEERROR", flag(config.page.quit_pageerror)),
        ("SWEEP_PAUSE_TEST", flag(config.page.pause_test)),
        ("SWEEP_SERVER_INFO", flag(config.page.server_info)),
    ];
    if let Some(url) = &config.url {
        env.push(("SWEEP_URL", url.clone()));
    }
    env.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
