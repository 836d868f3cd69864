// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Round scheduler.
//!
//! Repeats the requested targets `repeat` times. Each round gets its own
//! timestamp, output directory, run log and results; nothing but the
//! accumulated trial flags carries over to the next round. Target failures
//! are recorded and never end a round early.

use std::path::PathBuf;
use std::time::Instant;

use crate::collab::{Collaborators, TargetContext};
use crate::config::RunConfig;
use crate::executor::TargetExecutor;
use crate::launch::LaunchArgs;
use crate::report::{RoundReport, RoundResults};
use crate::runlog::RunLog;
use crate::timestamp::{Clock, Timestamp};
use crate::trial;
use crate::unit::UnitSuite;

/// What a finished round produced.
#[derive(Debug)]
pub struct RoundSummary {
    pub timestamp: Timestamp,
    pub round_dir: PathBuf,
    pub results: RoundResults,
    pub duration: String,
    pub browser_args: LaunchArgs,
    /// Whether the round was handed to the report collaborator.
    pub reported: bool,
}

/// State owned by a single round.
struct RoundContext {
    timestamp: Timestamp,
    dir: PathBuf,
    log: RunLog,
    browser_args: LaunchArgs,
    results: RoundResults,
    duration: String,
}

pub struct Scheduler<'a> {
    config: &'a RunConfig,
    collaborators: &'a dyn Collaborators,
    executor: TargetExecutor<'a>,
    clock: &'a dyn Clock,
    /// Trial flags folded in so far; only ever grows.
    trial_flags: LaunchArgs,
}

impl<'a> Scheduler<'a> {
    pub fn new(
        config: &'a RunConfig,
        collaborators: &'a dyn Collaborators,
        unit_suite: &'a dyn UnitSuite,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            config,
            collaborators,
            executor: TargetExecutor::new(collaborators, unit_suite),
            clock,
            trial_flags: LaunchArgs::new(),
        }
    }

    /// Trial flags accumulated across the rounds run so far.
    pub fn trial_flags(&self) -> &LaunchArgs {
        &self.trial_flags
    }

    /// Run the prepare step (unless skipped), then every round.
    pub fn run(&mut self) -> Vec<RoundSummary> {
        if !self.config.skip_prepare
            && let Err(e) = self.collaborators.prepare(self.config)
        {
            tracing::error!("prepare step failed: {e:#}");
        }
        (0..self.config.repeat).map(|i| self.run_round(i)).collect()
    }

    fn run_round(&mut self, index: u32) -> RoundSummary {
        let mut round = self.start_round();
        if self.config.repeat > 1 {
            round.log.log(&format!(
                "== Test round {}/{} ==",
                index + 1,
                self.config.repeat
            ));
        }

        for &target in &self.config.targets {
            let started = Instant::now();
            round.log.log(&format!("{target} test"));
            let ctx = TargetContext {
                config: self.config,
                timestamp: &round.timestamp,
                round_dir: &round.dir,
                browser_args: &round.browser_args,
                log: &round.log,
            };
            if let Some(result) = self.executor.execute(target, &ctx) {
                round.results.insert(target, result);
            }
            round.duration.push_str(&format!(
                "{target}: {:.3} ",
                started.elapsed().as_secs_f64()
            ));
        }

        let reported = self.config.trace_timestamp.is_none();
        if reported {
            let report = RoundReport {
                timestamp: &round.timestamp,
                round: index + 1,
                rounds: self.config.repeat,
                results: &round.results,
                duration: &round.duration,
                browser_args: &round.browser_args,
                repo: round.results.unit().and_then(|u| u.repo.as_ref()),
                config: self.config,
                round_dir: &round.dir,
            };
            if let Err(e) = self.collaborators.report(&report) {
                round.log.error(&format!("report failed: {e:#}"));
            }
        }

        RoundSummary {
            timestamp: round.timestamp,
            round_dir: round.dir,
            results: round.results,
            duration: round.duration,
            browser_args: round.browser_args,
            reported,
        }
    }

    fn start_round(&mut self) -> RoundContext {
        // Reprocessing a historical run: reuse its directory and log as-is.
        if let Some(timestamp) = &self.config.trace_timestamp {
            let dir = self.config.output_root.join(timestamp.as_str());
            let log = RunLog::append(&dir.join(format!("{timestamp}.log")));
            return RoundContext {
                timestamp: timestamp.clone(),
                dir,
                log,
                browser_args: self.config.browser_args.with(self.trial_flags.iter()),
                results: RoundResults::new(),
                duration: String::new(),
            };
        }

        let timestamp = Timestamp::at(self.clock.now(), self.config.timestamp_format);
        let dir = self.config.output_root.join(timestamp.as_str());
        let log = match std::fs::create_dir_all(&dir)
            .and_then(|()| RunLog::create(&dir.join(format!("{timestamp}.log"))))
        {
            Ok(log) => log,
            Err(e) => {
                tracing::error!("failed to set up round directory {}: {e}", dir.display());
                RunLog::console()
            }
        };

        match trial::load(&self.config.trials_path) {
            Ok(trials) => {
                for flag in trial::active_flags(&trials, timestamp.date()) {
                    if !self.trial_flags.contains(flag) {
                        log.log(&format!("trial enabled: {flag}"));
                        self.trial_flags.push(flag);
                    }
                }
            }
            Err(e) => log.warn(&e.to_string()),
        }

        RoundContext {
            browser_args: self.config.browser_args.with(self.trial_flags.iter()),
            timestamp,
            dir,
            log,
            results: RoundResults::new(),
            duration: String::new(),
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
