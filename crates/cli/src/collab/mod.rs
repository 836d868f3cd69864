// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborators: the work the engine schedules but does not implement.
//!
//! Benchmark measurement, demo pages, trace parsing and report rendering
//! sit behind [`Collaborators`]. The engine only invokes them, stores what
//! they return, and turns their errors into failed results.

mod command;

use std::path::Path;

use crate::backend::Target;
use crate::config::RunConfig;
use crate::launch::LaunchArgs;
use crate::report::RoundReport;
use crate::runlog::RunLog;
use crate::timestamp::Timestamp;

pub use command::CommandCollaborators;

/// Per-target view of the current round.
pub struct TargetContext<'a> {
    pub config: &'a RunConfig,
    pub timestamp: &'a Timestamp,
    pub round_dir: &'a Path,
    /// Launch arguments for this round (base plus active trials).
    pub browser_args: &'a LaunchArgs,
    pub log: &'a RunLog,
}

/// External steps invoked by the round scheduler.
pub trait Collaborators {
    /// Optional preparation before the first round (e.g. installing dependencies).
    fn prepare(&self, _config: &RunConfig) -> anyhow::Result<()> {
        Ok(())
    }

    /// Run the conformance or performance benchmark.
    fn run_benchmark(
        &self,
        target: Target,
        ctx: &TargetContext<'_>,
    ) -> anyhow::Result<serde_json::Value>;

    fn run_demo(&self, ctx: &TargetContext<'_>) -> anyhow::Result<serde_json::Value>;

    fn parse_trace(&self, ctx: &TargetContext<'_>) -> anyhow::Result<()>;

    /// Consume a finished round's results.
    fn report(&self, report: &RoundReport<'_>) -> anyhow::Result<()>;
}
