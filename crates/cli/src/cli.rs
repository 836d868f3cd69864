// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::RawOptions;
use crate::timestamp::TimestampFormat;

/// Repeated browser test runs across targets and backends, with artifact upload
#[derive(Parser)]
#[command(name = "sweep")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific settings file
    #[arg(short = 'C', long = "config", global = true, env = "SWEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run test rounds
    Run(Box<RunArgs>),
    /// Upload dated results to the remote archive
    Upload(UploadArgs),
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Targets to run, comma separated (conformance, performance, unit, trace, demo)
    #[arg(long, value_name = "LIST")]
    pub target: Option<String>,

    /// Browser channel (chrome_canary, chrome_dev, chrome_beta, chrome_stable) or executable path
    #[arg(long, value_name = "CHANNEL|PATH")]
    pub browser: Option<String>,

    /// Extra browser launch arguments, space separated
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub browser_args: Option<String>,

    /// Backends for conformance tests
    #[arg(long, value_name = "LIST")]
    pub conformance_backend: Option<String>,

    /// Backends for performance tests
    #[arg(long, value_name = "LIST")]
    pub performance_backend: Option<String>,

    /// Backends for unit tests (webgpu, webgl)
    #[arg(long, value_name = "LIST")]
    pub unit_backend: Option<String>,

    /// Warmup iterations per benchmark
    #[arg(long, value_name = "N")]
    pub warmup_times: Option<u32>,

    /// Measured iterations per benchmark
    #[arg(long, value_name = "N")]
    pub run_times: Option<u32>,

    /// Profiled iterations per benchmark
    #[arg(long, value_name = "N")]
    pub profile_times: Option<u32>,

    /// Number of rounds
    #[arg(long, default_value_t = 1, value_name = "N")]
    pub repeat: u32,

    /// Precision of the round timestamp
    #[arg(long, default_value = "second")]
    pub timestamp: TimestampFormat,

    /// Reuse an existing round directory for trace parsing (no report)
    #[arg(long, value_name = "TIMESTAMP")]
    pub trace_timestamp: Option<String>,

    /// Output root for round directories
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Trial definition file
    #[arg(long, value_name = "FILE")]
    pub trials: Option<PathBuf>,

    /// Quick pass: short unit timeout and a filtered unit suite
    #[arg(long)]
    pub dryrun: bool,

    /// Capture traces (forces a new browser context, disables breakdown)
    #[arg(long)]
    pub trace: bool,

    /// Skip the per-op breakdown in performance runs
    #[arg(long)]
    pub disable_breakdown: bool,

    /// Open each benchmark in a new browser context
    #[arg(long)]
    pub new_context: bool,

    /// Benchmark page URL
    #[arg(long)]
    pub url: Option<String>,

    /// Extra URL query arguments, appended verbatim
    #[arg(long, value_name = "ARGS")]
    pub url_args: Option<String>,

    /// Packages served from a local build
    #[arg(long, value_name = "LIST")]
    pub local_build: Option<String>,

    /// Repository checkout whose unit tests are run
    #[arg(long, value_name = "DIR")]
    pub tfjs_dir: Option<PathBuf>,

    /// Only run unit tests matching this name
    #[arg(long, value_name = "PATTERN")]
    pub unit_filter: Option<String>,

    /// Skip the unit build phase
    #[arg(long)]
    pub unit_skip_build: bool,

    /// Stop a benchmark on the first page error
    #[arg(long)]
    pub quit_pageerror: bool,

    /// Pause each benchmark page before it runs
    #[arg(long)]
    pub pause_test: bool,

    /// Log server information from benchmark pages
    #[arg(long)]
    pub server_info: bool,

    /// Kill running browser processes before starting
    #[arg(long)]
    pub kill_browser: bool,

    /// Skip the prepare step
    #[arg(long)]
    pub skip_prepare: bool,

    /// Upload results after the last round
    #[arg(long)]
    pub upload: bool,

    #[command(flatten)]
    pub window: WindowArgs,
}

impl RunArgs {
    /// Collect the raw option bag for config resolution.
    pub fn raw_options(&self) -> RawOptions {
        RawOptions {
            browser: self.browser.clone(),
            browser_args: self.browser_args.clone(),
            warmup_times: self.warmup_times,
            run_times: self.run_times,
            profile_times: self.profile_times,
            targets: self.target.clone(),
            conformance_backends: self.conformance_backend.clone(),
            performance_backends: self.performance_backend.clone(),
            unit_backends: self.unit_backend.clone(),
            output_dir: self.output_dir.clone(),
            trials: self.trials.clone(),
            upload_start: self.window.upload_start,
            upload_end: self.window.upload_end,
            trace_timestamp: self.trace_timestamp.clone(),
            timestamp_format: self.timestamp,
            repeat: self.repeat,
            dryrun: self.dryrun,
            trace: self.trace,
            disable_breakdown: self.disable_breakdown,
            new_context: self.new_context,
            url: self.url.clone(),
            url_args: self.url_args.clone(),
            local_build: self.local_build.clone(),
            tfjs_dir: self.tfjs_dir.clone(),
            unit_filter: self.unit_filter.clone(),
            unit_skip_build: self.unit_skip_build,
            quit_pageerror: self.quit_pageerror,
            pause_test: self.pause_test,
            server_info: self.server_info,
            kill_browser: self.kill_browser,
            skip_prepare: self.skip_prepare,
        }
    }
}

#[derive(clap::Args)]
pub struct UploadArgs {
    /// Output root holding round directories
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub window: WindowArgs,
}

/// Inclusive date range of results to upload.
#[derive(clap::Args, Clone, Copy)]
pub struct WindowArgs {
    /// First date to upload (YYYYMMDD)
    #[arg(long, value_name = "DATE")]
    pub upload_start: Option<u32>,

    /// Last date to upload (YYYYMMDD)
    #[arg(long, value_name = "DATE")]
    pub upload_end: Option<u32>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
