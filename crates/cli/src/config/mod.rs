// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run configuration resolution.
//!
//! [`resolve`] turns the raw option bag (command line plus `sweep.toml`) into
//! an immutable [`RunConfig`]. Everything downstream borrows the config; any
//! per-round state lives in the scheduler's round context instead.

pub mod browser;
pub mod defaults;
pub mod settings;

use std::path::{Path, PathBuf};
use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::backend::{Backend, Target, split_list};
use crate::launch::LaunchArgs;
use crate::sync::DateWindow;
use crate::timestamp::{Timestamp, TimestampFormat};

pub use browser::{BrowserLocation, Channel, HostDirs, Platform, resolve_browser};
pub use settings::Settings;

/// Characters left unescaped in URL query values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b',')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

/// Fatal configuration problems. No round is attempted after one of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown browser channel '{0}' (expected chrome_canary, chrome_dev, chrome_beta or chrome_stable, or a path)")]
    UnknownChannel(String),

    #[error("no {channel} install location is known for {platform}")]
    UnsupportedPlatform { channel: String, platform: String },

    #[error("browser executable not found at {}", .0.display())]
    MissingBrowserPath(PathBuf),

    #[error("{0} is required but was not configured")]
    MissingPath(&'static str),

    #[error("no targets requested")]
    EmptyTargets,

    #[error("unknown target '{0}'")]
    UnknownTarget(String),

    #[error("unknown backend '{0}'")]
    UnknownBackend(String),

    #[error("backend '{0}' has no unit test suite")]
    UnsupportedUnitBackend(Backend),

    #[error("upload window starts ({start}) after it ends ({end})")]
    InvalidWindow { start: u32, end: u32 },

    #[error("invalid trace timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Raw, unvalidated options as collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    /// Browser channel name or an executable path.
    pub browser: Option<String>,
    pub browser_args: Option<String>,
    pub warmup_times: Option<u32>,
    pub run_times: Option<u32>,
    pub profile_times: Option<u32>,
    /// Comma-separated targets (None = default set).
    pub targets: Option<String>,
    pub conformance_backends: Option<String>,
    pub performance_backends: Option<String>,
    pub unit_backends: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub trials: Option<PathBuf>,
    pub upload_start: Option<u32>,
    pub upload_end: Option<u32>,
    pub trace_timestamp: Option<String>,
    pub timestamp_format: TimestampFormat,
    pub repeat: u32,
    pub dryrun: bool,
    pub trace: bool,
    pub disable_breakdown: bool,
    pub new_context: bool,
    pub url: Option<String>,
    pub url_args: Option<String>,
    pub local_build: Option<String>,
    pub tfjs_dir: Option<PathBuf>,
    pub unit_filter: Option<String>,
    pub unit_skip_build: bool,
    pub quit_pageerror: bool,
    pub pause_test: bool,
    pub server_info: bool,
    pub kill_browser: bool,
    pub skip_prepare: bool,
}

/// Warmup, measured and profiled iteration counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub warmup: u32,
    pub run: u32,
    pub profile: u32,
}

impl Counts {
    /// Performance runs with nothing to warm up or measure are no-ops.
    pub fn is_empty_performance(&self) -> bool {
        self.warmup == 0 && self.run == 0
    }
}

/// Backends requested per target family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendLists {
    pub conformance: Vec<Backend>,
    pub performance: Vec<Backend>,
    pub unit: Vec<Backend>,
}

/// Flags forwarded to benchmark pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageOptions {
    pub new_context: bool,
    pub quit_pageerror: bool,
    pub pause_test: bool,
    pub server_info: bool,
}

/// Unit matrix inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitOptions {
    pub repo_dir: Option<PathBuf>,
    pub filter: Option<String>,
    pub skip_build: bool,
    pub timeout: Duration,
    pub shell: Vec<String>,
}

/// Fully resolved, immutable run settings.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub platform: Platform,
    pub browser: BrowserLocation,
    pub browser_args: LaunchArgs,
    pub counts: Counts,
    pub breakdown: bool,
    pub trace: bool,
    pub page: PageOptions,
    pub url: Option<String>,
    /// Query fragment appended to benchmark URLs, without a leading `?`.
    pub url_query: String,
    pub output_root: PathBuf,
    pub trials_path: PathBuf,
    pub repeat: u32,
    pub dryrun: bool,
    pub targets: Vec<Target>,
    pub backends: BackendLists,
    pub timestamp_format: TimestampFormat,
    pub trace_timestamp: Option<Timestamp>,
    pub upload_window: DateWindow,
    pub unit: UnitOptions,
    pub kill_browser: bool,
    pub skip_prepare: bool,
}

/// Resolve raw options against project settings for the given host.
///
/// Creates the output root if it does not exist; no other filesystem
/// changes are made.
pub fn resolve(
    raw: &RawOptions,
    settings: &Settings,
    platform: Platform,
    dirs: &HostDirs,
) -> Result<RunConfig, ConfigError> {
    let targets = parse_targets(raw.targets.as_deref())?;

    let output_root = raw
        .output_dir
        .clone()
        .unwrap_or_else(|| settings.output_dir());
    let browser = resolve_browser_option(raw.browser.as_deref(), &output_root, platform, dirs)?;

    let warmup = raw.warmup_times.unwrap_or(defaults::counts::WARMUP);
    let run = raw.run_times.unwrap_or(defaults::counts::RUN);
    let profile = raw.profile_times.unwrap_or(if raw.trace {
        0
    } else {
        defaults::counts::PROFILE
    });
    let counts = Counts { warmup, run, profile };

    let mut browser_args = LaunchArgs::new();
    browser_args.extend(defaults::browser_args());
    if let Some(extra) = &raw.browser_args {
        browser_args.extend_from_str(extra);
    }

    let mut page = PageOptions {
        new_context: raw.new_context,
        quit_pageerror: raw.quit_pageerror,
        pause_test: raw.pause_test,
        server_info: raw.server_info,
    };
    let mut breakdown = !raw.disable_breakdown && profile > 0;
    if raw.trace {
        page.new_context = true;
        breakdown = false;
        browser_args.extend(defaults::trace_browser_args());
    }

    let local_build = raw.local_build.as_deref().unwrap_or(defaults::LOCAL_BUILD);
    let url_query = build_url_query(&counts, local_build, raw.url_args.as_deref());

    let backends = BackendLists {
        conformance: parse_backends(raw.conformance_backends.as_deref(), &default_benchmark_backends())?,
        performance: parse_backends(raw.performance_backends.as_deref(), &default_benchmark_backends())?,
        unit: parse_backends(raw.unit_backends.as_deref(), &Backend::UNIT)?,
    };
    if let Some(backend) = backends.unit.iter().find(|b| !Backend::UNIT.contains(b)) {
        return Err(ConfigError::UnsupportedUnitBackend(*backend));
    }

    let repo_dir = raw
        .tfjs_dir
        .clone()
        .or_else(|| settings.tfjs_dir.as_deref().map(|p| settings.resolve(p)));
    if targets.contains(&Target::Unit) && repo_dir.is_none() {
        return Err(ConfigError::MissingPath("tfjs_dir"));
    }
    let unit = UnitOptions {
        repo_dir,
        filter: raw.unit_filter.clone().or_else(|| {
            raw.dryrun
                .then(|| defaults::DRYRUN_UNIT_FILTER.to_string())
        }),
        skip_build: raw.unit_skip_build,
        timeout: settings
            .unit
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(if raw.dryrun {
                defaults::timeouts::UNIT_DRYRUN
            } else {
                defaults::timeouts::UNIT
            }),
        shell: settings.unit.shell.clone(),
    };

    let upload_window = DateWindow::new(
        raw.upload_start.unwrap_or(DateWindow::ALL.start),
        raw.upload_end.unwrap_or(DateWindow::ALL.end),
    )
    .ok_or(ConfigError::InvalidWindow {
        start: raw.upload_start.unwrap_or(DateWindow::ALL.start),
        end: raw.upload_end.unwrap_or(DateWindow::ALL.end),
    })?;

    let trace_timestamp = raw
        .trace_timestamp
        .as_deref()
        .map(|s| s.parse::<Timestamp>().map_err(ConfigError::InvalidTimestamp))
        .transpose()?;

    let trials_path = raw.trials.clone().unwrap_or_else(|| settings.trials_path());

    std::fs::create_dir_all(&output_root).map_err(|source| ConfigError::OutputDir {
        path: output_root.clone(),
        source,
    })?;

    Ok(RunConfig {
        platform,
        browser,
        browser_args,
        counts,
        breakdown,
        trace: raw.trace,
        page,
        url: raw.url.clone(),
        url_query,
        output_root,
        trials_path,
        repeat: raw.repeat,
        dryrun: raw.dryrun,
        targets,
        backends,
        timestamp_format: raw.timestamp_format,
        trace_timestamp,
        upload_window,
        unit,
        kill_browser: raw.kill_browser,
        skip_prepare: raw.skip_prepare,
    })
}

fn default_benchmark_backends() -> [Backend; 3] {
    [Backend::Webgpu, Backend::Webgl, Backend::Wasm]
}

fn parse_targets(raw: Option<&str>) -> Result<Vec<Target>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Target::DEFAULT.to_vec());
    };
    let mut targets = Vec::new();
    for name in split_list(raw) {
        let target = name.parse::<Target>().map_err(ConfigError::UnknownTarget)?;
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    if targets.is_empty() {
        return Err(ConfigError::EmptyTargets);
    }
    Ok(targets)
}

fn parse_backends(raw: Option<&str>, default: &[Backend]) -> Result<Vec<Backend>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default.to_vec());
    };
    let mut backends = Vec::new();
    for name in split_list(raw) {
        let backend = name.parse::<Backend>().map_err(ConfigError::UnknownBackend)?;
        if !backends.contains(&backend) {
            backends.push(backend);
        }
    }
    Ok(backends)
}

/// Resolve `--browser`, which is either a channel name or an executable path.
fn resolve_browser_option(
    browser: Option<&str>,
    output_root: &Path,
    platform: Platform,
    dirs: &HostDirs,
) -> Result<BrowserLocation, ConfigError> {
    let browser = browser.unwrap_or(defaults::BROWSER_CHANNEL);
    match browser.parse::<Channel>() {
        Ok(channel) => resolve_browser(channel, platform, dirs),
        Err(err) if !looks_like_path(browser) => Err(err),
        Err(_) => {
            let executable = PathBuf::from(browser);
            if !executable.exists() {
                return Err(ConfigError::MissingBrowserPath(executable));
            }
            Ok(BrowserLocation {
                executable,
                user_data_dir: output_root.join(defaults::USER_DATA_DIR),
            })
        }
    }
}

fn looks_like_path(s: &str) -> bool {
    s.contains('/') || s.contains('\\')
}

/// Build the benchmark URL query: counts, local build list, then extras.
pub fn build_url_query(counts: &Counts, local_build: &str, extra: Option<&str>) -> String {
    let mut pairs = vec![
        format!("warmup={}", counts.warmup),
        format!("run={}", counts.run),
        format!("profile={}", counts.profile),
        format!(
            "localBuild={}",
            utf8_percent_encode(local_build, QUERY_VALUE)
        ),
    ];
    if let Some(extra) = extra.map(|e| e.trim_start_matches('&')).filter(|e| !e.is_empty()) {
        pairs.push(extra.to_string());
    }
    pairs.join("&")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
