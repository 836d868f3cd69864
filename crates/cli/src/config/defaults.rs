// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! All default values are documented here for easy reference.

use std::time::Duration;

/// Default iteration counts passed to benchmark pages.
pub mod counts {
    /// Default warmup iterations (50).
    pub const WARMUP: u32 = 50;

    /// Default measured iterations (50).
    pub const RUN: u32 = 50;

    /// Default profiling iterations (50, or 0 when tracing).
    pub const PROFILE: u32 = 50;
}

/// Result placeholder for a backend or target that produced nothing usable.
pub const SENTINEL: &str = "NA";

/// Default browser channel when neither a channel nor a path is given.
pub const BROWSER_CHANNEL: &str = "chrome_dev";

/// Default packages built locally instead of pulled from the registry.
pub const LOCAL_BUILD: &str = "webgl,webgpu,core";

/// Name of the project settings file.
pub const SETTINGS_FILE: &str = "sweep.toml";

/// Default trial definition file, relative to the settings directory.
pub const TRIALS_FILE: &str = "trials.json";

/// Default output root, relative to the current directory.
pub const OUTPUT_DIR: &str = "out";

/// Name of the browser profile directory used with an explicit browser path.
pub const USER_DATA_DIR: &str = "user-data-dir";

/// Unit test timeouts.
pub mod timeouts {
    use super::Duration;

    /// Build and test phase bound for a full run.
    pub const UNIT: Duration = Duration::from_secs(600);

    /// Build and test phase bound in dryrun mode.
    pub const UNIT_DRYRUN: Duration = Duration::from_secs(120);
}

/// Remote archive access.
pub mod remote {
    use super::Duration;

    /// Bound for each ssh or scp invocation.
    pub const TIMEOUT: Duration = Duration::from_secs(300);

    pub const SSH: &str = "ssh";

    pub const SCP: &str = "scp";
}

/// Filter applied to unit tests in dryrun mode when none is given.
pub const DRYRUN_UNIT_FILTER: &str = "nextFrame";

/// Launch arguments every browser run starts from.
pub fn browser_args() -> Vec<String> {
    vec![
        "--enable-unsafe-webgpu".to_string(),
        "--enable-features=WebGPUService".to_string(),
        "--disable-dawn-features=disallow_unsafe_apis".to_string(),
        "--no-first-run".to_string(),
    ]
}

/// Diagnostic launch arguments appended in tracing mode.
pub fn trace_browser_args() -> Vec<String> {
    vec![
        "--enable-dawn-features=record_detailed_timing_in_trace_events,disable_timestamp_query_conversion"
            .to_string(),
        "--trace-startup-format=json".to_string(),
        "--enable-tracing=disabled-by-default-gpu.dawn,disabled-by-default-devtools.timeline"
            .to_string(),
    ]
}
