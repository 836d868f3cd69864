//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;

use crate::backend::{Backend, Target};
use crate::config::defaults;
use crate::config::{
    BackendLists, BrowserLocation, Counts, PageOptions, Platform, RunConfig, UnitOptions,
};
use crate::launch::LaunchArgs;
use crate::sync::DateWindow;
use crate::timestamp::TimestampFormat;

/// Creates a temp directory with custom sweep.toml content.
pub fn temp_project_with_settings(settings: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(defaults::SETTINGS_FILE), settings).unwrap();
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
///
/// # Example
///
/// ```ignore
/// let tmp = TempDir::new().unwrap();
/// create_tree(tmp.path(), &[
///     ("tfjs-backend-webgpu/package.json", "{}"),
///     ("link-package-core/package.json", "{}"),
/// ]);
/// ```
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// A resolved config rooted at `root`, as `sweep run` would build with no flags.
///
/// Output goes to `<root>/out` and trials are read from `<root>/trials.json`.
/// Nothing is created on disk.
pub fn test_config(root: &Path) -> RunConfig {
    let counts = Counts {
        warmup: defaults::counts::WARMUP,
        run: defaults::counts::RUN,
        profile: defaults::counts::PROFILE,
    };
    let mut browser_args = LaunchArgs::new();
    browser_args.extend(defaults::browser_args());

    RunConfig {
        platform: Platform::Linux,
        browser: BrowserLocation {
            executable: root.join("chrome"),
            user_data_dir: root.join("out").join(defaults::USER_DATA_DIR),
        },
        browser_args,
        counts,
        breakdown: true,
        trace: false,
        page: PageOptions::default(),
        url: None,
        url_query: crate::config::build_url_query(&counts, defaults::LOCAL_BUILD, None),
        output_root: root.join("out"),
        trials_path: root.join(defaults::TRIALS_FILE),
        repeat: 1,
        dryrun: false,
        targets: Target::DEFAULT.to_vec(),
        backends: BackendLists {
            conformance: vec![Backend::Webgpu, Backend::Webgl, Backend::Wasm],
            performance: vec![Backend::Webgpu, Backend::Webgl, Backend::Wasm],
            unit: Backend::UNIT.to_vec(),
        },
        timestamp_format: TimestampFormat::Second,
        trace_timestamp: None,
        upload_window: DateWindow::ALL,
        unit: UnitOptions {
            repo_dir: Some(root.join("tfjs")),
            filter: None,
            skip_build: false,
            timeout: Duration::from_secs(10),
            shell: Vec::new(),
        },
        kill_browser: false,
        skip_prepare: false,
    }
}
