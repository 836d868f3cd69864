// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Upload command implementation.

use std::path::Path;

use anyhow::Context;

use sweep::cli::{Cli, UploadArgs};
use sweep::config::{ConfigError, Platform, Settings, defaults};
use sweep::runlog::RunLog;
use sweep::sync::{self, DateWindow, RemoteKey, SshStore};

/// Upload dated results under the output root.
pub fn run(cli: &Cli, args: &UploadArgs) -> anyhow::Result<()> {
    let settings = crate::load_settings(cli)?;
    let start = args.window.upload_start.unwrap_or(DateWindow::ALL.start);
    let end = args.window.upload_end.unwrap_or(DateWindow::ALL.end);
    let window = DateWindow::new(start, end).ok_or(ConfigError::InvalidWindow { start, end })?;
    let output_root = args.output_dir.clone().unwrap_or_else(|| settings.output_dir());
    upload(&settings, &output_root, window, Platform::current())
}

/// Sync `output_root` to the remote archive configured in `settings`.
pub fn upload(
    settings: &Settings,
    output_root: &Path,
    window: DateWindow,
    platform: Platform,
) -> anyhow::Result<()> {
    let host = settings
        .remote
        .host
        .as_deref()
        .ok_or(ConfigError::MissingPath("remote.host"))?;
    let root = settings
        .remote
        .root
        .as_deref()
        .ok_or(ConfigError::MissingPath("remote.root"))?;
    let device_id = settings
        .device_id
        .clone()
        .ok_or(ConfigError::MissingPath("device_id"))?;

    let key = RemoteKey {
        platform: platform.as_str().to_string(),
        device_id,
    };
    let remote = &settings.remote;
    let store = SshStore::new(host, root, output_root.join("upload.txt"))
        .with_timeout(remote.timeout())
        .with_programs(
            remote.ssh.as_deref().unwrap_or(defaults::remote::SSH),
            remote.scp.as_deref().unwrap_or(defaults::remote::SCP),
        );
    let log = RunLog::append(&output_root.join("upload.log"));

    let summary = sync::sync(output_root, window, &key, &store, &log)
        .with_context(|| format!("failed to sync {}", output_root.display()))?;
    log.log(&format!(
        "upload: {} uploaded, {} already present, {} failed",
        summary.uploaded, summary.skipped_existing, summary.failed
    ));
    Ok(())
}
