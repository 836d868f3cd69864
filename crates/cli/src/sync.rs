// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact sync.
//!
//! Uploads dated run results to a remote archive. Only run directories whose
//! date falls inside the window and whose `<date>.json` is absent remotely
//! are transferred; re-running a sync is the retry mechanism.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::config::defaults;
use crate::process::{self, CommandSpec};
use crate::runlog::RunLog;
use crate::timestamp::date_prefix;

/// Inclusive `YYYYMMDD` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: u32,
    pub end: u32,
}

impl DateWindow {
    /// A window that admits every date.
    pub const ALL: DateWindow = DateWindow {
        start: 0,
        end: 99_999_999,
    };

    /// Returns None if the window is inverted.
    pub fn new(start: u32, end: u32) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(&self, date: u32) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Where a machine's artifacts live in the remote archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteKey {
    pub platform: String,
    pub device_id: String,
}

impl RemoteKey {
    /// Archive-relative path of the artifact for `date`.
    pub fn object_path(&self, date: u32) -> String {
        format!("{}/{}/{date}.json", self.platform, self.device_id)
    }
}

/// A local run directory eligible for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub date: u32,
    /// The `<date>.json` file inside the run directory.
    pub file: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to list {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("remote check for {path} failed: {reason}")]
    Check { path: String, reason: String },
    #[error("transfer of {} failed: {reason}", local.display())]
    Transfer { local: PathBuf, reason: String },
}

/// Remote archive operations.
pub trait RemoteStore {
    /// Whether an object exists at the archive-relative `path`.
    fn exists(&self, path: &str) -> Result<bool, SyncError>;

    /// Copy `local` to the archive-relative `path`.
    fn transfer(&self, local: &Path, path: &str) -> Result<(), SyncError>;
}

/// Exit status ssh reserves for its own failures (connection, auth).
const SSH_FAILURE: i32 = 255;

/// Archive on a host reachable over ssh, written with scp.
#[derive(Debug, Clone)]
pub struct SshStore {
    host: String,
    root: String,
    log_file: PathBuf,
    timeout: Duration,
    ssh: String,
    scp: String,
}

impl SshStore {
    /// `log_file` collects ssh and scp output.
    pub fn new(host: impl Into<String>, root: impl Into<String>, log_file: PathBuf) -> Self {
        Self {
            host: host.into(),
            root: root.into().trim_end_matches('/').to_string(),
            log_file,
            timeout: defaults::remote::TIMEOUT,
            ssh: defaults::remote::SSH.to_string(),
            scp: defaults::remote::SCP.to_string(),
        }
    }

    /// Bound for each ssh or scp invocation.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_programs(mut self, ssh: impl Into<String>, scp: impl Into<String>) -> Self {
        self.ssh = ssh.into();
        self.scp = scp.into();
        self
    }

    fn remote_path(&self, path: &str) -> String {
        format!("{}/{path}", self.root)
    }
}

impl RemoteStore for SshStore {
    fn exists(&self, path: &str) -> Result<bool, SyncError> {
        let remote = self.remote_path(path);
        let cmd = CommandSpec::new(&self.ssh).args([
            "-o",
            "BatchMode=yes",
            self.host.as_str(),
            "ls",
            remote.as_str(),
        ]);
        let outcome = process::run(&cmd, &self.log_file, Some(self.timeout));
        let failed = |outcome: &process::ProcessOutcome| SyncError::Check {
            path: remote.clone(),
            reason: outcome.describe(),
        };
        if outcome.timed_out || outcome.error.is_some() {
            return Err(failed(&outcome));
        }
        // Any other non-zero status is ls reporting a missing path.
        match outcome.exit_code {
            Some(0) => Ok(true),
            Some(SSH_FAILURE) | None => Err(failed(&outcome)),
            Some(_) => Ok(false),
        }
    }

    fn transfer(&self, local: &Path, path: &str) -> Result<(), SyncError> {
        let target = format!("{}:{}", self.host, self.remote_path(path));
        let cmd = CommandSpec::new(&self.scp).args([
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            local.display().to_string(),
            target,
        ]);
        let outcome = process::run(&cmd, &self.log_file, Some(self.timeout));
        if outcome.success() {
            Ok(())
        } else {
            Err(SyncError::Transfer {
                local: local.to_path_buf(),
                reason: outcome.describe(),
            })
        }
    }
}

/// Counts from one sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub uploaded: usize,
    pub skipped_existing: usize,
    pub failed: usize,
}

/// Run directories under `local_root` that are eligible for upload.
///
/// Eligible entries are directories with an all-digit name of at least eight
/// characters, a date prefix inside `window`, and a `<date>.json` inside.
/// Results are sorted by directory name.
pub fn candidates(local_root: &Path, window: DateWindow) -> Result<Vec<Artifact>, SyncError> {
    let entries = std::fs::read_dir(local_root).map_err(|source| SyncError::Scan {
        path: local_root.to_path_buf(),
        source,
    })?;

    let mut found: Vec<(String, Artifact)> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable entry in {}: {e}", local_root.display());
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(date) = date_prefix(&name) else {
            continue;
        };
        if !entry.file_type().is_ok_and(|t| t.is_dir()) || !window.contains(date) {
            continue;
        }
        let file = entry.path().join(format!("{date}.json"));
        if !file.is_file() {
            continue;
        }
        found.push((name, Artifact { date, file }));
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found.into_iter().map(|(_, artifact)| artifact).collect())
}

/// Upload every eligible artifact not yet present remotely.
///
/// Check and transfer failures are logged and counted; the pass continues
/// with the next candidate.
pub fn sync(
    local_root: &Path,
    window: DateWindow,
    key: &RemoteKey,
    store: &dyn RemoteStore,
    log: &RunLog,
) -> Result<SyncSummary, SyncError> {
    let mut summary = SyncSummary::default();

    for artifact in candidates(local_root, window)? {
        let remote = key.object_path(artifact.date);
        match store.exists(&remote) {
            Ok(true) => {
                log.log(&format!("{} already exists remotely", artifact.file.display()));
                summary.skipped_existing += 1;
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                log.error(&e.to_string());
                summary.failed += 1;
                continue;
            }
        }

        match store.transfer(&artifact.file, &remote) {
            Ok(()) => {
                log.log(&format!("{} uploaded", artifact.file.display()));
                summary.uploaded += 1;
            }
            Err(e) => {
                log.error(&e.to_string());
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
