// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Combined per-round run log.
//!
//! Every line goes to `tracing` and is appended to `<timestamp>.log` in the
//! round directory, so the file survives after the console scrolls away.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Run log writer. Lines are appended as they are logged.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: Option<PathBuf>,
}

impl RunLog {
    /// Start a fresh log at `path`, truncating any previous content.
    pub fn create(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::File::create(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
        })
    }

    /// Continue an existing log at `path` (created if missing).
    pub fn append(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
        }
    }

    /// A log that only reaches `tracing`.
    pub fn console() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn log(&self, msg: &str) {
        tracing::info!("{}", msg);
        self.write_line(msg);
    }

    pub fn warn(&self, msg: &str) {
        tracing::warn!("{}", msg);
        self.write_line(&format!("[WARN] {msg}"));
    }

    pub fn error(&self, msg: &str) {
        tracing::error!("{}", msg);
        self.write_line(&format!("[ERROR] {msg}"));
    }

    fn write_line(&self, line: &str) {
        let Some(path) = &self.path else {
            return;
        };
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut f| writeln!(f, "{line}"));
        if let Err(e) = written {
            tracing::warn!("failed to write run log {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
#[path = "runlog_tests.rs"]
mod tests;
