// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repository provenance for unit test runs.

use std::path::Path;

use anyhow::Context;
use chrono::DateTime;
use git2::Repository;
use serde::Serialize;

/// HEAD commit of the repository under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoInfo {
    pub commit: String,
    /// Commit date, RFC 3339.
    pub date: String,
}

/// Read the HEAD commit and its date for the repository containing `dir`.
pub fn head_info(dir: &Path) -> anyhow::Result<RepoInfo> {
    let repo = Repository::discover(dir)
        .with_context(|| format!("no git repository at {}", dir.display()))?;
    let commit = repo
        .head()
        .context("failed to get HEAD")?
        .peel_to_commit()
        .context("HEAD is not a commit")?;
    let time = commit.time();
    let date = DateTime::from_timestamp(time.seconds(), 0)
        .map(|d| d.to_rfc3339())
        .unwrap_or_default();
    Ok(RepoInfo {
        commit: commit.id().to_string(),
        date,
    })
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
