// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unit tests for repository provenance.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::process::Command;

use tempfile::TempDir;

use super::*;

fn git(temp: &TempDir, args: &[&str]) {
    Command::new("git")
        .args(args)
        .current_dir(temp.path())
        .output()
        .expect("failed to run git");
}

#[test]
fn head_info_reads_commit() {
    let temp = TempDir::new().unwrap();
    git(&temp, &["init"]);
    git(&temp, &["config", "user.email", "test@example.com"]);
    git(&temp, &["config", "user.name", "Test User"]);
    std::fs::write(temp.path().join("README.md"), "# Project\n").unwrap();
    git(&temp, &["add", "README.md"]);
    git(&temp, &["commit", "-m", "chore: initial commit"]);

    let info = head_info(temp.path()).unwrap();
    assert_eq!(info.commit.len(), 40);
    assert!(!info.date.is_empty());
}

#[test]
fn head_info_outside_repository_fails() {
    let temp = TempDir::new().unwrap();
    assert!(head_info(temp.path()).is_err());
}
