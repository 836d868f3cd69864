//! Test helpers for behavioral specifications.
//!
//! Provides a throwaway project directory and a command builder bound to it.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Returns a Command configured to run the sweep binary
pub fn sweep_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sweep"));
    cmd.env_remove("SWEEP_CONFIG").env_remove("SWEEP_LOG");
    cmd
}

/// A temporary project directory, marked as a git root so settings
/// discovery never escapes it.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root.
    pub fn file(&self, path: &str, content: &str) {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    /// A sweep command running inside the project.
    pub fn cmd(&self) -> Command {
        let mut cmd = sweep_cmd();
        cmd.current_dir(self.path());
        cmd
    }

    /// Round directories under `out/`, sorted by name.
    pub fn rounds(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = std::fs::read_dir(self.path().join("out"))
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.is_dir()
                    && p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.bytes().all(|b| b.is_ascii_digit()))
            })
            .collect();
        dirs.sort();
        dirs
    }

    /// The JSON report written into a round directory.
    pub fn report(&self, round_dir: &Path) -> serde_json::Value {
        let name = round_dir.file_name().unwrap().to_str().unwrap();
        let path = round_dir.join(format!("{}.json", &name[..8]));
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }
}
