// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unit suite for a TensorFlow.js checkout.
//!
//! Each backend lives in `tfjs-backend-<name>`. WebGPU tests run from a
//! bazel-generated bundle, so that backend has a build phase: the core
//! package, the backend itself, then the test bundle which is copied back
//! into the source tree.

use std::path::{Path, PathBuf};

use crate::backend::Backend;
use crate::git::{self, RepoInfo};
use crate::process::CommandSpec;
use crate::runlog::RunLog;

use super::UnitSuite;

/// Unit suite rooted at a tfjs repository checkout.
pub struct TfjsSuite {
    repo_dir: PathBuf,
    browser: PathBuf,
    shell: Vec<String>,
}

impl TfjsSuite {
    /// `shell` wraps every command, e.g. `["cmd", "/c"]` where `yarn` is a script shim.
    pub fn new(repo_dir: &Path, browser: &Path, shell: &[String]) -> Self {
        Self {
            repo_dir: repo_dir.to_path_buf(),
            browser: browser.to_path_buf(),
            shell: shell.to_vec(),
        }
    }

    fn package_dir(&self, backend: Backend) -> PathBuf {
        self.repo_dir.join(format!("tfjs-backend-{backend}"))
    }

    fn yarn<const N: usize>(&self, dir: &Path, args: [&str; N]) -> CommandSpec {
        CommandSpec::new("yarn")
            .args(args)
            .current_dir(dir)
            .env("CHROME_BIN", self.browser.display().to_string())
            .wrapped(&self.shell)
    }
}

impl UnitSuite for TfjsSuite {
    fn build_steps(&self, backend: Backend) -> Vec<CommandSpec> {
        if backend != Backend::Webgpu {
            return Vec::new();
        }
        let package = self.package_dir(backend);
        vec![
            self.yarn(&self.repo_dir.join("link-package-core"), ["build"]),
            self.yarn(&package, []),
            self.yarn(&package, ["build"]),
            self.yarn(&package, ["bazel", "build", "src:tests"]),
        ]
    }

    fn finish_build(&self, backend: Backend, log: &RunLog) {
        if backend != Backend::Webgpu {
            return;
        }
        let generated = self
            .repo_dir
            .join("bazel-bin")
            .join(format!("tfjs-backend-{backend}"))
            .join("src/tests.ts");
        let staged = self.package_dir(backend).join("src/tests.ts");
        if staged.exists()
            && let Err(e) = std::fs::remove_file(&staged)
        {
            log.warn(&format!("failed to remove {}: {e}", staged.display()));
        }
        if let Err(e) = std::fs::copy(&generated, &staged) {
            log.warn(&format!(
                "failed to copy {} to {}: {e}",
                generated.display(),
                staged.display()
            ));
        }
    }

    fn test_steps(&self, backend: Backend, filter: Option<&str>) -> Vec<CommandSpec> {
        let package = self.package_dir(backend);
        let grep: Vec<&str> = filter.map(|f| vec!["--grep", f]).unwrap_or_default();
        match backend {
            Backend::Webgpu => {
                let mut karma = self.yarn(&package, ["karma", "start", "--browsers=chrome_webgpu"]);
                karma.args.extend(grep.iter().map(|s| s.to_string()));
                vec![karma]
            }
            _ => {
                let mut test = self.yarn(&package, ["test"]);
                test.args.extend(grep.iter().map(|s| s.to_string()));
                vec![self.yarn(&package, []), test]
            }
        }
    }

    fn provenance(&self) -> Option<RepoInfo> {
        match git::head_info(&self.repo_dir) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!("no repository provenance: {e:#}");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tfjs_tests.rs"]
mod tests;
