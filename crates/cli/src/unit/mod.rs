// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unit test matrix.
//!
//! Runs a unit suite once per requested backend, strictly one after another.
//! Each backend gets an optional build phase and a test phase whose output
//! lands in `<timestamp>-unit-<backend>.txt`; the last summary or failure
//! line in that log becomes the backend's result. A crash, timeout or empty
//! log leaves the sentinel in place, and never stops the next backend.

mod summary;
mod tfjs;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use aho_corasick::AhoCorasick;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::backend::Backend;
use crate::config::RunConfig;
use crate::config::defaults::SENTINEL;
use crate::git::RepoInfo;
use crate::process::{self, CommandSpec, ProcessOutcome};
use crate::runlog::RunLog;
use crate::timestamp::Timestamp;

pub use summary::UnitSummary;
pub use tfjs::TfjsSuite;

/// Substrings marking a karma result line.
static RESULT_MARKERS: LazyLock<Option<AhoCorasick>> =
    LazyLock::new(|| AhoCorasick::new(["FAILED", "Executed"]).ok());

/// Commands that build and test one backend of a unit suite.
pub trait UnitSuite {
    /// Steps run before testing; empty when the backend needs no build.
    fn build_steps(&self, backend: Backend) -> Vec<CommandSpec>;

    /// Work done after a successful build phase (e.g. staging generated files).
    fn finish_build(&self, _backend: Backend, _log: &RunLog) {}

    /// Steps that execute the tests, with an optional test name filter.
    fn test_steps(&self, backend: Backend, filter: Option<&str>) -> Vec<CommandSpec>;

    /// Commit of the code under test, if known.
    fn provenance(&self) -> Option<RepoInfo> {
        None
    }
}

/// Per-backend unit results over the full unit backend universe.
///
/// Backends not run in a pass hold the sentinel. Serializes as a sequence
/// in [`Backend::UNIT`] order so report columns stay stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitResults {
    results: BTreeMap<Backend, String>,
    pub repo: Option<RepoInfo>,
}

impl Default for UnitResults {
    fn default() -> Self {
        Self {
            results: Backend::UNIT
                .iter()
                .map(|b| (*b, SENTINEL.to_string()))
                .collect(),
            repo: None,
        }
    }
}

impl UnitResults {
    pub fn get(&self, backend: Backend) -> Option<&str> {
        self.results.get(&backend).map(String::as_str)
    }

    /// Results in report column order.
    pub fn slots(&self) -> Vec<&str> {
        Backend::UNIT
            .iter()
            .map(|b| self.get(*b).unwrap_or(SENTINEL))
            .collect()
    }

    /// Parsed summaries for backends whose result is a karma summary line.
    pub fn summaries(&self) -> BTreeMap<Backend, UnitSummary> {
        self.results
            .iter()
            .filter_map(|(b, line)| UnitSummary::parse(line).map(|s| (*b, s)))
            .collect()
    }

    fn record(&mut self, backend: Backend, line: String) {
        self.results.insert(backend, line);
    }
}

impl Serialize for UnitResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let slots = self.slots();
        let mut seq = serializer.serialize_seq(Some(slots.len()))?;
        for slot in slots {
            seq.serialize_element(slot)?;
        }
        seq.end()
    }
}

/// One backend's execution within a pass.
#[derive(Debug)]
struct BackendRun {
    backend: Backend,
    log_file: PathBuf,
    result: Option<String>,
}

/// Sequential runner over the requested unit backends.
pub struct UnitMatrix<'a> {
    suite: &'a dyn UnitSuite,
    backends: &'a [Backend],
    timeout: Duration,
    skip_build: bool,
    filter: Option<&'a str>,
}

impl<'a> UnitMatrix<'a> {
    pub fn new(suite: &'a dyn UnitSuite, backends: &'a [Backend], timeout: Duration) -> Self {
        Self {
            suite,
            backends,
            timeout,
            skip_build: false,
            filter: None,
        }
    }

    pub fn from_config(config: &'a RunConfig, suite: &'a dyn UnitSuite) -> Self {
        Self {
            suite,
            backends: &config.backends.unit,
            timeout: config.unit.timeout,
            skip_build: config.unit.skip_build,
            filter: config.unit.filter.as_deref(),
        }
    }

    pub fn skip_build(mut self, skip: bool) -> Self {
        self.skip_build = skip;
        self
    }

    pub fn filter(mut self, filter: Option<&'a str>) -> Self {
        self.filter = filter;
        self
    }

    /// Run every requested backend and collect one result per known backend.
    pub fn run(&self, round_dir: &Path, timestamp: &Timestamp, log: &RunLog) -> UnitResults {
        let mut results = UnitResults {
            repo: self.suite.provenance(),
            ..UnitResults::default()
        };

        for &backend in self.backends {
            let mut run = BackendRun {
                backend,
                log_file: round_dir.join(format!("{timestamp}-unit-{backend}.txt")),
                result: None,
            };
            self.run_backend(&mut run, log);
            if let Some(line) = run.result {
                results.record(run.backend, line);
            } else {
                log.warn(&format!(
                    "no result line found for {backend} unit tests (see {})",
                    run.log_file.display()
                ));
            }
        }

        results
    }

    fn run_backend(&self, run: &mut BackendRun, log: &RunLog) {
        if let Err(e) = std::fs::write(&run.log_file, "") {
            log.error(&format!("failed to create {}: {e}", run.log_file.display()));
        }

        let build = self.suite.build_steps(run.backend);
        if !self.skip_build && !build.is_empty() {
            log.log(&format!("build {} unit tests", run.backend));
            match self.run_steps(&build, &run.log_file) {
                Ok(()) => self.suite.finish_build(run.backend, log),
                Err(failure) => log.warn(&format!(
                    "{} build step failed: {failure}; running tests anyway",
                    run.backend
                )),
            }
        }

        let test = self.suite.test_steps(run.backend, self.filter);
        if let Err(failure) = self.run_steps(&test, &run.log_file) {
            log.warn(&format!("{} unit tests: {failure}", run.backend));
        }

        run.result = scan_result_line(&run.log_file, log);
    }

    /// Run steps in order, stopping at the first unsuccessful one.
    fn run_steps(&self, steps: &[CommandSpec], log_file: &Path) -> Result<(), String> {
        for step in steps {
            let outcome: ProcessOutcome = process::run(step, log_file, Some(self.timeout));
            if !outcome.success() {
                return Err(format!("`{}` {}", step.display(), outcome.describe()));
            }
        }
        Ok(())
    }
}

/// Find the last result line in a unit log, echoing every match to `log`.
fn scan_result_line(log_file: &Path, log: &RunLog) -> Option<String> {
    let bytes = match std::fs::read(log_file) {
        Ok(bytes) => bytes,
        Err(e) => {
            log.warn(&format!("failed to read {}: {e}", log_file.display()));
            return None;
        }
    };
    let markers = RESULT_MARKERS.as_ref()?;
    let content = String::from_utf8_lossy(&bytes);

    let mut last = None;
    for line in content.lines().map(|l| l.trim_end_matches('\r')) {
        if !line.is_empty() && markers.is_match(line) {
            log.log(line);
            last = Some(line);
        }
    }
    last.map(str::to_string)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
