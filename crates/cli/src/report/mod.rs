// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Round results and the report handed to the report collaborator.

mod json;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::backend::Target;
use crate::config::RunConfig;
use crate::git::RepoInfo;
use crate::launch::LaunchArgs;
use crate::timestamp::Timestamp;
use crate::unit::UnitResults;

pub use json::JsonReporter;

/// Outcome of one target within a round.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TargetResult {
    /// Opaque results from a benchmark or demo collaborator.
    Value(serde_json::Value),
    /// Per-backend unit test results.
    Unit(UnitResults),
    /// The target ran to completion without producing results (trace parsing).
    Completed,
    /// The target failed; the message says why.
    Failed { error: String },
}

impl TargetResult {
    pub fn failed(error: impl Into<String>) -> Self {
        TargetResult::Failed {
            error: error.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TargetResult::Failed { .. })
    }
}

/// Results of one round keyed by target, in the order targets ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundResults {
    entries: Vec<(Target, TargetResult)>,
}

impl RoundResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a target's result, replacing any earlier one.
    pub fn insert(&mut self, target: Target, result: TargetResult) {
        match self.entries.iter_mut().find(|(t, _)| *t == target) {
            Some(entry) => entry.1 = result,
            None => self.entries.push((target, result)),
        }
    }

    pub fn get(&self, target: Target) -> Option<&TargetResult> {
        self.entries
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, r)| r)
    }

    pub fn targets(&self) -> impl Iterator<Item = Target> + '_ {
        self.entries.iter().map(|(t, _)| *t)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unit results, if the unit target ran this round.
    pub fn unit(&self) -> Option<&UnitResults> {
        match self.get(Target::Unit) {
            Some(TargetResult::Unit(results)) => Some(results),
            _ => None,
        }
    }
}

impl Serialize for RoundResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (target, result) in &self.entries {
            map.serialize_entry(target.as_str(), result)?;
        }
        map.end()
    }
}

/// Everything the report collaborator receives for one round.
#[derive(Debug, Serialize)]
pub struct RoundReport<'a> {
    pub timestamp: &'a Timestamp,
    /// 1-based round number.
    pub round: u32,
    pub rounds: u32,
    pub results: &'a RoundResults,
    /// `target: seconds` pairs, space separated.
    pub duration: &'a str,
    /// Effective launch arguments including active trials.
    pub browser_args: &'a LaunchArgs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<&'a RepoInfo>,
    pub config: &'a RunConfig,
    #[serde(skip)]
    pub round_dir: &'a std::path::Path,
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
