// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Date-windowed browser flag trials.
//!
//! Trials are read from a JSON file of the form
//! `{ "browserArgs": [["--flag", 20230101, 20230110], ...] }`.

use std::path::Path;

use serde::Deserialize;

/// A launch flag enabled between two dates (inclusive, `YYYYMMDD`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, u32, u32)")]
pub struct Trial {
    pub flag: String,
    pub start_date: u32,
    pub end_date: u32,
}

impl From<(String, u32, u32)> for Trial {
    fn from((flag, start_date, end_date): (String, u32, u32)) -> Self {
        Self { flag, start_date, end_date }
    }
}

impl Trial {
    /// Whether the trial covers `date`.
    pub fn is_active(&self, date: u32) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Deserialize)]
struct TrialFile {
    #[serde(rename = "browserArgs", default)]
    browser_args: Vec<Trial>,
}

#[derive(Debug, thiserror::Error)]
pub enum TrialError {
    #[error("failed to read trials from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid trials file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Load trial definitions, returning an empty list if the file does not exist.
pub fn load(path: &Path) -> Result<Vec<Trial>, TrialError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path).map_err(|source| TrialError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse(&content).map_err(|source| TrialError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Parse trial definitions from JSON text.
pub fn parse(content: &str) -> Result<Vec<Trial>, serde_json::Error> {
    let file: TrialFile = serde_json::from_str(content)?;
    Ok(file.browser_args)
}

/// Flags of the trials active on `date`, in file order.
pub fn active_flags(trials: &[Trial], date: u32) -> impl Iterator<Item = &str> {
    trials
        .iter()
        .filter(move |t| t.is_active(date))
        .map(|t| t.flag.as_str())
}

#[cfg(test)]
#[path = "trial_tests.rs"]
mod tests;
