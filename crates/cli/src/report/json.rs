// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON round report.
//!
//! Written to `<round_dir>/<date>.json`; this is the artifact the sync
//! engine uploads.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use serde_json::json;

use super::RoundReport;

/// Writes each round's report as pretty-printed JSON.
pub struct JsonReporter;

impl JsonReporter {
    /// Write the report, returning the file path.
    pub fn write(&self, report: &RoundReport<'_>) -> anyhow::Result<PathBuf> {
        let path = report
            .round_dir
            .join(format!("{}.json", report.timestamp.date_str()));

        let mut document = serde_json::to_value(report).context("failed to serialize report")?;
        if let Some(unit) = report.results.unit() {
            let summaries: BTreeMap<String, _> = unit
                .summaries()
                .into_iter()
                .map(|(backend, summary)| (backend.to_string(), summary))
                .collect();
            document["unit_summary"] = json!(summaries);
        }

        std::fs::create_dir_all(report.round_dir)?;
        let content = serde_json::to_string_pretty(&document)?;
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}
