// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Karma summary line parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static SUMMARY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"Executed (\d+) of (\d+)(?:.*?\((\d+) FAILED\))?(?:.*?\(skipped (\d+)\))?").ok()
});

/// Counts extracted from a line like `Executed 40 of 42 (2 FAILED) (skipped 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitSummary {
    pub executed: u32,
    pub total: u32,
    pub failed: u32,
    pub skipped: u32,
}

impl UnitSummary {
    pub fn parse(line: &str) -> Option<Self> {
        let caps = SUMMARY.as_ref()?.captures(line)?;
        let num = |i: usize| -> u32 {
            caps.get(i)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };
        Some(Self {
            executed: num(1),
            total: num(2),
            failed: num(3),
            skipped: num(4),
        })
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
