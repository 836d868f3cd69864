// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn parses_success_line() {
    let summary = UnitSummary::parse("Executed 42 of 42 SUCCESS (3.1 secs / 2.9 secs)").unwrap();
    assert_eq!(
        summary,
        UnitSummary { executed: 42, total: 42, failed: 0, skipped: 0 }
    );
}

#[test]
fn parses_failed_and_skipped_counts() {
    let line = "Chrome 120 (Windows 10): Executed 40 of 42 (2 FAILED) (skipped 5) (1 min 3 secs)";
    let summary = UnitSummary::parse(line).unwrap();
    assert_eq!(summary.executed, 40);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.skipped, 5);
}

#[test]
fn failure_detail_lines_have_no_summary() {
    assert!(UnitSummary::parse("  conv2d x=[1,2] FAILED").is_none());
    assert!(UnitSummary::parse("NA").is_none());
}
