// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn push_skips_duplicates_and_empty() {
    let mut args = LaunchArgs::new();
    args.push("--a").push("--a").push("").push("--b");
    assert_eq!(args.as_slice(), &["--a".to_string(), "--b".to_string()]);
}

#[test]
fn extend_from_str_splits_whitespace() {
    let mut args = LaunchArgs::new();
    args.extend_from_str("  --no-sandbox   --enable-zero-copy ");
    assert_eq!(args.len(), 2);
    assert!(args.contains("--enable-zero-copy"));
}

#[test]
fn with_leaves_base_untouched() {
    let mut base = LaunchArgs::new();
    base.push("--base");
    let derived = base.with(["--trial"]);
    assert_eq!(base.len(), 1);
    assert_eq!(derived.to_string(), "--base --trial");
}
