// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use yare::parameterized;

use super::*;

#[parameterized(
    conformance = { "conformance", Target::Conformance },
    performance = { "performance", Target::Performance },
    unit = { "unit", Target::Unit },
    trace = { "trace", Target::Trace },
    demo = { " demo ", Target::Demo },
)]
fn target_parses(raw: &str, expected: Target) {
    assert_eq!(raw.parse::<Target>().unwrap(), expected);
}

#[test]
fn target_rejects_unknown_name() {
    assert_eq!("upload".parse::<Target>(), Err("upload".to_string()));
}

#[test]
fn target_display_matches_parse() {
    for target in [Target::Conformance, Target::Performance, Target::Unit, Target::Trace, Target::Demo] {
        assert_eq!(target.to_string().parse::<Target>().unwrap(), target);
    }
}

#[test]
fn backend_order_follows_unit_universe() {
    assert!(Backend::Webgpu < Backend::Webgl);
    assert_eq!(Backend::UNIT, [Backend::Webgpu, Backend::Webgl]);
}

#[test]
fn backend_rejects_unknown_name() {
    assert_eq!("metal".parse::<Backend>(), Err("metal".to_string()));
}

#[test]
fn split_list_drops_empty_entries() {
    let items: Vec<&str> = split_list("webgpu, ,webgl,").collect();
    assert_eq!(items, vec!["webgpu", "webgl"]);
}
