// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Targets and execution backends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One category of test execution within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Conformance,
    Performance,
    Unit,
    Trace,
    Demo,
}

impl Target {
    /// Targets run when none are requested.
    pub const DEFAULT: [Target; 3] = [Target::Conformance, Target::Performance, Target::Unit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Conformance => "conformance",
            Target::Performance => "performance",
            Target::Unit => "unit",
            Target::Trace => "trace",
            Target::Demo => "demo",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "conformance" => Ok(Target::Conformance),
            "performance" => Ok(Target::Performance),
            "unit" => Ok(Target::Unit),
            "trace" => Ok(Target::Trace),
            "demo" => Ok(Target::Demo),
            other => Err(other.to_string()),
        }
    }
}

/// An execution engine variant tests run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Webgpu,
    Webgl,
    Wasm,
    Cpu,
}

impl Backend {
    /// Backends the unit matrix knows how to run, in report column order.
    pub const UNIT: [Backend; 2] = [Backend::Webgpu, Backend::Webgl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Webgpu => "webgpu",
            Backend::Webgl => "webgl",
            Backend::Wasm => "wasm",
            Backend::Cpu => "cpu",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "webgpu" => Ok(Backend::Webgpu),
            "webgl" => Ok(Backend::Webgl),
            "wasm" => Ok(Backend::Wasm),
            "cpu" => Ok(Backend::Cpu),
            other => Err(other.to_string()),
        }
    }
}

/// Split a comma-separated list, dropping empty entries.
pub fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
