// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Browser launch argument assembly.
//!
//! Arguments are kept as a token list. User-supplied argument strings are
//! split on whitespace once, at the boundary.

use serde::Serialize;

/// Ordered browser launch arguments without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LaunchArgs {
    tokens: Vec<String>,
}

impl LaunchArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one argument unless it is already present.
    pub fn push(&mut self, token: impl Into<String>) -> &mut Self {
        let token = token.into();
        if !token.is_empty() && !self.contains(&token) {
            self.tokens.push(token);
        }
        self
    }

    pub fn extend<I, S>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            self.push(token);
        }
        self
    }

    /// Append a whitespace-separated argument string, e.g. from `--browser-args`.
    pub fn extend_from_str(&mut self, raw: &str) -> &mut Self {
        self.extend(raw.split_whitespace())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Copy of these arguments followed by `extra`.
    pub fn with<'a>(&self, extra: impl IntoIterator<Item = &'a str>) -> Self {
        let mut out = self.clone();
        out.extend(extra);
        out
    }
}

impl std::fmt::Display for LaunchArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
