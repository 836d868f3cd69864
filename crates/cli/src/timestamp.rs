// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run timestamps.
//!
//! A timestamp names a round's output directory and log files. It always
//! starts with an 8-digit `YYYYMMDD` date, optionally followed by `HHMMSS`.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Granularity of generated timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFormat {
    /// `YYYYMMDD`
    Day,
    /// `YYYYMMDDHHMMSS`
    #[default]
    Second,
}

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the host's local time zone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A validated run timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Format `at` with the requested granularity.
    pub fn at(at: NaiveDateTime, format: TimestampFormat) -> Self {
        let pattern = match format {
            TimestampFormat::Day => "%Y%m%d",
            TimestampFormat::Second => "%Y%m%d%H%M%S",
        };
        Self(at.format(pattern).to_string())
    }

    /// The `YYYYMMDD` date prefix as an integer.
    pub fn date(&self) -> u32 {
        date_prefix(&self.0).unwrap_or_default()
    }

    /// The `YYYYMMDD` date prefix as text.
    pub fn date_str(&self) -> &str {
        &self.0[..8]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Timestamp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if date_prefix(s).is_some() {
            Ok(Self(s.to_string()))
        } else {
            Err(format!("invalid timestamp '{s}': expected YYYYMMDD or YYYYMMDDHHMMSS"))
        }
    }
}

/// Parse the 8-digit date prefix of a purely numeric name.
///
/// Returns None when the name is not all digits or is shorter than 8.
pub fn date_prefix(name: &str) -> Option<u32> {
    if name.len() < 8 || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name[..8].parse().ok()
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
