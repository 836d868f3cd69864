// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Browser channel lookup.
//!
//! Maps a release channel and host platform to an executable and its default
//! profile directory. The lookup is pure: host directories are passed in.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use super::ConfigError;

/// Browser release channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Canary,
    Dev,
    Beta,
    Stable,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Canary => "chrome_canary",
            Channel::Dev => "chrome_dev",
            Channel::Beta => "chrome_beta",
            Channel::Stable => "chrome_stable",
        }
    }
}

impl FromStr for Channel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chrome_canary" => Ok(Channel::Canary),
            "chrome_dev" => Ok(Channel::Dev),
            "chrome_beta" => Ok(Channel::Beta),
            "chrome_stable" => Ok(Channel::Stable),
            other => Err(ConfigError::UnknownChannel(other.to_string())),
        }
    }
}

/// Host operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Darwin,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => Platform::Linux,
            "macos" => Platform::Darwin,
            "windows" => Platform::Windows,
            _ => Platform::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Darwin => "darwin",
            Platform::Windows => "win32",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user directories the lookup table is rooted in.
#[derive(Debug, Clone, Default)]
pub struct HostDirs {
    pub home: PathBuf,
    pub local_app_data: PathBuf,
    pub program_files: PathBuf,
}

impl HostDirs {
    /// Read host directories from the environment (missing ones stay empty).
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var_os(name).map(PathBuf::from).unwrap_or_default();
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_default();
        Self {
            home,
            local_app_data: var("LOCALAPPDATA"),
            program_files: var("PROGRAMFILES"),
        }
    }
}

/// Resolved browser executable and profile directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserLocation {
    pub executable: PathBuf,
    pub user_data_dir: PathBuf,
}

/// Look up the executable and default profile directory for a channel.
pub fn resolve_browser(
    channel: Channel,
    platform: Platform,
    dirs: &HostDirs,
) -> Result<BrowserLocation, ConfigError> {
    let location = match platform {
        Platform::Darwin => {
            let (app, profile) = match channel {
                Channel::Canary => ("Google Chrome Canary", "Chrome Canary"),
                Channel::Dev => ("Google Chrome Dev", "Chrome Dev"),
                Channel::Beta => ("Google Chrome Beta", "Chrome Beta"),
                Channel::Stable => ("Google Chrome", "Chrome"),
            };
            BrowserLocation {
                executable: PathBuf::from(format!("/Applications/{app}.app/Contents/MacOS/{app}")),
                user_data_dir: dirs
                    .home
                    .join("Library/Application Support/Google")
                    .join(profile),
            }
        }
        Platform::Linux => {
            // No canary channel on Linux; it shares the unstable (dev) build.
            let name = match channel {
                Channel::Canary | Channel::Dev => "google-chrome-unstable",
                Channel::Beta => "google-chrome-beta",
                Channel::Stable => "google-chrome-stable",
            };
            let profile = match channel {
                Channel::Stable => "google-chrome",
                _ => name,
            };
            BrowserLocation {
                executable: PathBuf::from("/usr/bin").join(name),
                user_data_dir: dirs.home.join(".config").join(profile),
            }
        }
        Platform::Windows => {
            let install = match channel {
                Channel::Canary => dirs.local_app_data.join("Google/Chrome SxS"),
                Channel::Dev => dirs.program_files.join("Google/Chrome Dev"),
                Channel::Beta => dirs.program_files.join("Google/Chrome Beta"),
                Channel::Stable => dirs.program_files.join("Google/Chrome"),
            };
            let profile = match channel {
                Channel::Canary => "Chrome SxS",
                Channel::Dev => "Chrome Dev",
                Channel::Beta => "Chrome Beta",
                Channel::Stable => "Chrome",
            };
            BrowserLocation {
                executable: install.join("Application/chrome.exe"),
                user_data_dir: dirs.local_app_data.join("Google").join(profile).join("User Data"),
            }
        }
        Platform::Other => {
            return Err(ConfigError::UnsupportedPlatform {
                channel: channel.as_str().to_string(),
                platform: std::env::consts::OS.to_string(),
            });
        }
    };
    Ok(location)
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
