// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project settings file (`sweep.toml`).
//!
//! Holds machine-level settings that rarely change between invocations:
//! where output goes, where the test repository lives, the remote archive,
//! and the commands bound to each collaborator. Relative paths resolve
//! against the directory containing the settings file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::defaults;

/// Parsed `sweep.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Output root for run directories.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Trial definition file.
    #[serde(default)]
    pub trials: Option<PathBuf>,

    /// Checkout of the repository whose unit tests are run.
    #[serde(default)]
    pub tfjs_dir: Option<PathBuf>,

    /// GPU device identifier used to key uploaded artifacts.
    #[serde(default)]
    pub device_id: Option<String>,

    #[serde(default)]
    pub remote: RemoteSettings,

    #[serde(default)]
    pub unit: UnitSettings,

    #[serde(default)]
    pub collaborators: CollaboratorSettings,

    /// Directory the file was loaded from.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Remote archive reached over ssh.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteSettings {
    /// `user@host` passed to ssh and scp.
    pub host: Option<String>,

    /// Archive root on the remote host.
    pub root: Option<String>,

    /// Bound for each ssh or scp invocation.
    pub timeout_secs: Option<u64>,

    /// ssh program (defaults to `ssh` on PATH).
    pub ssh: Option<String>,

    /// scp program (defaults to `scp` on PATH).
    pub scp: Option<String>,
}

impl RemoteSettings {
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults::remote::TIMEOUT)
    }
}

/// Unit matrix settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitSettings {
    /// Override for the build and test phase timeout.
    pub timeout_secs: Option<u64>,

    /// Shell used to run package scripts (e.g. `yarn` on Windows needs `cmd /c`).
    #[serde(default)]
    pub shell: Vec<String>,
}

/// External commands bound to each collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollaboratorSettings {
    #[serde(default)]
    pub benchmark: Vec<String>,

    #[serde(default)]
    pub demo: Vec<String>,

    #[serde(default)]
    pub trace: Vec<String>,

    #[serde(default)]
    pub prepare: Vec<String>,

    /// Bound for each collaborator command (none = unbounded).
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

impl Settings {
    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut settings: Settings =
            toml::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        settings.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(settings)
    }

    /// Locate the settings file for a run started in `start_dir`.
    ///
    /// Checks `start_dir` and its ancestors, giving up after the first
    /// directory that holds a `.git` entry so a checkout never picks up
    /// settings from outside it.
    pub fn discover(start_dir: &Path) -> Option<PathBuf> {
        for dir in start_dir.ancestors() {
            let candidate = dir.join(defaults::SETTINGS_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            if dir.join(".git").exists() {
                break;
            }
        }
        None
    }

    /// Resolve a configured path against the settings directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(
            self.output_dir
                .as_deref()
                .unwrap_or(Path::new(defaults::OUTPUT_DIR)),
        )
    }

    pub fn trials_path(&self) -> PathBuf {
        self.resolve(
            self.trials
                .as_deref()
                .unwrap_or(Path::new(defaults::TRIALS_FILE)),
        )
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
