// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External process execution under a timeout.
//!
//! Output (stdout and stderr) is appended to a log file. A timeout kills the
//! child together with everything it spawned and is reported on the outcome,
//! never as an error: callers decide what a failed or timed-out step means.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A program invocation with explicit working directory and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    /// Build from an argv list (program first). Returns None if empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone()).args(args.iter().cloned()))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Wrap this command in a shell launcher such as `["cmd", "/c"]`.
    ///
    /// An empty launcher returns the command unchanged.
    pub fn wrapped(self, launcher: &[String]) -> Self {
        let Some((program, prefix)) = launcher.split_first() else {
            return self;
        };
        let mut args: Vec<String> = prefix.to_vec();
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: program.clone(),
            args,
            cwd: self.cwd,
            env: self.env,
        }
    }

    /// Human-readable command line for logs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How a process invocation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
    /// The process was killed after exceeding its timeout.
    pub timed_out: bool,
    /// The process could not be started or waited on.
    pub error: Option<String>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0) && !self.timed_out && self.error.is_none()
    }

    fn failed_to_start(error: String) -> Self {
        Self {
            exit_code: None,
            timed_out: false,
            error: Some(error),
            elapsed: Duration::ZERO,
        }
    }

    /// Short description for logs.
    pub fn describe(&self) -> String {
        if self.timed_out {
            format!("timed out after {:.1}s", self.elapsed.as_secs_f64())
        } else if let Some(error) = &self.error {
            error.clone()
        } else {
            match self.exit_code {
                Some(code) => format!("exited with {code}"),
                None => "terminated by signal".to_string(),
            }
        }
    }
}

/// Run `spec`, appending its output to `log_file`.
///
/// With `timeout = None` the call blocks until the process exits.
pub fn run(spec: &CommandSpec, log_file: &Path, timeout: Option<Duration>) -> ProcessOutcome {
    tracing::debug!("running `{}` (log: {})", spec.display(), log_file.display());

    let log = match open_append(log_file) {
        Ok(f) => f,
        Err(e) => {
            return ProcessOutcome::failed_to_start(format!(
                "failed to open log {}: {e}",
                log_file.display()
            ));
        }
    };
    let stderr = match log.try_clone() {
        Ok(f) => f,
        Err(e) => return ProcessOutcome::failed_to_start(format!("failed to clone log handle: {e}")),
    };

    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .envs(spec.env.iter().map(|(k, v)| (k, v)))
        .stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(stderr));
    if let Some(dir) = &spec.cwd {
        command.current_dir(dir);
    }
    // Own process group, so a timeout can take down the whole tree.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let started = Instant::now();
    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            let message = format!("failed to spawn `{}`: {e}", spec.program);
            note(log_file, &message);
            return ProcessOutcome::failed_to_start(message);
        }
    };

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return ProcessOutcome {
                    exit_code: status.code(),
                    timed_out: false,
                    error: None,
                    elapsed: started.elapsed(),
                };
            }
            Ok(None) => {
                if timeout.is_some_and(|t| started.elapsed() >= t) {
                    if let Err(e) = kill_tree(&mut child) {
                        tracing::warn!("failed to kill `{}`: {e}", spec.program);
                    }
                    let exit_code = child.wait().ok().and_then(|s| s.code());
                    let outcome = ProcessOutcome {
                        exit_code,
                        timed_out: true,
                        error: None,
                        elapsed: started.elapsed(),
                    };
                    note(log_file, &format!("`{}` {}", spec.display(), outcome.describe()));
                    return outcome;
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return ProcessOutcome {
                    exit_code: None,
                    timed_out: false,
                    error: Some(format!("failed to wait on `{}`: {e}", spec.program)),
                    elapsed: started.elapsed(),
                };
            }
        }
    }
}

/// Kill `child` and its descendants, falling back to the child alone.
fn kill_tree(child: &mut Child) -> std::io::Result<()> {
    let pid = child.id();
    #[cfg(unix)]
    let mut killer = {
        let mut cmd = Command::new("kill");
        cmd.args(["-KILL", "--", &format!("-{pid}")]);
        cmd
    };
    #[cfg(windows)]
    let mut killer = {
        let mut cmd = Command::new("taskkill");
        cmd.args(["/T", "/F", "/PID", &pid.to_string()]);
        cmd
    };
    let status = killer
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => {
            tracing::debug!("tree kill of {pid} exited with {status}, killing child only");
            child.kill()
        }
        Err(e) => {
            tracing::debug!("tree kill of {pid} failed to start: {e}, killing child only");
            child.kill()
        }
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Append a line of our own to a process log.
fn note(log_file: &Path, message: &str) {
    let written = open_append(log_file).and_then(|mut f| writeln!(f, "[sweep] {message}"));
    if let Err(e) = written {
        tracing::warn!("failed to write to {}: {e}", log_file.display());
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
