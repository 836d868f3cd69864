// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod cmd_run;
mod cmd_upload;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sweep::cli::{Cli, Command};
use sweep::config::Settings;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "SWEEP_LOG";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Command::Run(args) => cmd_run::run(&cli, args),
        Command::Upload(args) => cmd_upload::run(&cli, args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "sweep=debug" } else { "sweep=info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load settings from `--config`, or discover sweep.toml from the current directory.
///
/// Without a settings file, defaults apply relative to the current directory.
fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let cwd = std::env::current_dir()?;
    let path = match &cli.config {
        Some(path) => Some(cwd.join(path)),
        None => Settings::discover(&cwd),
    };
    match path {
        Some(path) => {
            tracing::debug!("settings: {}", path.display());
            Settings::load(&path).with_context(|| format!("failed to load {}", path.display()))
        }
        None => Ok(Settings {
            base_dir: cwd,
            ..Settings::default()
        }),
    }
}
