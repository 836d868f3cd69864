// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-matrix orchestration and result sync.
//!
//! A run resolves a [`config::RunConfig`], then the [`scheduler::Scheduler`]
//! repeats the requested targets for a number of rounds. Benchmarks, demos,
//! trace parsing and reports are delegated to [`collab::Collaborators`];
//! unit tests run through the [`unit::UnitMatrix`]. Dated results can then be
//! uploaded with [`sync::sync`].

pub mod backend;
pub mod cli;
pub mod collab;
pub mod config;
pub mod executor;
pub mod git;
pub mod launch;
pub mod process;
pub mod report;
pub mod runlog;
pub mod scheduler;
pub mod sync;
pub mod timestamp;
pub mod trial;
pub mod unit;

#[cfg(test)]
mod test_utils;
