// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Target dispatch.
//!
//! Maps each target to the collaborator (or the unit matrix) that runs it.
//! Errors never escape: a failing collaborator becomes a failed result so
//! the round can carry on with the next target.

use crate::backend::Target;
use crate::collab::{Collaborators, TargetContext};
use crate::report::TargetResult;
use crate::unit::{UnitMatrix, UnitSuite};

pub struct TargetExecutor<'a> {
    collaborators: &'a dyn Collaborators,
    unit_suite: &'a dyn UnitSuite,
}

impl<'a> TargetExecutor<'a> {
    pub fn new(collaborators: &'a dyn Collaborators, unit_suite: &'a dyn UnitSuite) -> Self {
        Self {
            collaborators,
            unit_suite,
        }
    }

    /// Run one target. Returns None when the target is skipped.
    ///
    /// The only skip is a performance run with zero warmup and zero
    /// measured iterations.
    pub fn execute(&self, target: Target, ctx: &TargetContext<'_>) -> Option<TargetResult> {
        if target == Target::Performance && ctx.config.counts.is_empty_performance() {
            ctx.log.log("performance test skipped: no warmup or run iterations");
            return None;
        }

        let result = match target {
            Target::Conformance | Target::Performance => self
                .collaborators
                .run_benchmark(target, ctx)
                .map(TargetResult::Value),
            Target::Unit => {
                let matrix = UnitMatrix::from_config(ctx.config, self.unit_suite);
                Ok(TargetResult::Unit(matrix.run(
                    ctx.round_dir,
                    ctx.timestamp,
                    ctx.log,
                )))
            }
            Target::Demo => self.collaborators.run_demo(ctx).map(TargetResult::Value),
            Target::Trace => self
                .collaborators
                .parse_trace(ctx)
                .map(|()| TargetResult::Completed),
        };

        Some(result.unwrap_or_else(|e| {
            let message = format!("{e:#}");
            ctx.log.error(&format!("{target} test failed: {message}"));
            TargetResult::failed(message)
        }))
    }
}
