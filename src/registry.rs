//! The entry point callers use: list targets, check them, run a selection.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Local;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::availability::Availability;
use crate::categories;
use crate::cleaner::{CacheTarget, Cleaner};
use crate::env::Environment;
use crate::error::CleanError;
use crate::report::{ExecutionReport, RunOutcome, Status};

/// Lets a caller abandon a run. Observed only between targets.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Resolve and size what would be removed without deleting anything.
    pub dry_run: bool,
    /// Run cleaners on the rayon pool. Report order is unaffected.
    pub parallel: bool,
    pub cancel: Option<CancelToken>,
}

/// A target together with its availability at the time of the call.
#[derive(Debug, Clone)]
pub struct TargetStatus {
    pub target: &'static CacheTarget,
    pub availability: Availability,
}

pub struct CleanerRegistry {
    env: Environment,
    cleaners: Vec<Box<dyn Cleaner>>,
}

impl CleanerRegistry {
    /// Registry with every built-in cleaner.
    pub fn new(env: Environment) -> Self {
        Self::with_cleaners(env, categories::all_cleaners())
    }

    pub fn with_cleaners(env: Environment, cleaners: Vec<Box<dyn Cleaner>>) -> Self {
        Self { env, cleaners }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Targets in registry order, without checking anything.
    pub fn targets(&self) -> impl Iterator<Item = &'static CacheTarget> + '_ {
        self.cleaners.iter().map(|c| c.target())
    }

    /// Every target with a fresh availability check. Nothing is cached between calls.
    pub fn list_targets(&self) -> Vec<TargetStatus> {
        self.cleaners
            .iter()
            .map(|c| TargetStatus {
                target: c.target(),
                availability: c.check(&self.env),
            })
            .collect()
    }

    /// Re-run every availability check without deleting anything, returning
    /// only the targets that currently cannot be cleaned.
    pub fn refresh(&self) -> Vec<TargetStatus> {
        self.list_targets()
            .into_iter()
            .filter(|s| !s.availability.is_available())
            .collect()
    }

    pub fn check(&self, id: &str) -> Result<Availability, CleanError> {
        Ok(self.find(id)?.check(&self.env))
    }

    pub fn run<I, S>(&self, selected: I) -> Result<ExecutionReport, CleanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_with(selected, &RunOptions::default())
    }

    /// Run the selected cleaners in registry order.
    ///
    /// Only an unknown id is an error; every per-target problem ends up in the
    /// report. Unknown ids are rejected before anything is touched.
    pub fn run_with<I, S>(
        &self,
        selected: I,
        options: &RunOptions,
    ) -> Result<ExecutionReport, CleanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut wanted = HashSet::new();
        for id in selected {
            let id = id.as_ref();
            wanted.insert(self.find(id)?.target().id);
        }

        let mut report = ExecutionReport::empty(options.dry_run);
        if wanted.is_empty() {
            return Ok(report);
        }

        let chosen: Vec<&dyn Cleaner> = self
            .cleaners
            .iter()
            .map(|c| &**c)
            .filter(|c| wanted.contains(c.target().id))
            .collect();

        let results: Vec<Option<RunOutcome>> = if options.parallel {
            chosen
                .par_iter()
                .map(|c| self.run_one(*c, options))
                .collect()
        } else {
            chosen.iter().map(|c| self.run_one(*c, options)).collect()
        };

        report.cancelled = results.iter().any(Option::is_none);
        report.outcomes = results.into_iter().flatten().collect();
        report.finished_at = Local::now();
        Ok(report)
    }

    fn find(&self, id: &str) -> Result<&dyn Cleaner, CleanError> {
        self.cleaners
            .iter()
            .map(|c| &**c)
            .find(|c| c.target().id == id)
            .ok_or_else(|| CleanError::UnknownTarget(id.to_string()))
    }

    /// `None` when the run was cancelled before this target started.
    fn run_one(&self, cleaner: &dyn Cleaner, options: &RunOptions) -> Option<RunOutcome> {
        let target = cleaner.target();
        if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            debug!(id = target.id, "run cancelled before target");
            return None;
        }

        let outcome = match cleaner.check(&self.env) {
            Availability::Unavailable(reason) => {
                RunOutcome::skipped(target.id, target.display_name, reason)
            }
            Availability::Available => match cleaner.clean(&self.env, options.dry_run) {
                Ok(result) => RunOutcome {
                    id: target.id,
                    display_name: target.display_name,
                    status: Status::Success,
                    entries: result.entries,
                    freed_bytes: result.total_bytes,
                    suppressed: result.suppressed,
                },
                Err(err) => RunOutcome::failed(target.id, target.display_name, err.to_string()),
            },
        };

        info!(
            id = target.id,
            status = %outcome.status,
            freed = outcome.freed_bytes,
            "target finished"
        );
        Some(outcome)
    }
}
