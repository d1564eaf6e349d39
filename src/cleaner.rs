use std::path::PathBuf;

use crate::availability::{Availability, Precondition};
use crate::env::Environment;
use crate::error::CleanError;
use crate::resolver::LocationSpec;
use crate::sweep;

/// Display metadata for one supported tool. `id` is stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTarget {
    /// Machine-readable id used on the command line (e.g. "xcode").
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

/// Whether a failed removal fails the whole cleaner or is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionPolicy {
    Strict,
    BestEffort,
}

/// One place a cleaner deletes from.
#[derive(Debug, Clone)]
pub struct Location {
    pub base: PathBuf,
    pub spec: LocationSpec,
    pub policy: DeletionPolicy,
}

impl Location {
    pub fn strict(base: impl Into<PathBuf>, spec: LocationSpec) -> Self {
        Self {
            base: base.into(),
            spec,
            policy: DeletionPolicy::Strict,
        }
    }

    pub fn best_effort(base: impl Into<PathBuf>, spec: LocationSpec) -> Self {
        Self {
            base: base.into(),
            spec,
            policy: DeletionPolicy::BestEffort,
        }
    }
}

/// One item removed (or, in a dry run, that would be removed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Result of cleaning a single target.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub entries: Vec<ScanEntry>,
    pub total_bytes: u64,
    /// Best-effort removals that failed and were skipped.
    pub suppressed: Vec<String>,
}

/// The trait every cleaner module implements.
///
/// Cleaners are stateless descriptors: the precondition and locations are data,
/// the deletion itself is shared in [`sweep`].
pub trait Cleaner: Send + Sync {
    fn target(&self) -> &'static CacheTarget;

    fn precondition(&self) -> Precondition {
        Precondition::Always
    }

    /// Locations in deletion order.
    fn locations(&self, env: &Environment) -> Vec<Location>;

    fn check(&self, env: &Environment) -> Availability {
        self.precondition().check(env)
    }

    /// Delete everything the locations resolve to. With `dry_run`, only report it.
    fn clean(&self, env: &Environment, dry_run: bool) -> Result<ScanResult, CleanError> {
        sweep::sweep(&self.locations(env), dry_run)
    }
}
