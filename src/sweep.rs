//! Shared deletion engine behind every cleaner.

use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::cleaner::{DeletionPolicy, Location, ScanEntry, ScanResult};
use crate::error::CleanError;
use crate::resolver::{self, Sweep};
use crate::utils;

/// Run `locations` in order, deleting what they resolve to.
///
/// Stops at the first enumeration failure or strict deletion failure; what was
/// already removed stays removed.
pub fn sweep(locations: &[Location], dry_run: bool) -> Result<ScanResult, CleanError> {
    if dry_run {
        sweep_with(locations, &mut |path: &Path| Ok(utils::entry_size(path)))
    } else {
        sweep_with(locations, &mut utils::safe_remove)
    }
}

pub(crate) fn sweep_with(
    locations: &[Location],
    remove: &mut dyn FnMut(&Path) -> io::Result<u64>,
) -> Result<ScanResult, CleanError> {
    let mut result = ScanResult::default();

    for location in locations {
        for resolved in resolver::resolve(&location.base, &location.spec) {
            debug!(path = %resolved.path.display(), "sweeping");
            match resolved.sweep {
                Sweep::Entry => {
                    remove_one(&resolved.path, location.policy, remove, &mut result)?;
                }
                Sweep::Children(filter) => {
                    let read_dir = std::fs::read_dir(&resolved.path).map_err(|source| {
                        CleanError::Enumeration {
                            path: resolved.path.clone(),
                            source,
                        }
                    })?;
                    let mut children = Vec::new();
                    for entry in read_dir {
                        let entry = entry.map_err(|source| CleanError::Enumeration {
                            path: resolved.path.clone(),
                            source,
                        })?;
                        if filter.accepts(&entry.file_name().to_string_lossy()) {
                            children.push(entry.path());
                        }
                    }
                    children.sort();
                    for child in children {
                        remove_one(&child, location.policy, remove, &mut result)?;
                    }
                }
            }
        }
    }

    Ok(result)
}

fn remove_one(
    path: &Path,
    policy: DeletionPolicy,
    remove: &mut dyn FnMut(&Path) -> io::Result<u64>,
    result: &mut ScanResult,
) -> Result<(), CleanError> {
    match remove(path) {
        Ok(size) => {
            result.total_bytes += size;
            result.entries.push(ScanEntry {
                path: path.to_path_buf(),
                size_bytes: size,
            });
            Ok(())
        }
        Err(source) => match policy {
            DeletionPolicy::Strict => Err(CleanError::Deletion {
                path: path.to_path_buf(),
                source,
            }),
            DeletionPolicy::BestEffort => {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "skipping entry that could not be removed"
                );
                result
                    .suppressed
                    .push(format!("Failed to remove {}: {source}", path.display()));
                Ok(())
            }
        },
    }
}
