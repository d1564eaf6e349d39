use std::fmt;
use std::path::PathBuf;

use crate::env::Environment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable(String),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => f.write_str("available"),
            Availability::Unavailable(reason) => f.write_str(reason),
        }
    }
}

/// What must hold before a cleaner is allowed to touch anything.
#[derive(Debug, Clone)]
pub enum Precondition {
    /// Pure user-directory cache with no external dependency.
    Always,
    /// `marker` (relative to the applications directory) must exist, and then
    /// one of `processes` must be running.
    AppRunning {
        app: &'static str,
        marker: &'static str,
        processes: &'static [&'static str],
    },
    /// One of the environment's package-manager roots must exist.
    InstallRoot { app: &'static str },
}

impl Precondition {
    /// Evaluate against the live filesystem and process table. Never cached.
    pub fn check(&self, env: &Environment) -> Availability {
        match self {
            Precondition::Always => Availability::Available,
            Precondition::AppRunning {
                app,
                marker,
                processes,
            } => match installed(env, app, marker) {
                Availability::Available if env.processes.is_running(processes) => {
                    Availability::Available
                }
                Availability::Available => {
                    Availability::Unavailable(format!("{app} is not running"))
                }
                unavailable => unavailable,
            },
            Precondition::InstallRoot { app } => match first_existing(&env.brew_roots) {
                Some(_) => Availability::Available,
                None => Availability::Unavailable(format!("{app} is not installed")),
            },
        }
    }
}

fn installed(env: &Environment, app: &str, marker: &str) -> Availability {
    if env.applications_dir.join(marker).exists() {
        Availability::Available
    } else {
        Availability::Unavailable(format!("{app} is not installed"))
    }
}

/// The first candidate that exists, in priority order.
pub fn first_existing(candidates: &[PathBuf]) -> Option<&PathBuf> {
    candidates.iter().find(|p| p.exists())
}
