use std::fmt;

use chrono::{DateTime, Local};

use crate::cleaner::ScanEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Success,
    Skipped(String),
    Failed(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => f.write_str("success"),
            Status::Skipped(reason) => write!(f, "skipped: {reason}"),
            Status::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// What happened to one selected target.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub id: &'static str,
    pub display_name: &'static str,
    pub status: Status,
    /// What was removed, or would be in a dry run.
    pub entries: Vec<ScanEntry>,
    pub freed_bytes: u64,
    /// Best-effort removals that were skipped.
    pub suppressed: Vec<String>,
}

impl RunOutcome {
    pub fn skipped(id: &'static str, display_name: &'static str, reason: String) -> Self {
        Self {
            id,
            display_name,
            status: Status::Skipped(reason),
            entries: Vec::new(),
            freed_bytes: 0,
            suppressed: Vec::new(),
        }
    }

    pub fn failed(id: &'static str, display_name: &'static str, reason: String) -> Self {
        Self {
            status: Status::Failed(reason),
            ..Self::skipped(id, display_name, String::new())
        }
    }
}

/// Outcomes of one batch, in registry order.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub outcomes: Vec<RunOutcome>,
    /// Set when the run was abandoned before every selected target was attempted.
    pub cancelled: bool,
    pub dry_run: bool,
}

impl ExecutionReport {
    pub(crate) fn empty(dry_run: bool) -> Self {
        let now = Local::now();
        Self {
            started_at: now,
            finished_at: now,
            outcomes: Vec::new(),
            cancelled: false,
            dry_run,
        }
    }

    /// True when no attempted target failed.
    pub fn is_success(&self) -> bool {
        !self
            .outcomes
            .iter()
            .any(|o| matches!(o.status, Status::Failed(_)))
    }

    pub fn total_freed(&self) -> u64 {
        self.outcomes.iter().map(|o| o.freed_bytes).sum()
    }

    pub fn outcome(&self, id: &str) -> Option<&RunOutcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }

    /// `<display name>: <reason>` for every failure, one per line.
    pub fn error_message(&self) -> Option<String> {
        let lines: Vec<String> = self
            .outcomes
            .iter()
            .filter_map(|o| match &o.status {
                Status::Failed(reason) => Some(format!("{}: {reason}", o.display_name)),
                _ => None,
            })
            .collect();
        (!lines.is_empty()).then(|| lines.join("\n"))
    }

    pub fn skip_messages(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                Status::Skipped(reason) => Some(format!("{}: {reason}", o.display_name)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(id: &'static str, freed: u64) -> RunOutcome {
        RunOutcome {
            status: Status::Success,
            freed_bytes: freed,
            ..RunOutcome::skipped(id, id, String::new())
        }
    }

    #[test]
    fn failures_are_joined_per_line() {
        let mut report = ExecutionReport::empty(false);
        report.outcomes = vec![
            success("npm", 10),
            RunOutcome::failed("xcode", "Xcode", "cannot read DerivedData".into()),
            RunOutcome::skipped("docker", "Docker", "Docker.app is not installed".into()),
            RunOutcome::failed("gradle", "Gradle", "permission denied".into()),
        ];

        assert!(!report.is_success());
        assert_eq!(
            report.error_message().as_deref(),
            Some("Xcode: cannot read DerivedData\nGradle: permission denied")
        );
        assert_eq!(report.skip_messages(), vec!["Docker: Docker.app is not installed"]);
    }

    #[test]
    fn skips_do_not_fail_the_report() {
        let mut report = ExecutionReport::empty(false);
        report.outcomes = vec![
            success("npm", 10),
            success("gradle", 5),
            RunOutcome::skipped("homebrew", "Homebrew", "Homebrew is not installed".into()),
        ];
        assert!(report.is_success());
        assert!(report.error_message().is_none());
        assert_eq!(report.total_freed(), 15);
    }
}
