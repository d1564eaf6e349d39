//! Finds and removes the caches developer tools leave behind.
//!
//! [`CleanerRegistry`] is the entry point: it lists the built-in targets,
//! checks whether each one applies on this machine and runs a selection,
//! returning an [`ExecutionReport`].

pub mod availability;
pub mod categories;
pub mod cleaner;
pub mod env;
pub mod error;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod sweep;
pub mod utils;

pub use availability::Availability;
pub use cleaner::{CacheTarget, Cleaner};
pub use env::Environment;
pub use error::CleanError;
pub use registry::{CancelToken, CleanerRegistry, RunOptions, TargetStatus};
pub use report::{ExecutionReport, RunOutcome, Status};
