use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sysinfo::{ProcessesToUpdate, System};

use crate::error::CleanError;

const APPLICATIONS_DIR: &str = "/Applications";
/// Apple Silicon first, then Intel.
const BREW_ROOTS: [&str; 2] = ["/opt/homebrew", "/usr/local/Homebrew"];

/// Answers "is a process with one of these names running?".
pub trait ProcessProbe: Send + Sync {
    fn is_running(&self, names: &[&str]) -> bool;
}

/// Queries the live process table through sysinfo. Every call takes a fresh snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcesses;

impl ProcessProbe for SystemProcesses {
    fn is_running(&self, names: &[&str]) -> bool {
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::All, true);
        sys.processes().values().any(|process| {
            let name = process.name().to_string_lossy();
            names.iter().any(|n| name == *n)
        })
    }
}

/// A fixed list of running process names, for callers that already know the answer.
#[derive(Debug, Default, Clone)]
pub struct StaticProcesses(pub Vec<String>);

impl ProcessProbe for StaticProcesses {
    fn is_running(&self, names: &[&str]) -> bool {
        self.0.iter().any(|running| names.contains(&running.as_str()))
    }
}

/// Where the cleaners look. Built once and shared by every strategy in a registry.
#[derive(Clone)]
pub struct Environment {
    pub home: PathBuf,
    /// The OS per-user cache directory (`~/Library/Caches` on macOS, `~/.cache` elsewhere).
    pub user_cache_dir: PathBuf,
    pub applications_dir: PathBuf,
    /// Package-manager install roots, tried in order.
    pub brew_roots: Vec<PathBuf>,
    pub processes: Arc<dyn ProcessProbe>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("home", &self.home)
            .field("user_cache_dir", &self.user_cache_dir)
            .field("applications_dir", &self.applications_dir)
            .field("brew_roots", &self.brew_roots)
            .finish_non_exhaustive()
    }
}

impl Environment {
    /// The current user's environment.
    pub fn detect() -> Result<Self, CleanError> {
        let home = dirs::home_dir().ok_or(CleanError::HomeNotFound)?;
        let mut env = Self::for_home(home);
        if let Some(cache) = dirs::cache_dir() {
            env.user_cache_dir = cache;
        }
        Ok(env)
    }

    /// An environment rooted at `home`, with the platform cache layout beneath it.
    pub fn for_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            user_cache_dir: platform_cache_dir(&home),
            home,
            applications_dir: PathBuf::from(APPLICATIONS_DIR),
            brew_roots: BREW_ROOTS.iter().map(PathBuf::from).collect(),
            processes: Arc::new(SystemProcesses),
        }
    }

    /// Like [`Environment::for_home`], but the applications directory and the
    /// install roots are relocated under `home` too, so nothing outside it is
    /// read or removed. `/opt/homebrew` becomes `<home>/opt/homebrew`.
    pub fn sandboxed(home: impl Into<PathBuf>) -> Self {
        let env = Self::for_home(home);
        let relocate = |path: &Path| env.home.join(path.strip_prefix("/").unwrap_or(path));
        let applications_dir = relocate(&env.applications_dir);
        let brew_roots = env.brew_roots.iter().map(|r| relocate(r)).collect();
        env.with_applications_dir(applications_dir).with_brew_roots(brew_roots)
    }

    pub fn with_applications_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.applications_dir = dir.into();
        self
    }

    pub fn with_brew_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.brew_roots = roots;
        self
    }

    pub fn with_processes(mut self, probe: impl ProcessProbe + 'static) -> Self {
        self.processes = Arc::new(probe);
        self
    }
}

fn platform_cache_dir(home: &Path) -> PathBuf {
    if cfg!(target_os = "macos") {
        home.join("Library/Caches")
    } else {
        home.join(".cache")
    }
}
