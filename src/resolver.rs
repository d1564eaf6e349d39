//! Expands logical cache locations into paths that exist right now.
//!
//! Nothing here touches the filesystem beyond reading it: a location that does
//! not exist simply resolves to nothing.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, FilterEntry, WalkDir};

use crate::utils;

/// Which direct children of a fixed location may be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFilter {
    All,
    /// Everything except the entry with exactly this name.
    Except(&'static str),
    /// Only entries whose name contains this token.
    NameContains(&'static str),
}

impl EntryFilter {
    pub fn accepts(&self, name: &str) -> bool {
        match self {
            EntryFilter::All => true,
            EntryFilter::Except(keep) => name != *keep,
            EntryFilter::NameContains(token) => name.contains(token),
        }
    }
}

/// A logical cache location, relative to some base directory.
#[derive(Debug, Clone)]
pub enum LocationSpec {
    Fixed {
        path: PathBuf,
        filter: EntryFilter,
    },
    MultiFixed {
        paths: Vec<PathBuf>,
        filter: EntryFilter,
    },
    /// Every non-hidden descendant whose relative path contains all tokens.
    WildcardScan { tokens: Vec<&'static str> },
    /// Every non-hidden regular file with this extension.
    ExtensionScan { extension: &'static str },
}

impl LocationSpec {
    pub fn fixed(path: impl Into<PathBuf>) -> Self {
        LocationSpec::Fixed {
            path: path.into(),
            filter: EntryFilter::All,
        }
    }

    pub fn filtered(path: impl Into<PathBuf>, filter: EntryFilter) -> Self {
        LocationSpec::Fixed {
            path: path.into(),
            filter,
        }
    }

    pub fn multi<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        LocationSpec::MultiFixed {
            paths: paths.into_iter().map(Into::into).collect(),
            filter: EntryFilter::All,
        }
    }
}

/// What to delete at a resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// The path is a cache directory; delete its direct children that pass the filter.
    Children(EntryFilter),
    /// The path itself is the thing to delete.
    Entry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub path: PathBuf,
    pub sweep: Sweep,
}

/// Resolve `spec` against `base`. The returned iterator is lazy; scans walk the
/// tree as they are consumed, so entries may be deleted between calls to `next`.
pub fn resolve<'a>(
    base: &'a Path,
    spec: &'a LocationSpec,
) -> Box<dyn Iterator<Item = ResolvedLocation> + 'a> {
    match spec {
        LocationSpec::Fixed { path, filter } => Box::new(fixed(base, path, *filter).into_iter()),
        LocationSpec::MultiFixed { paths, filter } => {
            Box::new(paths.iter().filter_map(move |p| fixed(base, p, *filter)))
        }
        LocationSpec::WildcardScan { tokens } => Box::new(
            ScanMatches::new(base, Matcher::Tokens(tokens.clone())).map(|path| ResolvedLocation {
                path,
                sweep: Sweep::Entry,
            }),
        ),
        LocationSpec::ExtensionScan { extension } => Box::new(
            ScanMatches::new(base, Matcher::Extension(*extension)).map(|path| ResolvedLocation {
                path,
                sweep: Sweep::Entry,
            }),
        ),
    }
}

fn fixed(base: &Path, rel: &Path, filter: EntryFilter) -> Option<ResolvedLocation> {
    let path = utils::under(base, rel);
    // Follows symlinks: a link whose target is gone is as absent as no link.
    if !path.exists() {
        debug!(path = %path.display(), "cache location absent");
        return None;
    }
    Some(ResolvedLocation {
        path,
        sweep: Sweep::Children(filter),
    })
}

enum Matcher {
    Tokens(Vec<&'static str>),
    Extension(&'static str),
}

impl Matcher {
    fn matches(&self, entry: &DirEntry, root: &Path) -> bool {
        match self {
            Matcher::Tokens(tokens) => {
                let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
                let rel = rel.to_string_lossy();
                tokens.iter().all(|t| rel.contains(t))
            }
            Matcher::Extension(ext) => {
                entry.file_type().is_file()
                    && entry.path().extension().and_then(|e| e.to_str()) == Some(*ext)
            }
        }
    }
}

fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
}

/// Recursive walk yielding matches. A matched directory is not descended into,
/// so no match is ever yielded after (or inside) one of its ancestors.
struct ScanMatches {
    walker: FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
    root: PathBuf,
    matcher: Matcher,
    skip_pending: bool,
}

impl ScanMatches {
    fn new(root: &Path, matcher: Matcher) -> Self {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(is_visible as fn(&DirEntry) -> bool);
        Self {
            walker,
            root: root.to_path_buf(),
            matcher,
            skip_pending: false,
        }
    }
}

impl Iterator for ScanMatches {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if std::mem::take(&mut self.skip_pending) {
            self.walker.skip_current_dir();
        }
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.depth() == 0 || !self.matcher.matches(&entry, &self.root) {
                continue;
            }
            if entry.file_type().is_dir() {
                self.skip_pending = true;
            }
            return Some(entry.into_path());
        }
    }
}
