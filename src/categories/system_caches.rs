use crate::cleaner::{CacheTarget, Cleaner, Location};
use crate::env::Environment;
use crate::resolver::LocationSpec;

const TARGET: CacheTarget = CacheTarget {
    id: "library-caches",
    display_name: "General Library Cache",
    description: "Clean Library cache files",
};

/// Everything in the per-user cache directory. Apps hold files open here, so
/// a stubborn entry is skipped rather than failing the rest.
pub struct LibraryCaches;

impl Cleaner for LibraryCaches {
    fn target(&self) -> &'static CacheTarget {
        &TARGET
    }

    fn locations(&self, env: &Environment) -> Vec<Location> {
        vec![Location::best_effort(
            &env.user_cache_dir,
            LocationSpec::fixed(""),
        )]
    }
}
