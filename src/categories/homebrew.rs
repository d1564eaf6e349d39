use crate::availability::{first_existing, Precondition};
use crate::cleaner::{CacheTarget, Cleaner, Location};
use crate::env::Environment;
use crate::resolver::LocationSpec;

const TARGET: CacheTarget = CacheTarget {
    id: "homebrew",
    display_name: "Homebrew",
    description: "Clean Homebrew cache",
};

pub struct HomebrewCache;

impl Cleaner for HomebrewCache {
    fn target(&self) -> &'static CacheTarget {
        &TARGET
    }

    fn precondition(&self) -> Precondition {
        Precondition::InstallRoot { app: "Homebrew" }
    }

    fn locations(&self, env: &Environment) -> Vec<Location> {
        let Some(root) = first_existing(&env.brew_roots) else {
            return Vec::new();
        };
        vec![Location::strict(
            root,
            LocationSpec::multi(["Library/Homebrew/Cache", "Library/Caches/Homebrew"]),
        )]
    }
}
