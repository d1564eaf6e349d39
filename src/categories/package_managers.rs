use crate::cleaner::{CacheTarget, Cleaner, Location};
use crate::env::Environment;
use crate::resolver::{EntryFilter, LocationSpec};

// --- npm ---

const NPM: CacheTarget = CacheTarget {
    id: "npm",
    display_name: "NPM",
    description: "Clean NPM cache",
};

pub struct Npm;

impl Cleaner for Npm {
    fn target(&self) -> &'static CacheTarget {
        &NPM
    }

    fn locations(&self, env: &Environment) -> Vec<Location> {
        vec![Location::strict(&env.home, LocationSpec::fixed(".npm/_cacache"))]
    }
}

// --- CocoaPods ---

const COCOAPODS: CacheTarget = CacheTarget {
    id: "cocoapods",
    display_name: "CocoaPods",
    description: "Clean CocoaPods cache",
};

pub struct CocoaPods;

impl Cleaner for CocoaPods {
    fn target(&self) -> &'static CacheTarget {
        &COCOAPODS
    }

    fn locations(&self, env: &Environment) -> Vec<Location> {
        vec![Location::best_effort(
            &env.home,
            LocationSpec::fixed("Library/Caches/CocoaPods"),
        )]
    }
}

// --- Gradle ---

const GRADLE: CacheTarget = CacheTarget {
    id: "gradle",
    display_name: "Gradle",
    description: "Clean Gradle cache",
};

pub struct Gradle;

impl Cleaner for Gradle {
    fn target(&self) -> &'static CacheTarget {
        &GRADLE
    }

    fn locations(&self, env: &Environment) -> Vec<Location> {
        vec![Location::strict(&env.home, LocationSpec::fixed(".gradle/caches"))]
    }
}

// --- Ruby gems ---

const RUBY_GEMS: CacheTarget = CacheTarget {
    id: "ruby-gems",
    display_name: "Ruby Gems",
    description: "Clean Ruby Gems cache",
};

pub struct RubyGems;

impl Cleaner for RubyGems {
    fn target(&self) -> &'static CacheTarget {
        &RUBY_GEMS
    }

    /// Installed gems live next to the caches; only cache-named entries go.
    fn locations(&self, env: &Environment) -> Vec<Location> {
        vec![Location::strict(
            &env.home,
            LocationSpec::filtered(".gem/ruby", EntryFilter::NameContains("cache")),
        )]
    }
}
