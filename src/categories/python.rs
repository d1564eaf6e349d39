use crate::cleaner::{CacheTarget, Cleaner, Location};
use crate::env::Environment;
use crate::resolver::LocationSpec;

const TARGET: CacheTarget = CacheTarget {
    id: "python",
    display_name: "Python",
    description: "Clean Python pip and pyc caches",
};

pub struct Python;

impl Cleaner for Python {
    fn target(&self) -> &'static CacheTarget {
        &TARGET
    }

    fn locations(&self, env: &Environment) -> Vec<Location> {
        vec![
            Location::best_effort(
                &env.home,
                LocationSpec::multi(["Library/Caches/pip", ".cache/pip"]),
            ),
            Location::best_effort(&env.home, LocationSpec::ExtensionScan { extension: "pyc" }),
        ]
    }
}
