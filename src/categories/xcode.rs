use crate::cleaner::{CacheTarget, Cleaner, Location};
use crate::env::Environment;
use crate::resolver::LocationSpec;

const TARGET: CacheTarget = CacheTarget {
    id: "xcode",
    display_name: "Xcode",
    description: "Clean Xcode derived data and archives",
};

pub struct Xcode;

impl Cleaner for Xcode {
    fn target(&self) -> &'static CacheTarget {
        &TARGET
    }

    fn locations(&self, env: &Environment) -> Vec<Location> {
        vec![Location::strict(
            &env.home,
            LocationSpec::multi([
                "Library/Developer/Xcode/DerivedData",
                "Library/Developer/Xcode/Archives",
            ]),
        )]
    }
}
