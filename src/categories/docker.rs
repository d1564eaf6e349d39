use crate::availability::Precondition;
use crate::cleaner::{CacheTarget, Cleaner, Location};
use crate::env::Environment;
use crate::resolver::{EntryFilter, LocationSpec};

const TARGET: CacheTarget = CacheTarget {
    id: "docker",
    display_name: "Docker",
    description: "Clean Docker Desktop VM data and caches",
};

pub struct Docker;

impl Cleaner for Docker {
    fn target(&self) -> &'static CacheTarget {
        &TARGET
    }

    fn precondition(&self) -> Precondition {
        Precondition::AppRunning {
            app: "Docker.app",
            marker: "Docker.app",
            processes: &["Docker Desktop", "Docker", "com.docker.backend"],
        }
    }

    fn locations(&self, env: &Environment) -> Vec<Location> {
        let home = &env.home;
        vec![
            // The hyperkit VM image is live state, not cache.
            Location::strict(
                home,
                LocationSpec::filtered(
                    "Library/Containers/com.docker.docker/Data/vms",
                    EntryFilter::Except("hyperkit"),
                ),
            ),
            Location::strict(
                home,
                LocationSpec::filtered(
                    "Library/Group Containers/group.com.docker",
                    EntryFilter::NameContains("cache"),
                ),
            ),
            Location::strict(
                home,
                LocationSpec::filtered(".docker", EntryFilter::NameContains("cache")),
            ),
        ]
    }
}
