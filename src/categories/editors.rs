use crate::cleaner::{CacheTarget, Cleaner, Location};
use crate::env::Environment;
use crate::resolver::LocationSpec;

// --- Android Studio ---

const ANDROID_STUDIO: CacheTarget = CacheTarget {
    id: "android-studio",
    display_name: "Android Studio",
    description: "Clean Android Studio caches",
};

/// Android Studio keeps one cache tree per installed version, so the home
/// directory is scanned instead of listing paths.
pub struct AndroidStudio;

impl Cleaner for AndroidStudio {
    fn target(&self) -> &'static CacheTarget {
        &ANDROID_STUDIO
    }

    fn locations(&self, env: &Environment) -> Vec<Location> {
        vec![Location::best_effort(
            &env.home,
            LocationSpec::WildcardScan {
                tokens: vec!["AndroidStudio", "cache"],
            },
        )]
    }
}

// --- VS Code ---

const VSCODE: CacheTarget = CacheTarget {
    id: "vscode",
    display_name: "VS Code",
    description: "Clean VS Code caches",
};

pub struct VsCode;

impl Cleaner for VsCode {
    fn target(&self) -> &'static CacheTarget {
        &VSCODE
    }

    fn locations(&self, env: &Environment) -> Vec<Location> {
        vec![Location::strict(
            &env.home,
            LocationSpec::multi([
                "Library/Application Support/Code/Cache",
                "Library/Application Support/Code/CachedData",
                "Library/Application Support/Code/CachedExtensions",
                ".vscode/extensions",
            ]),
        )]
    }
}
