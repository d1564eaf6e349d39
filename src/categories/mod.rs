mod docker;
mod editors;
mod homebrew;
mod package_managers;
mod python;
mod system_caches;
mod xcode;

use crate::cleaner::Cleaner;

pub use docker::Docker;
pub use editors::{AndroidStudio, VsCode};
pub use homebrew::HomebrewCache;
pub use package_managers::{CocoaPods, Gradle, Npm, RubyGems};
pub use python::Python;
pub use system_caches::LibraryCaches;
pub use xcode::Xcode;

/// Every built-in cleaner, in display and execution order.
pub fn all_cleaners() -> Vec<Box<dyn Cleaner>> {
    vec![
        Box::new(Docker),
        Box::new(HomebrewCache),
        Box::new(LibraryCaches),
        Box::new(Xcode),
        Box::new(Npm),
        Box::new(CocoaPods),
        Box::new(Gradle),
        Box::new(AndroidStudio),
        Box::new(VsCode),
        Box::new(Python),
        Box::new(RubyGems),
    ]
}
