use std::fs;
use std::path::Path;

use devcache::env::StaticProcesses;
use devcache::{Availability, CleanerRegistry, Environment, RunOptions, Status};
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn sandbox_with(running: &[&str]) -> (TempDir, CleanerRegistry) {
    let tmp = tempfile::tempdir().unwrap();
    let home = tmp.path().join("home");
    fs::create_dir_all(&home).unwrap();
    let env = Environment::for_home(&home)
        .with_applications_dir(tmp.path().join("Applications"))
        .with_brew_roots(vec![
            tmp.path().join("opt/homebrew"),
            tmp.path().join("usr/local/Homebrew"),
        ])
        .with_processes(StaticProcesses(
            running.iter().map(|s| s.to_string()).collect(),
        ));
    (tmp, CleanerRegistry::new(env))
}

fn sandbox() -> (TempDir, CleanerRegistry) {
    sandbox_with(&[])
}

fn status_of(registry: &CleanerRegistry, id: &str) -> Status {
    let report = registry.run([id]).unwrap();
    report.outcome(id).unwrap().status.clone()
}

#[test]
fn targets_without_dependencies_are_always_available() {
    let (_tmp, registry) = sandbox();
    for status in registry.list_targets() {
        match status.target.id {
            "docker" | "homebrew" => assert!(!status.availability.is_available()),
            _ => assert_eq!(status.availability, Availability::Available, "{}", status.target.id),
        }
    }
}

#[test]
fn xcode_removes_derived_data_and_archives() {
    let (_tmp, registry) = sandbox();
    let xcode = registry.env().home.join("Library/Developer/Xcode");
    write(&xcode.join("DerivedData/MyApp-abcdef/a.txt"), "build");
    write(&xcode.join("Archives/2024-05-01/b.txt"), "archive");
    write(&xcode.join("UserData/keep.txt"), "prefs");

    let report = registry.run(["xcode"]).unwrap();

    assert_eq!(report.outcome("xcode").unwrap().status, Status::Success);
    assert!(!xcode.join("DerivedData/MyApp-abcdef").exists());
    assert!(!xcode.join("Archives/2024-05-01").exists());
    assert!(xcode.join("DerivedData").is_dir());
    assert!(xcode.join("Archives").is_dir());
    assert!(xcode.join("UserData/keep.txt").exists());
}

#[test]
fn gem_cleaner_only_removes_cache_named_entries() {
    let (_tmp, registry) = sandbox();
    let ruby = registry.env().home.join(".gem/ruby");
    write(&ruby.join("foo-cache/x"), "x");
    write(&ruby.join("bar/y"), "y");

    assert_eq!(status_of(&registry, "ruby-gems"), Status::Success);
    assert!(!ruby.join("foo-cache").exists());
    assert!(ruby.join("bar/y").exists());
}

fn populate_docker(home: &Path) {
    let data = home.join("Library/Containers/com.docker.docker/Data/vms");
    write(&data.join("hyperkit/disk.raw"), "vm");
    write(&data.join("0/data/Docker.raw"), "image");
    let group = home.join("Library/Group Containers/group.com.docker");
    write(&group.join("cache-blobs/1"), "blob");
    write(&group.join("settings.json"), "{}");
    write(&home.join(".docker/buildx-cache/layer"), "layer");
    write(&home.join(".docker/config.json"), "{}");
}

#[test]
fn docker_not_installed_is_skipped_and_untouched() {
    let (_tmp, registry) = sandbox_with(&["Docker Desktop"]);
    let home = registry.env().home.clone();
    populate_docker(&home);

    match status_of(&registry, "docker") {
        Status::Skipped(reason) => assert!(reason.contains("not installed"), "{reason}"),
        other => panic!("expected skip, got {other:?}"),
    }
    assert!(home.join("Library/Containers/com.docker.docker/Data/vms/0/data/Docker.raw").exists());
    assert!(home.join("Library/Group Containers/group.com.docker/cache-blobs/1").exists());
    assert!(home.join(".docker/buildx-cache/layer").exists());
}

#[test]
fn docker_installed_but_not_running_is_skipped() {
    let (tmp, registry) = sandbox();
    fs::create_dir_all(tmp.path().join("Applications/Docker.app")).unwrap();
    populate_docker(&registry.env().home);

    match status_of(&registry, "docker") {
        Status::Skipped(reason) => assert!(reason.contains("not running"), "{reason}"),
        other => panic!("expected skip, got {other:?}"),
    }
    assert!(registry.env().home.join(".docker/buildx-cache").exists());
}

#[test]
fn docker_keeps_hyperkit_and_non_cache_entries() {
    let (tmp, registry) = sandbox_with(&["Docker Desktop"]);
    fs::create_dir_all(tmp.path().join("Applications/Docker.app")).unwrap();
    let home = registry.env().home.clone();
    populate_docker(&home);

    assert_eq!(status_of(&registry, "docker"), Status::Success);

    let vms = home.join("Library/Containers/com.docker.docker/Data/vms");
    assert!(vms.join("hyperkit/disk.raw").exists());
    assert!(!vms.join("0").exists());
    let group = home.join("Library/Group Containers/group.com.docker");
    assert!(!group.join("cache-blobs").exists());
    assert!(group.join("settings.json").exists());
    assert!(!home.join(".docker/buildx-cache").exists());
    assert!(home.join(".docker/config.json").exists());
}

#[test]
fn homebrew_uses_first_existing_root() {
    let (tmp, registry) = sandbox();
    assert!(matches!(status_of(&registry, "homebrew"), Status::Skipped(_)));

    let intel = tmp.path().join("usr/local/Homebrew");
    write(&intel.join("Library/Homebrew/Cache/wget.tar.gz"), "bottle");
    write(&intel.join("Library/Caches/Homebrew/downloads/x"), "dl");
    write(&intel.join("Library/Taps/core/formula.rb"), "keep");

    assert_eq!(status_of(&registry, "homebrew"), Status::Success);
    assert!(!intel.join("Library/Homebrew/Cache/wget.tar.gz").exists());
    assert!(!intel.join("Library/Caches/Homebrew/downloads").exists());
    assert!(intel.join("Library/Homebrew/Cache").is_dir());
    assert!(intel.join("Library/Taps/core/formula.rb").exists());
}

#[test]
fn library_caches_empties_the_user_cache_dir() {
    let (_tmp, registry) = sandbox();
    let cache = registry.env().user_cache_dir.clone();
    write(&cache.join("com.example.app/blob"), "blob");
    write(&cache.join("loose-file"), "x");

    assert_eq!(status_of(&registry, "library-caches"), Status::Success);
    assert!(cache.is_dir());
    assert_eq!(fs::read_dir(&cache).unwrap().count(), 0);
}

#[test]
fn fixed_cleaners_empty_their_directories() {
    let (_tmp, registry) = sandbox();
    let home = registry.env().home.clone();
    let dirs = [
        ("npm", ".npm/_cacache"),
        ("cocoapods", "Library/Caches/CocoaPods"),
        ("gradle", ".gradle/caches"),
        ("vscode", "Library/Application Support/Code/CachedData"),
        ("vscode", ".vscode/extensions"),
    ];
    for (_, dir) in dirs {
        write(&home.join(dir).join("entry/file"), "data");
    }
    write(&home.join(".npm/_logs/debug.log"), "log");

    let report = registry.run(["npm", "cocoapods", "gradle", "vscode"]).unwrap();
    assert!(report.is_success());

    for (id, dir) in dirs {
        assert!(home.join(dir).is_dir(), "{id}: parent kept");
        assert!(!home.join(dir).join("entry").exists(), "{id}: child removed");
    }
    assert!(home.join(".npm/_logs/debug.log").exists());
}

#[test]
fn android_studio_scan_removes_matching_paths() {
    let (_tmp, registry) = sandbox();
    let home = registry.env().home.clone();
    let support = home.join("Library/Application Support/Google/AndroidStudio2024.1");
    write(&support.join("caches/index/shard"), "idx");
    write(&support.join("options/ui.xml"), "keep");

    assert_eq!(status_of(&registry, "android-studio"), Status::Success);
    assert!(!support.join("caches").exists());
    assert!(support.join("options/ui.xml").exists());
}

#[test]
fn python_clears_pip_and_bytecode() {
    let (_tmp, registry) = sandbox();
    let home = registry.env().home.clone();
    write(&home.join(".cache/pip/http/abc"), "wheel");
    write(&home.join("projects/tool/__pycache__/mod.cpython-312.pyc"), "bytecode");
    write(&home.join("projects/tool/mod.py"), "source");

    assert_eq!(status_of(&registry, "python"), Status::Success);
    assert!(home.join(".cache/pip").is_dir());
    assert!(!home.join(".cache/pip/http").exists());
    assert!(!home.join("projects/tool/__pycache__/mod.cpython-312.pyc").exists());
    assert!(home.join("projects/tool/mod.py").exists());
}

#[test]
fn failure_is_attributed_and_batch_continues() {
    let (_tmp, registry) = sandbox();
    let home = registry.env().home.clone();
    // A file where a directory is expected cannot be enumerated.
    write(&home.join(".npm/_cacache"), "not a directory");
    write(&home.join(".gradle/caches/modules-2/x"), "jar");

    let report = registry.run(["npm", "gradle"]).unwrap();

    assert!(!report.is_success());
    assert!(matches!(report.outcome("npm").unwrap().status, Status::Failed(_)));
    assert_eq!(report.outcome("gradle").unwrap().status, Status::Success);
    assert!(report.error_message().unwrap().starts_with("NPM: cannot read"));
    assert!(!home.join(".gradle/caches/modules-2").exists());
}

#[test]
fn cleaning_twice_is_idempotent() {
    let (_tmp, registry) = sandbox();
    let home = registry.env().home.clone();
    write(&home.join(".gradle/caches/a"), "a");
    write(&home.join(".gem/ruby/x-cache/y"), "y");
    write(&home.join("Library/Developer/Xcode/DerivedData/p/q"), "q");
    let ids: Vec<&str> = registry.targets().map(|t| t.id).collect();

    let first = registry.run(&ids).unwrap();
    assert!(first.is_success(), "{:?}", first.error_message());
    assert!(first.total_freed() > 0);

    let second = registry.run(&ids).unwrap();
    assert!(second.is_success(), "{:?}", second.error_message());
    assert_eq!(second.total_freed(), 0);
    for outcome in &second.outcomes {
        assert!(outcome.entries.is_empty(), "{}", outcome.id);
    }
}

#[test]
fn dry_run_reports_without_deleting() {
    let (_tmp, registry) = sandbox();
    let home = registry.env().home.clone();
    write(&home.join(".gradle/caches/a"), "0123456789");

    let options = RunOptions {
        dry_run: true,
        ..RunOptions::default()
    };
    let report = registry.run_with(["gradle"], &options).unwrap();

    let outcome = report.outcome("gradle").unwrap();
    assert_eq!(outcome.status, Status::Success);
    assert_eq!(outcome.freed_bytes, 10);
    assert_eq!(outcome.entries.len(), 1);
    assert!(home.join(".gradle/caches/a").exists());
}

#[test]
fn parallel_run_matches_sequential_outcomes() {
    let (_tmp, registry) = sandbox();
    let home = registry.env().home.clone();
    write(&home.join(".gradle/caches/a"), "a");
    write(&home.join(".npm/_cacache/b"), "b");

    let options = RunOptions {
        parallel: true,
        ..RunOptions::default()
    };
    let ids: Vec<&str> = registry.targets().map(|t| t.id).collect();
    let report = registry.run_with(&ids, &options).unwrap();

    let order: Vec<&str> = report.outcomes.iter().map(|o| o.id).collect();
    assert_eq!(order, ids);
    assert!(report.is_success());
    assert!(!home.join(".gradle/caches/a").exists());
    assert!(!home.join(".npm/_cacache/b").exists());
}

#[cfg(unix)]
#[test]
fn dangling_cache_symlink_is_treated_as_absent() {
    let (tmp, registry) = sandbox();
    let npm = registry.env().home.join(".npm");
    fs::create_dir_all(&npm).unwrap();
    std::os::unix::fs::symlink(tmp.path().join("moved-away"), npm.join("_cacache")).unwrap();

    let report = registry.run(["npm"]).unwrap();

    let outcome = report.outcome("npm").unwrap();
    assert_eq!(outcome.status, Status::Success);
    assert_eq!(outcome.freed_bytes, 0);
    assert!(npm.join("_cacache").symlink_metadata().is_ok());
}
