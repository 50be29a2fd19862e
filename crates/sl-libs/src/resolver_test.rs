use super::*;
use std::fs;
use tempfile::TempDir;

fn jars(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"PK").unwrap();
    }
}

fn remaining(dir: &Path) -> Vec<String> {
    list_jars(dir).unwrap()
}

fn copied(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_removes_lower_version() {
    let dir = TempDir::new().unwrap();
    jars(
        dir.path(),
        &["guava-18.0.jar", "guava-19.0.jar", "slf4j-api-1.7.25.jar"],
    );

    let resolver = DependencyResolver::default();
    let removed = resolver
        .resolve_dependencies(dir.path(), &copied(&["guava-19.0.jar"]))
        .unwrap();

    assert_eq!(removed, vec!["guava-18.0.jar"]);
    assert_eq!(
        remaining(dir.path()),
        vec!["guava-19.0.jar", "slf4j-api-1.7.25.jar"]
    );
}

#[test]
fn test_three_versions_keep_highest() {
    let dir = TempDir::new().unwrap();
    jars(
        dir.path(),
        &["app-core-1.0.jar", "app-core-1.1.jar", "app-core-1.1-SNAPSHOT.jar"],
    );

    let removed = DependencyResolver::default()
        .resolve_dependencies(dir.path(), &copied(&["app-core-1.1.jar"]))
        .unwrap();

    assert_eq!(removed, vec!["app-core-1.0.jar", "app-core-1.1-SNAPSHOT.jar"]);
    assert_eq!(remaining(dir.path()), vec!["app-core-1.1.jar"]);
}

#[test]
fn test_different_platforms_are_kept() {
    let dir = TempDir::new().unwrap();
    jars(
        dir.path(),
        &[
            "jogl-all-2.3.2-natives-linux-amd64.jar",
            "jogl-all-2.3.2-natives-windows-amd64.jar",
        ],
    );

    let removed = DependencyResolver::default()
        .resolve_dependencies(dir.path(), &copied(&["jogl-all-2.3.2.jar"]))
        .unwrap();

    assert!(removed.is_empty());
    assert_eq!(remaining(dir.path()).len(), 2);
}

#[test]
fn test_only_copied_libraries_are_checked() {
    let dir = TempDir::new().unwrap();
    jars(dir.path(), &["guava-18.0.jar", "guava-19.0.jar"]);

    let removed = DependencyResolver::default()
        .resolve_dependencies(dir.path(), &copied(&["slf4j-api-1.7.25.jar"]))
        .unwrap();

    assert!(removed.is_empty());
    assert_eq!(remaining(dir.path()).len(), 2);
}

#[test]
fn test_unversioned_library_is_ignored() {
    let dir = TempDir::new().unwrap();
    jars(dir.path(), &["tools.jar", "tools-1.0.jar"]);

    let removed = DependencyResolver::default()
        .resolve_dependencies(dir.path(), &copied(&["tools.jar"]))
        .unwrap();

    assert!(removed.is_empty());
}

#[test]
fn test_malformed_copied_name_fails_before_removal() {
    let dir = TempDir::new().unwrap();
    jars(dir.path(), &["guava-18.0.jar", "guava-19.0.jar"]);

    let err = DependencyResolver::default()
        .resolve_dependencies(dir.path(), &copied(&["guava-19.0.jar", "not a jar"]))
        .unwrap_err();

    assert!(matches!(err, LibsError::InvalidLibraryName { .. }));
    assert_eq!(remaining(dir.path()).len(), 2);
}

#[test]
fn test_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let removed = DependencyResolver::new(Some(dir.path().to_path_buf()))
        .resolve_dependencies(&dir.path().join("lib"), &copied(&["guava-19.0.jar"]))
        .unwrap();
    assert!(removed.is_empty());
}

#[test]
fn test_relative_dir() {
    let resolver = DependencyResolver::new(Some(PathBuf::from("/opt/app")));
    assert_eq!(resolver.relative_dir(Path::new("/opt/app/lib")), "lib");
    assert_eq!(resolver.relative_dir(Path::new("/srv/lib")), "/srv/lib");
}
