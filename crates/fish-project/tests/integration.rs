//! Integration tests for project loading.

use fish_project::{LoadError, ManifestError, Project};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_project(manifest: &str, files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("fish.toml"), manifest).unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

#[test]
fn load_simple_project() {
    let dir = write_project(
        r#"
        [program]
        name = "hello"
        entry = "hello.fish"
        "#,
        &[("hello.fish", "\"hello\"rooooo;\n")],
    );

    let project = Project::load(dir.path()).expect("failed to load project");
    assert_eq!(project.manifest().program.name, "hello");
    assert_eq!(project.source().source, "\"hello\"rooooo;");
    assert_eq!(project.source().path, dir.path().join("hello.fish"));
    assert!(project.source().initial_stack.is_empty());
    assert_eq!(project.source().max_steps, None);
}

#[test]
fn load_project_with_settings() {
    let dir = write_project(
        r#"
        [program]
        name = "echo"
        entry = "src/echo.fish"
        initial_stack = [1, 2, 3]
        input = "hi"

        [limits]
        max_steps = 200
        seed = 42
        "#,
        &[("src/echo.fish", "i:0(?;o\n")],
    );

    let project = Project::load(dir.path()).expect("failed to load project");
    let source = project.source();
    assert_eq!(source.source, "i:0(?;o");
    assert_eq!(source.initial_stack, vec![1.0, 2.0, 3.0]);
    assert_eq!(source.input, "hi");
    assert_eq!(source.max_steps, Some(200));
    assert_eq!(source.seed, Some(42));
}

#[test]
fn multi_line_source_keeps_inner_newlines() {
    let dir = write_project(
        r#"
        [program]
        name = "grid"
        entry = "grid.fish"
        "#,
        &[("grid.fish", "v\n>;\n")],
    );

    let project = Project::load(dir.path()).unwrap();
    assert_eq!(project.source().source, "v\n>;");
}

#[test]
fn missing_manifest_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = Project::load(dir.path().join("nonexistent"));

    assert!(matches!(
        result,
        Err(LoadError::Manifest(ManifestError::Io { .. }))
    ));
}

#[test]
fn missing_entry_point_fails() {
    let dir = write_project(
        r#"
        [program]
        name = "test"
        entry = "nonexistent.fish"
        "#,
        &[],
    );

    let result = Project::load(dir.path());
    match result {
        Err(LoadError::MissingEntry { entry, project_dir }) => {
            assert_eq!(entry, "nonexistent.fish");
            assert_eq!(project_dir, Path::new(dir.path()));
        }
        other => panic!("expected MissingEntry, got {other:?}"),
    }
}

#[test]
fn invalid_manifest_fails() {
    let dir = write_project("[program\nname = ", &[]);
    let result = Project::load(dir.path());
    assert!(matches!(
        result,
        Err(LoadError::Manifest(ManifestError::Parse { .. }))
    ));
}
