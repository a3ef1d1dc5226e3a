//! Tests for application resolution and declaration loading.

use std::fs;
use std::path::Path;

use plank_config::{AppDiscovery, BuildMode, ConfigError, MAIN_ENTRY};
use tempfile::TempDir;

fn write_app(root: &Path, name: &str, declaration: &str) {
    let dir = root.join("applications").join(name);
    fs::create_dir_all(&dir).expect("create app dir");
    fs::write(dir.join("plank.toml"), declaration).expect("write declaration");
}

#[test]
fn unknown_application_fails_composition() {
    let dir = TempDir::new().expect("tempdir");
    let discovery = AppDiscovery::new(dir.path());

    let err = discovery.plan(BuildMode::Development, "ghost").unwrap_err();
    assert!(matches!(err, ConfigError::ApplicationNotFound { .. }));
}

#[test]
fn missing_declaration_fails_composition() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("applications").join("shop")).unwrap();

    let discovery = AppDiscovery::new(dir.path());
    let err = discovery.plan(BuildMode::Development, "shop").unwrap_err();
    assert!(matches!(err, ConfigError::DeclarationNotFound { .. }));
}

#[test]
fn malformed_declaration_fails_composition() {
    let dir = TempDir::new().expect("tempdir");
    write_app(dir.path(), "shop", "entries = [broken");

    let discovery = AppDiscovery::new(dir.path());
    let err = discovery.plan(BuildMode::Development, "shop").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn mistyped_declaration_field_fails_composition() {
    let dir = TempDir::new().expect("tempdir");
    write_app(dir.path(), "shop", "rules = \"not-a-list\"");

    let discovery = AppDiscovery::new(dir.path());
    let err = discovery.plan(BuildMode::Development, "shop").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn empty_declaration_composes_the_base_plan() {
    let dir = TempDir::new().expect("tempdir");
    write_app(dir.path(), "shop", "");

    let discovery = AppDiscovery::new(dir.path());
    let plan = discovery.plan(BuildMode::Development, "shop").unwrap();

    assert_eq!(plan.rules.len(), 6);
    assert_eq!(plan.entries.len(), 1);
    assert_eq!(
        plan.context,
        dir.path().join("applications").join("shop").join("src")
    );
}

#[test]
fn declaration_overrides_flow_into_the_plan() {
    let dir = TempDir::new().expect("tempdir");
    write_app(
        dir.path(),
        "shop",
        r#"
[resolve]
extensions = [".js", ".vue"]

[[rules]]
[rules.test]
extensions = ["vue"]

[[rules.steps]]
transformer = "vue-loader"

[[plugins]]
name = "vue"

[entries]
admin = ["./js/admin.js"]
"#,
    );

    let discovery = AppDiscovery::new(dir.path());
    let plan = discovery.plan(BuildMode::Production, "shop").unwrap();

    assert_eq!(plan.rules.len(), 7);
    assert_eq!(plan.rules[6].steps[0].transformer, "vue-loader");
    assert!(plan.resolve.is_some());
    assert!(plan.entries.contains_key(MAIN_ENTRY));
    assert!(plan.entries.contains_key("admin"));
    assert!(plan.plugins.iter().any(|p| p.name == "vue"));
}

#[test]
fn repeated_composition_yields_equal_plans() {
    let dir = TempDir::new().expect("tempdir");
    write_app(
        dir.path(),
        "shop",
        r#"
[entries]
admin = ["./js/admin.js"]
"#,
    );

    let discovery = AppDiscovery::new(dir.path());
    let first = discovery.plan(BuildMode::Production, "shop").unwrap();
    let second = discovery.plan(BuildMode::Production, "shop").unwrap();
    assert_eq!(first, second);
}
