//! Per-application override declarations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::plan::{PluginEntry, TransformRule};

/// Module-resolution rules, forwarded verbatim to the bundling engine.
///
/// The base plan declares none, so a declaration that carries them is used
/// as-is rather than merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolveOptions {
    #[serde(default)]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub alias: IndexMap<String, PathBuf>,
}

/// Partial configuration declared by one application, merged into the base
/// plan at composition time.
///
/// Loaded once per build and read-only afterwards. All four fields are
/// optional; an empty declaration composes to the bare base plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideDeclaration {
    #[serde(default)]
    pub resolve: Option<ResolveOptions>,

    /// Additional transform rules, appended after the base rules.
    #[serde(default)]
    pub rules: Vec<TransformRule>,

    /// Additional plugins, appended after the base plugin list.
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,

    /// Additional or replacement entry points, merged by key.
    #[serde(default)]
    pub entries: IndexMap<String, Vec<String>>,
}

impl OverrideDeclaration {
    /// Parse a declaration from TOML source.
    pub fn from_toml(content: &str) -> Result<Self> {
        let toml_val: toml::Value =
            toml::from_str(content).map_err(|e| ConfigError::InvalidValue {
                field: "declaration".to_string(),
                message: format!("invalid TOML syntax: {e}"),
            })?;

        let value = serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
            field: "declaration".to_string(),
            message: format!("TOML to JSON conversion failed: {e}"),
        })?;

        Self::from_value(value)
    }

    /// Create from a `serde_json::Value` (for programmatic declarations).
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "declaration".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_declaration_has_no_overrides() {
        let decl = OverrideDeclaration::from_toml("").unwrap();
        assert!(decl.resolve.is_none());
        assert!(decl.rules.is_empty());
        assert!(decl.plugins.is_empty());
        assert!(decl.entries.is_empty());
    }

    #[test]
    fn declaration_parses_all_fields() {
        let decl = OverrideDeclaration::from_toml(
            r#"
[resolve]
extensions = [".js", ".vue"]

[resolve.alias]
"@" = "src"

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
        )
        .unwrap();

        let resolve = decl.resolve.expect("resolve present");
        assert_eq!(resolve.extensions, vec![".js", ".vue"]);
        assert_eq!(resolve.alias.get("@"), Some(&PathBuf::from("src")));
        assert_eq!(decl.rules.len(), 1);
        assert_eq!(decl.rules[0].steps[0].transformer, "vue-loader");
        assert_eq!(decl.plugins[0].name, "vue");
        assert_eq!(decl.entries.get("admin").unwrap(), &vec!["./js/admin.js"]);
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = OverrideDeclaration::from_toml("entries = [broken").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let err = OverrideDeclaration::from_value(json!({ "rules": "not-a-list" })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
