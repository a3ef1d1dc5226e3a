//! Build plan types handed to the external bundling engine.

mod helpers;
mod plugin;
mod rule;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

pub use plugin::{Compression, PluginEntry};
pub use rule::{FilePattern, TransformRule, TransformStep};

use crate::env::BuildMode;
use crate::error::{ConfigError, Result};
use crate::overrides::ResolveOptions;

/// Source map flavor for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapKind {
    /// No source maps (production)
    None,
    /// Inline source maps (development default)
    #[default]
    Inline,
}

/// Where emitted files land and how they are named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Filename pattern for emitted scripts; carries a content-hash
    /// segment in production for cache busting.
    pub filename: String,

    /// Output directory for the application.
    pub dir: PathBuf,

    /// Prefix emitted asset URLs are resolved against.
    #[serde(default = "helpers::default_public_path")]
    pub public_path: String,
}

/// Minimizer wiring passed through to the engine.
///
/// Minimizers are always declared; `minimize` decides whether they run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOptions {
    pub minimize: bool,

    pub minimizers: Vec<String>,

    #[serde(default = "helpers::default_true")]
    pub used_exports: bool,
}

/// Fully-resolved build plan: the artifact handed to the bundling engine.
///
/// Produced fresh per invocation, never cached. Structural equality is the
/// contract for idempotent composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub mode: BuildMode,

    /// Base path the entry sources and rule templates resolve against.
    pub context: PathBuf,

    pub watch: bool,

    pub source_maps: SourceMapKind,

    /// Entry map: name to ordered source list. Insertion order is kept so
    /// serialized plans are reproducible.
    pub entries: IndexMap<String, Vec<String>>,

    /// Module-resolution rules, present only when an application declared
    /// them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve: Option<ResolveOptions>,

    pub output: OutputOptions,

    pub optimization: OptimizationOptions,

    /// Ordered transform rules: the fixed base rules first, then any the
    /// application appended.
    pub rules: Vec<TransformRule>,

    pub plugins: Vec<PluginEntry>,
}

impl BuildPlan {
    /// Serialize for hand-off to the engine.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "plan".to_string(),
            message: e.to_string(),
        })
    }
}
