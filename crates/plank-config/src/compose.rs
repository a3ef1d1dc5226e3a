//! Base plan assembly and override merging.
//!
//! This is the one piece of branching logic in the crate: mode-derived
//! defaults, the fixed base rule and plugin lists, and the field-by-field
//! merge of an application's override declaration.

use indexmap::IndexMap;
use serde_json::json;
use tracing::debug;

use crate::discovery::Application;
use crate::env::BuildMode;
use crate::overrides::OverrideDeclaration;
use crate::plan::{
    BuildPlan, Compression, FilePattern, OptimizationOptions, OutputOptions, PluginEntry,
    SourceMapKind, TransformRule, TransformStep,
};

/// Name of the entry every application gets by default. An override entry
/// with the same name replaces it entirely.
pub const MAIN_ENTRY: &str = "index";

/// Polyfill bootstrap prepended to the main entry; must execute before any
/// application code.
pub const POLYFILL_BOOTSTRAP: &str = "@babel/polyfill";

const SCRIPT_MINIMIZER: &str = "terser";
const STYLE_MINIMIZER: &str = "css-optimizer";

/// Script filename pattern; hashed in production for cache busting.
fn script_filename(mode: BuildMode) -> String {
    if mode.is_production() {
        "js/[name].[hash:8].js".to_string()
    } else {
        "js/[name].js".to_string()
    }
}

/// Extracted stylesheet filename pattern, hashed under the same rule as
/// scripts.
fn stylesheet_filename(mode: BuildMode) -> String {
    if mode.is_production() {
        "css/[name].[hash:8].css".to_string()
    } else {
        "css/[name].css".to_string()
    }
}

fn source_maps(mode: BuildMode) -> SourceMapKind {
    if mode.is_production() {
        SourceMapKind::None
    } else {
        SourceMapKind::Inline
    }
}

/// The six fixed transform rules every plan starts from, in order:
/// scripts, templates, stylesheets, raster images, fonts, vector graphics.
fn base_rules(mode: BuildMode) -> Vec<TransformRule> {
    let with_source_map = json!({ "source_map": !mode.is_production() });
    let emit_in_place = json!({ "name": "[path][name].[ext]", "public_path": "../" });

    vec![
        TransformRule::new(
            FilePattern::of(["js", "mjs", "jsx"]),
            vec![TransformStep::new(
                "babel-loader",
                json!({ "config_file": "./babel.config.js", "cache_directory": true }),
            )],
        ),
        TransformRule::new(
            FilePattern::of(["pug"]),
            vec![TransformStep::new(
                "pug-loader",
                json!({ "source_map": !mode.is_production(), "pretty": true }),
            )],
        ),
        // Extraction first; the compile chain below it runs right-to-left
        // over the file content.
        TransformRule {
            test: FilePattern::of(["sass", "scss"]),
            steps: vec![
                TransformStep::new("css-extract-loader", json!({ "public_path": "dist/css" })),
                TransformStep::new("css-loader", with_source_map.clone()),
                TransformStep::new("postcss-loader", with_source_map.clone()),
                TransformStep::new("sass-loader", with_source_map),
            ],
            resolve_extensions: vec![".scss".to_string(), ".sass".to_string()],
        },
        TransformRule::new(
            FilePattern::of(["png", "gif", "jpg", "jpeg"]),
            vec![
                TransformStep::new("file-loader", emit_in_place.clone()),
                TransformStep::bare("img-loader"),
            ],
        ),
        TransformRule::new(
            FilePattern::of(["woff", "woff2", "eot", "ttf", "otf"]),
            vec![TransformStep::new("file-loader", emit_in_place)],
        ),
        TransformRule::new(
            FilePattern::of(["svg"]),
            vec![TransformStep::new(
                "svg-url-loader",
                json!({ "encoding": "base64" }),
            )],
        ),
    ]
}

/// The plugins every plan declares, in fixed order.
fn base_plugins(mode: BuildMode, app: &Application) -> Vec<PluginEntry> {
    let compression = if mode.is_production() {
        Compression::Enabled
    } else {
        Compression::Disabled
    };

    vec![
        PluginEntry::new("define", json!({ "NODE_ENV": mode.as_str() })),
        PluginEntry::new(
            "clean",
            json!({ "verbose": true, "clean_stale_assets": false }),
        ),
        PluginEntry::new(
            "html",
            json!({
                "filename": "html/index.html",
                "template": "./pug/index.pug",
                "mobile": true,
            }),
        ),
        PluginEntry::new(
            "css-extract",
            json!({ "filename": stylesheet_filename(mode) }),
        ),
        PluginEntry::new(
            "copy",
            json!({
                "from": app.src_dir().join("img").to_string_lossy(),
                "to": app.dist_dir().join("img").to_string_lossy(),
                "ignore": ["svg/*"],
            }),
        ),
        // Declared in every mode; the compression tag decides whether it
        // transforms anything. max_concurrency is a pass-through hint for
        // the engine.
        PluginEntry::new(
            "imagemin",
            json!({
                "max_concurrency": 1,
                "test": ["jpg", "jpeg", "png", "gif", "svg"],
                "codecs": [
                    { "name": "jpegtran", "progressive": true },
                    { "name": "pngquant", "strip": true },
                ],
            }),
        )
        .with_compression(compression),
    ]
}

/// Compose the final build plan for one application.
///
/// Pure with respect to its inputs: the same mode, application, and
/// declaration always produce a structurally equal plan.
///
/// Merge semantics: override rules and plugins extend the base lists;
/// `resolve` is taken verbatim when present; entries merge by key, a
/// colliding name replacing the base entry entirely. In production the
/// forced-minification and style-optimization plugins are appended after
/// everything, including override-contributed plugins.
pub fn compose(mode: BuildMode, app: &Application, overrides: &OverrideDeclaration) -> BuildPlan {
    let mut entries = IndexMap::new();
    entries.insert(
        MAIN_ENTRY.to_string(),
        vec![
            POLYFILL_BOOTSTRAP.to_string(),
            "./js/index.js".to_string(),
            "./sass/style.sass".to_string(),
        ],
    );

    let mut rules = base_rules(mode);
    let mut plugins = base_plugins(mode, app);

    rules.extend(overrides.rules.iter().cloned());
    plugins.extend(overrides.plugins.iter().cloned());
    for (name, sources) in &overrides.entries {
        entries.insert(name.clone(), sources.clone());
    }

    if mode.is_production() {
        plugins.push(PluginEntry::new("loader-options", json!({ "minimize": true })));
        plugins.push(PluginEntry::new(STYLE_MINIMIZER, json!({})));
    }

    debug!(
        app = app.name(),
        mode = %mode,
        rules = rules.len(),
        plugins = plugins.len(),
        entries = entries.len(),
        "composed build plan"
    );

    BuildPlan {
        mode,
        context: app.src_dir(),
        watch: !mode.is_production(),
        source_maps: source_maps(mode),
        entries,
        resolve: overrides.resolve.clone(),
        output: OutputOptions {
            filename: script_filename(mode),
            dir: app.dist_dir(),
            public_path: "../".to_string(),
        },
        optimization: OptimizationOptions {
            minimize: mode.is_production(),
            minimizers: vec![SCRIPT_MINIMIZER.to_string(), STYLE_MINIMIZER.to_string()],
            used_exports: true,
        },
        rules,
        plugins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_hashed_only_in_production() {
        assert!(script_filename(BuildMode::Production).contains("[hash:8]"));
        assert!(!script_filename(BuildMode::Development).contains("[hash:8]"));
        assert!(stylesheet_filename(BuildMode::Production).contains("[hash:8]"));
        assert!(!stylesheet_filename(BuildMode::Development).contains("[hash:8]"));
    }

    #[test]
    fn source_maps_disabled_in_production() {
        assert_eq!(source_maps(BuildMode::Production), SourceMapKind::None);
        assert_eq!(source_maps(BuildMode::Development), SourceMapKind::Inline);
    }

    #[test]
    fn base_rules_cover_the_six_categories_in_order() {
        let rules = base_rules(BuildMode::Development);
        assert_eq!(rules.len(), 6);
        assert!(rules[0].test.matches("js/index.js"));
        assert!(rules[1].test.matches("pug/index.pug"));
        assert!(rules[2].test.matches("sass/style.sass"));
        assert!(rules[3].test.matches("img/logo.png"));
        assert!(rules[4].test.matches("fonts/body.woff2"));
        assert!(rules[5].test.matches("img/svg/icon.svg"));
    }
}
