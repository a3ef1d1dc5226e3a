use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Extension-based file matcher for a transform rule.
///
/// Base rules are disjoint by extension, so their relative order never
/// changes which rule matches a given file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilePattern {
    pub extensions: Vec<String>,
}

impl FilePattern {
    pub fn of<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Case-insensitive match on the path's extension.
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        let Some(ext) = path.as_ref().extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// One step of a rule's transform chain: a named transformer plus the
/// opaque options forwarded to it during execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformStep {
    pub transformer: String,

    #[serde(default)]
    pub options: Value,
}

impl TransformStep {
    pub fn new(transformer: impl Into<String>, options: Value) -> Self {
        Self {
            transformer: transformer.into(),
            options,
        }
    }

    /// A step with no options.
    pub fn bare(transformer: impl Into<String>) -> Self {
        Self::new(transformer, Value::Null)
    }
}

/// A file-pattern matcher plus the ordered transform chain applied to
/// matching files. Step order is significant: steps are chained
/// content transformers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRule {
    pub test: FilePattern,

    pub steps: Vec<TransformStep>,

    /// Extra extensions the engine's resolver should try for imports
    /// matched by this rule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resolve_extensions: Vec<String>,
}

impl TransformRule {
    pub fn new(test: FilePattern, steps: Vec<TransformStep>) -> Self {
        Self {
            test,
            steps,
            resolve_extensions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_matches_listed_extensions() {
        let pattern = FilePattern::of(["png", "gif", "jpg"]);
        assert!(pattern.matches("img/logo.png"));
        assert!(pattern.matches("deep/nested/photo.JPG"));
        assert!(!pattern.matches("style.sass"));
    }

    #[test]
    fn pattern_ignores_paths_without_extension() {
        let pattern = FilePattern::of(["js"]);
        assert!(!pattern.matches("Makefile"));
        assert!(!pattern.matches(""));
    }

    #[test]
    fn bare_step_has_null_options() {
        let step = TransformStep::bare("img-loader");
        assert_eq!(step.transformer, "img-loader");
        assert!(step.options.is_null());
    }
}
