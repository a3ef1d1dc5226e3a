use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a declared compression stage actually transforms anything.
///
/// The stage is always present in the plugin list so the merge step sees a
/// stable structure in every mode; the tag tells the consuming engine
/// whether to run it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    Enabled,
    Disabled,
}

/// One plugin the engine should install, with its opaque options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEntry {
    pub name: String,

    /// Plugin-specific configuration, forwarded untouched.
    #[serde(default)]
    pub options: Value,

    /// Only set on compression stages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<Compression>,
}

impl PluginEntry {
    pub fn new(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options,
            compression: None,
        }
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }
}
