//! Build environment selection.
//!
//! The mode and application selectors are read from the process environment
//! once at startup and carried as an immutable value from then on; nothing
//! below this layer touches environment variables.

use figment::Figment;
use figment::providers::Env;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Build mode selected for a single invocation.
///
/// Exactly one mode is active per build. The mode gates minification,
/// source maps, file watching, and output filename hashing together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Development,
    Production,
}

impl BuildMode {
    pub fn is_production(self) -> bool {
        matches!(self, BuildMode::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
        }
    }

    /// Mode selector alone, from `PLANK_MODE`; development when unset.
    pub fn from_env() -> Result<Self> {
        #[derive(Default, Serialize, Deserialize)]
        struct ModeOnly {
            #[serde(default)]
            mode: BuildMode,
        }

        let selector: ModeOnly = Figment::new()
            .merge(Env::prefixed("PLANK_"))
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                field: "mode".to_string(),
                message: e.to_string(),
            })?;
        Ok(selector.mode)
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuildMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(BuildMode::Development),
            "production" | "prod" => Ok(BuildMode::Production),
            other => Err(ConfigError::InvalidValue {
                field: "mode".to_string(),
                message: format!("unknown build mode `{other}`"),
            }),
        }
    }
}

/// Selectors for one build: which mode, which application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEnv {
    #[serde(default)]
    pub mode: BuildMode,

    pub app: String,
}

impl BuildEnv {
    pub fn new(mode: BuildMode, app: impl Into<String>) -> Self {
        Self {
            mode,
            app: app.into(),
        }
    }

    /// Extract both selectors from `PLANK_MODE` / `PLANK_APP`.
    ///
    /// A missing application selector or an unknown mode value is a fatal
    /// configuration error.
    pub fn from_env() -> Result<Self> {
        Figment::new()
            .merge(Env::prefixed("PLANK_"))
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                field: "environment".to_string(),
                message: e.to_string(),
            })
    }
}
