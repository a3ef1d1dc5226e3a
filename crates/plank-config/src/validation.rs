//! Pluggable validation strategies over composed build plans.
//!
//! Separates structural validation (for library use) from filesystem
//! validation (for CLI use against a real application tree).

use crate::error::{ConfigError, Result};
use crate::plan::BuildPlan;

/// Validation strategy applied to a composed plan.
pub trait PlanValidator {
    fn validate(&self, plan: &BuildPlan) -> Result<()>;
}

/// Structural checks only; no filesystem access.
///
/// # Example
///
/// ```no_run
/// use plank_config::{AppDiscovery, BuildMode, PlanValidator, SchemaValidator};
///
/// let plan = AppDiscovery::new(".").plan(BuildMode::Development, "shop").unwrap();
/// SchemaValidator.validate(&plan).unwrap();
/// ```
pub struct SchemaValidator;

impl PlanValidator for SchemaValidator {
    fn validate(&self, plan: &BuildPlan) -> Result<()> {
        if plan.entries.is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "plan declares no entry points".to_string(),
                hint: None,
            });
        }

        for (name, sources) in &plan.entries {
            if sources.is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("entry `{name}` has no sources"),
                    hint: Some("declare at least one source per entry".to_string()),
                });
            }
        }

        for rule in &plan.rules {
            if rule.test.extensions.is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "transform rule matches no extensions".to_string(),
                    hint: Some("list at least one extension in the rule's test".to_string()),
                });
            }
            if rule.steps.is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "transform rule has an empty step chain".to_string(),
                    hint: Some("each rule needs at least one transform step".to_string()),
                });
            }
        }

        for plugin in &plan.plugins {
            if plugin.name.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "plugin name cannot be empty".to_string(),
                    hint: None,
                });
            }
        }

        Ok(())
    }
}

/// Structural checks plus filesystem checks against the plan's context.
///
/// Bare specifiers in entry lists (the polyfill bootstrap, package imports)
/// are the engine resolver's responsibility and are not checked here; only
/// `./`-relative sources must exist under the context.
pub struct FsValidator;

impl PlanValidator for FsValidator {
    fn validate(&self, plan: &BuildPlan) -> Result<()> {
        SchemaValidator.validate(plan)?;

        if !plan.context.is_dir() {
            return Err(ConfigError::ContextNotFound {
                path: plan.context.clone(),
            });
        }

        for sources in plan.entries.values() {
            for source in sources {
                if let Some(relative) = source.strip_prefix("./") {
                    let path = plan.context.join(relative);
                    if !path.is_file() {
                        return Err(ConfigError::EntryNotFound { path });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Convenience function for structural validation.
pub fn validate_schema(plan: &BuildPlan) -> Result<()> {
    SchemaValidator.validate(plan)
}

/// Convenience function for filesystem validation.
pub fn validate_fs(plan: &BuildPlan) -> Result<()> {
    FsValidator.validate(plan)
}
