pub mod compose;
pub mod discovery;
pub mod env;
pub mod error;
pub mod overrides;
pub mod plan;
pub mod validation;

// Re-export main types
pub use compose::{MAIN_ENTRY, POLYFILL_BOOTSTRAP, compose};
pub use discovery::{AppDiscovery, Application};
pub use env::{BuildEnv, BuildMode};
pub use error::{ConfigError, Result};
pub use overrides::{OverrideDeclaration, ResolveOptions};
pub use plan::*;

// Re-export validation
pub use validation::{FsValidator, PlanValidator, SchemaValidator, validate_fs, validate_schema};
