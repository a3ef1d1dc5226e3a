//! Error types for override loading and plan composition.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Application resolution errors
    #[error("application `{name}` not found (expected directory {})", .dir.display())]
    ApplicationNotFound { name: String, dir: PathBuf },

    #[error("override declaration not found: {}", .path.display())]
    DeclarationNotFound { path: PathBuf },

    // Declaration parsing errors
    #[error("invalid value for `{field}`: {message}")]
    InvalidValue { field: String, message: String },

    // Schema validation errors (no filesystem checks)
    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // Filesystem validation errors
    #[error("plan context is not a directory: {}", .path.display())]
    ContextNotFound { path: PathBuf },

    #[error("entry source not found: {}", .path.display())]
    EntryNotFound { path: PathBuf },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
