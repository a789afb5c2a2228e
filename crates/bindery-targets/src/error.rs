//! Error types for target declaration files and the declaration registry.

use std::path::PathBuf;

use bindery_core::ResolveError;

/// Errors that can occur while loading, registering, or resolving targets.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing declaration files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Declaration file not found.
    #[error("target file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// No declaration registered under this name.
    #[error("no target declared as '{name}'")]
    UnknownTarget {
        /// The requested target name.
        name: String,
    },

    /// Validation error in a declaration or registry entry.
    #[error("validation error: {detail}")]
    Validation {
        /// Description of the validation failure.
        detail: String,
    },

    /// Descriptor, declaration, or resolution error from the core.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
