//! Error types for target resolution.

/// Errors that can occur while describing, declaring, or resolving a target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Malformed platform, configuration, or project name.
    #[error("invalid target descriptor: {detail}")]
    InvalidDescriptor {
        /// Description of the problem.
        detail: String,
    },

    /// Unrecognized target kind.
    #[error("unrecognized target kind '{kind}'")]
    InvalidKind {
        /// The rejected kind string.
        kind: String,
    },

    /// Malformed module identifier.
    #[error("invalid module name '{name}'")]
    InvalidModuleName {
        /// The rejected module name.
        name: String,
    },

    /// A descriptor or declaration was assembled without going through
    /// its validating constructor and breaks an invariant.
    #[error("unresolved input: {detail}")]
    UnresolvedInput {
        /// Which invariant is violated.
        detail: String,
    },

    /// The kind-to-binaries table produced nothing for a kind.
    #[error("resolution of a {kind} target produced no binaries")]
    EmptyResolution {
        /// The kind that resolved to zero binaries.
        kind: String,
    },
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
