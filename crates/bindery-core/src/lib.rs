//! Target descriptors, target declarations, and binary resolution.
//!
//! A build engine describes *what* it is building with a
//! [`TargetDescriptor`], looks up the project's [`TargetDeclaration`], and
//! calls [`resolve`] to learn which binaries to produce and which modules
//! each one links, in link order.
//!
//! Everything here is pure: no I/O, no shared state, and every value is
//! `Send + Sync`.

pub mod binary;
pub mod declaration;
pub mod descriptor;
pub mod error;
pub mod ident;
pub mod resolver;

// Re-exports for convenience.
pub use binary::{BinaryConfiguration, BinaryRole, OutputType};
pub use declaration::{TargetDeclaration, TargetKind};
pub use descriptor::{Configuration, OsFamily, Platform, TargetDescriptor};
pub use error::{ResolveError, Result};
pub use ident::is_identifier;
pub use resolver::{resolve, resolve_target, resolve_with, BinaryPolicy, Resolution};
