//! Target declaration files and the project declaration registry.
//!
//! Projects declare their targets as `<Target>.target.toml` files under
//! `targets/`. This crate loads, validates, and writes those files, and
//! keeps a [`DeclarationRegistry`] from which descriptors are resolved.

pub mod error;
pub mod parse;
pub mod registry;

pub use error::{Result, TargetError};
pub use parse::{
    declaration_to_toml, discover_targets, generate_template, load_declaration_toml,
    parse_declaration_toml, target_path, validate_declaration, Severity, ValidationIssue,
};
pub use registry::DeclarationRegistry;
