//! TOML parsing, serialization, validation, and discovery for target declarations.
//!
//! Each project target is declared in a `<Target>.target.toml` file in the
//! `targets/` directory of a project:
//!
//! ```toml
//! kind = "game"
//! extra-modules = ["Versatile"]
//! version = "1.0.0"
//! ```
//!
//! The target name comes from the file name, not the file contents.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use bindery_core::{is_identifier, TargetDeclaration};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};

/// File-name suffix of declaration files.
pub const TARGET_FILE_SUFFIX: &str = ".target.toml";

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A validation issue found in a declaration.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

/// On-disk shape of a declaration. The kind stays a string here so that
/// aliases like `game` go through [`TargetDeclaration::create`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct DeclarationFile {
    kind: String,
    #[serde(default)]
    extra_modules: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<semver::Version>,
}

/// Load a declaration from a `.target.toml` file.
pub fn load_declaration_toml(path: &Path) -> Result<TargetDeclaration> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_declaration_toml(&content)
}

/// Parse a declaration from a TOML string.
pub fn parse_declaration_toml(toml_str: &str) -> Result<TargetDeclaration> {
    let file: DeclarationFile = toml::from_str(toml_str)?;
    let mut declaration = TargetDeclaration::create(&file.kind, file.extra_modules)?;
    if let Some(version) = file.version {
        declaration = declaration.with_version(version);
    }
    Ok(declaration)
}

/// Serialize a declaration to pretty TOML.
pub fn declaration_to_toml(declaration: &TargetDeclaration) -> Result<String> {
    let file = DeclarationFile {
        kind: declaration.kind.as_str().to_string(),
        extra_modules: declaration.extra_modules.clone(),
        version: declaration.version.clone(),
    };
    Ok(toml::to_string_pretty(&file)?)
}

/// Validate a declaration registered as `name` in the project `project`.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with every problem found.
/// Duplicate modules and a module repeating the project's own module are
/// legal but reported as warnings, since the resolver drops them.
pub fn validate_declaration(
    name: &str,
    project: &str,
    declaration: &TargetDeclaration,
) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if !is_identifier(name) {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            message: format!("target name '{name}' is not an identifier"),
        });
    }

    let mut seen = HashSet::new();
    for module in &declaration.extra_modules {
        if !is_identifier(module) {
            issues.push(ValidationIssue {
                severity: Severity::Error,
                message: format!("module name '{module}' is not an identifier"),
            });
        } else if module == project {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                message: format!("module '{module}' repeats the project's own module"),
            });
        } else if !seen.insert(module.as_str()) {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                message: format!("module '{module}' is listed more than once"),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Generate a template `.target.toml` for a new game target.
///
/// The kind is written as `game` rather than its canonical form.
pub fn generate_template(name: &str) -> Result<String> {
    let declaration = TargetDeclaration::create("game", [name])?;
    let file = DeclarationFile {
        kind: "game".to_string(),
        extra_modules: declaration.extra_modules,
        version: None,
    };
    Ok(toml::to_string_pretty(&file)?)
}

/// Discover all `.target.toml` files in a project's `targets/` directory.
///
/// Returns a list of (target_name, file_path) pairs sorted by name.
pub fn discover_targets(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let targets_dir = project_dir.join("targets");
    if !targets_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut targets = Vec::new();
    for entry in std::fs::read_dir(&targets_dir)? {
        let path = entry?.path();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(TARGET_FILE_SUFFIX));
        if let Some(name) = name {
            targets.push((name.to_string(), path.clone()));
        }
    }
    targets.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(targets)
}

/// Path of the declaration file for `name` inside `project_dir`.
pub fn target_path(project_dir: &Path, name: &str) -> PathBuf {
    project_dir
        .join("targets")
        .join(format!("{name}{TARGET_FILE_SUFFIX}"))
}
