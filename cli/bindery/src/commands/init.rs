//! `bindery init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use bindery_core::is_identifier;
use bindery_targets::{generate_template, target_path};

use crate::manifest::{BinderyManifest, MANIFEST_FILE};

/// Create a new project at `./<name>`.
pub fn run(name: &str) -> Result<()> {
    create_project(Path::new(name), name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if !is_identifier(name) {
        bail!("project name '{name}' must be an identifier (letters, digits, '_')");
    }
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir.join("targets")).context("creating targets/ directory")?;

    fs::write(
        project_dir.join(MANIFEST_FILE),
        BinderyManifest::template(name),
    )
    .with_context(|| format!("writing {MANIFEST_FILE}"))?;

    // The primary target declares the project's own module, like every
    // generated game target does.
    let declaration = generate_template(name)?;
    let declaration_path = target_path(project_dir, name);
    fs::write(&declaration_path, declaration)
        .with_context(|| format!("writing {}", declaration_path.display()))?;

    println!("Created project '{name}'");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/targets/{name}.target.toml");

    Ok(())
}
