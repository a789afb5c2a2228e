//! `bindery target`: declaration listing, inspection, validation, and creation.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use bindery_core::{Platform, TargetDeclaration, TargetKind};
use bindery_targets::{
    declaration_to_toml, discover_targets, load_declaration_toml, target_path,
    validate_declaration, DeclarationRegistry, Severity,
};

/// List the project's declared targets.
pub fn list(project_dir: &Path) -> Result<()> {
    let registry = DeclarationRegistry::load_dir(project_dir)?;
    if registry.is_empty() {
        println!("No targets declared in {}", project_dir.join("targets").display());
        println!("Use 'bindery target add <name>' to declare one.");
        return Ok(());
    }

    println!("Declared targets:");
    println!();
    for (name, declaration) in registry.iter() {
        println!(
            "  {name:<25} {:<15} {} extra module(s)",
            declaration.kind.as_str(),
            declaration.extra_modules.len()
        );
    }
    println!();
    println!("Use 'bindery target describe <name>' for details.");
    Ok(())
}

/// Describe one declared target of `project` (defaults to the target's
/// own name when no manifest names the project).
pub fn describe(
    name: &str,
    project: Option<&str>,
    project_dir: &Path,
    format: Option<&str>,
) -> Result<()> {
    let declaration = load_named(name, project_dir)?;
    let project = project.unwrap_or(name);

    if format == Some("toml") {
        print!("{}", declaration_to_toml(&declaration)?);
        return Ok(());
    }

    println!("=== Target: {name} ===");
    println!("Kind: {}", declaration.kind);
    if let Some(version) = &declaration.version {
        println!("Version: {version}");
    }
    println!();

    println!("--- Modules ---");
    println!("  {project} (implicit)");
    for module in &declaration.extra_modules {
        println!("  {module}");
    }
    println!();

    println!("--- Platforms ---");
    for platform in Platform::ALL {
        println!("  {:<15} {}", platform.as_str(), platform.binary_tag());
    }
    Ok(())
}

/// Validate one declared target, printing every issue found.
pub fn validate(name: &str, project: Option<&str>, project_dir: &Path) -> Result<()> {
    let declaration = load_named(name, project_dir)?;
    match validate_declaration(name, project.unwrap_or(name), &declaration) {
        Ok(()) => {
            println!("{name}: ok");
            Ok(())
        }
        Err(issues) => {
            for issue in &issues {
                println!("{}: {}", issue.severity, issue.message);
            }
            let errors = issues
                .iter()
                .filter(|i| i.severity == Severity::Error)
                .count();
            if errors > 0 {
                bail!("{name}: {errors} error(s)");
            }
            println!("{name}: ok with {} warning(s)", issues.len());
            Ok(())
        }
    }
}

/// Declare a new target in `targets/<name>.target.toml`.
pub fn add(name: &str, kind: Option<&str>, project_dir: &Path) -> Result<()> {
    let path = target_path(project_dir, name);
    if path.exists() {
        bail!("target '{name}' already exists at {}", path.display());
    }

    let kind: TargetKind = kind.unwrap_or("executable").parse()?;
    let declaration = TargetDeclaration::new(kind);
    // Fails early on names that could never be registered.
    DeclarationRegistry::new().register(name, declaration.clone())?;

    fs::create_dir_all(project_dir.join("targets")).context("creating targets/ directory")?;
    fs::write(&path, declaration_to_toml(&declaration)?)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

fn load_named(name: &str, project_dir: &Path) -> Result<TargetDeclaration> {
    let known = discover_targets(project_dir)?;
    match known.iter().find(|(n, _)| n == name) {
        Some((_, path)) => Ok(load_declaration_toml(path)
            .with_context(|| format!("loading {}", path.display()))?),
        None => bail!("unknown target: '{name}'. Use 'bindery target list' to see declared targets."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::create_project;

    fn project() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("Versatile");
        create_project(&project, "Versatile").unwrap();
        (dir, project)
    }

    #[test]
    fn list_and_describe_known_target() {
        let (_dir, project) = project();
        assert!(list(&project).is_ok());
        assert!(describe("Versatile", Some("Versatile"), &project, None).is_ok());
        assert!(describe("Versatile", None, &project, Some("toml")).is_ok());
    }

    #[test]
    fn describe_unknown_target() {
        let (_dir, project) = project();
        assert!(describe("Nope", Some("Versatile"), &project, None).is_err());
    }

    #[test]
    fn list_empty_project() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list(dir.path()).is_ok());
    }

    #[test]
    fn add_then_validate() {
        let (_dir, project) = project();
        add("VersatileServer", Some("server"), &project).unwrap();
        let d = load_declaration_toml(&target_path(&project, "VersatileServer")).unwrap();
        assert_eq!(d.kind, TargetKind::Server);
        assert!(validate("VersatileServer", Some("Versatile"), &project).is_ok());
    }

    #[test]
    fn add_rejects_existing_and_bad_input() {
        let (_dir, project) = project();
        assert!(add("Versatile", None, &project).is_err());
        assert!(add("Other", Some("toaster"), &project).is_err());
        assert!(add("bad name", None, &project).is_err());
        assert!(!target_path(&project, "bad name").exists());
    }

    #[test]
    fn validate_warnings_pass() {
        let (_dir, project) = project();
        // The generated declaration repeats the project's own module.
        assert!(validate("Versatile", Some("Versatile"), &project).is_ok());
    }

    #[test]
    fn list_survives_stray_declaration_file() {
        let (_dir, project) = project();
        fs::write(project.join("targets/my-notes.target.toml"), "kind = \"game\"\n").unwrap();
        assert!(list(&project).is_ok());
        assert!(describe("Versatile", Some("Versatile"), &project, None).is_ok());
        assert!(validate("my-notes", Some("Versatile"), &project).is_err());
    }
}
