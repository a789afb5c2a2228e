//! `bindery resolve`: resolve a project target into binaries.

use std::path::Path;

use anyhow::{bail, Context, Result};
use bindery_core::{BinaryPolicy, Configuration, Platform, Resolution, TargetDescriptor};
use bindery_targets::DeclarationRegistry;

use crate::manifest::BinderyManifest;

/// Options for a single resolution, as given on the command line.
#[derive(Debug, Default)]
pub struct ResolveOptions<'a> {
    pub target: Option<&'a str>,
    pub platform: Option<&'a str>,
    pub configuration: Option<&'a str>,
    pub single_binary: bool,
}

/// Resolve and print.
pub fn run(
    project_dir: &Path,
    manifest: Option<&BinderyManifest>,
    options: &ResolveOptions<'_>,
    format: Option<&str>,
) -> Result<()> {
    let descriptor = build_descriptor(manifest, options)?;
    let resolution = resolve_project(project_dir, manifest, &descriptor, options)?;

    match format.unwrap_or("human") {
        "human" => print_human(&descriptor, &resolution),
        "json" => {
            let json = serde_json::to_string_pretty(&resolution)
                .context("serializing resolution")?;
            println!("{json}");
        }
        other => bail!("unknown format '{other}' (expected 'human' or 'json')"),
    }
    Ok(())
}

/// The target to resolve: `--target`, else the project's primary target.
pub(crate) fn target_name<'a>(
    manifest: Option<&'a BinderyManifest>,
    options: &ResolveOptions<'a>,
) -> Result<&'a str> {
    match (options.target, manifest) {
        (Some(name), _) => Ok(name),
        (None, Some(m)) => Ok(m.project.name.as_str()),
        (None, None) => bail!("no target given and no bindery.toml found (use --target)"),
    }
}

/// Build the descriptor from flags, falling back to manifest defaults.
///
/// The project name comes from `[project] name`. Without a manifest the
/// target is taken to be the project's primary target.
pub(crate) fn build_descriptor(
    manifest: Option<&BinderyManifest>,
    options: &ResolveOptions<'_>,
) -> Result<TargetDescriptor> {
    let project_name = match manifest {
        Some(m) => m.project.name.clone(),
        None => target_name(None, options)?.to_string(),
    };

    let platform = match options.platform {
        Some(tag) => tag.parse::<Platform>()?,
        None => match manifest {
            Some(m) => m.default_platform()?,
            None => Platform::host(),
        }
        .context("host platform is not supported; pass --platform")?,
    };

    let configuration = match options.configuration {
        Some(tag) => tag.parse::<Configuration>()?,
        None => match manifest {
            Some(m) => m.default_configuration()?,
            None => Configuration::default(),
        },
    };

    Ok(TargetDescriptor::new(platform, configuration, project_name)?)
}

/// Load the project's declarations and resolve `descriptor` against them.
pub(crate) fn resolve_project(
    project_dir: &Path,
    manifest: Option<&BinderyManifest>,
    descriptor: &TargetDescriptor,
    options: &ResolveOptions<'_>,
) -> Result<Resolution> {
    let policy = if options.single_binary {
        BinaryPolicy::single()
    } else {
        manifest.map_or_else(BinaryPolicy::default, BinderyManifest::binary_policy)
    };

    let target = target_name(manifest, options)?;

    let registry = DeclarationRegistry::load_dir(project_dir)
        .with_context(|| format!("loading targets from {}", project_dir.display()))?;
    tracing::debug!(
        targets = registry.len(),
        platform = %descriptor.platform,
        configuration = %descriptor.configuration,
        project = %descriptor.project_name,
        "resolving {target}"
    );

    let resolution = registry.resolve(target, descriptor, &policy)?;
    tracing::info!(
        binaries = resolution.binaries.len(),
        modules = resolution.modules.len(),
        fingerprint = %resolution.fingerprint(),
        "resolved {target}"
    );
    Ok(resolution)
}

fn print_human(descriptor: &TargetDescriptor, resolution: &Resolution) {
    println!(
        "=== Target: {} ({} / {}) ===",
        resolution.target, descriptor.platform, descriptor.configuration
    );
    println!("Project: {}", resolution.project_name);
    if let Some(version) = &resolution.version {
        println!("Version: {version}");
    }
    println!();

    for binary in &resolution.binaries {
        println!("--- {} [{}] ---", binary.file_name(descriptor.platform), binary.role);
        println!("  Kind:    {}", binary.output_kind);
        println!("  Modules:");
        for module in &binary.modules {
            println!("    {module}");
        }
        println!();
    }

    println!("Modules: {}", resolution.modules.join(", "));
    println!("Fingerprint: {}", resolution.fingerprint());
}
