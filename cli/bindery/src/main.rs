//! bindery CLI: declare project targets and resolve them into binaries.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::resolve::ResolveOptions;
use manifest::BinderyManifest;

#[derive(Parser)]
#[command(name = "bindery", version, about = "Target declaration and binary resolution")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project with a primary game target
    Init {
        /// Project name
        name: String,
    },
    /// Resolve a target into the binaries to build and their modules
    Resolve {
        /// Target name (default: project name from bindery.toml)
        #[arg(long)]
        target: Option<String>,
        /// Platform (e.g., win64, linux, mac)
        #[arg(long)]
        platform: Option<String>,
        /// Build configuration (debug, debug-game, development, test, shipping)
        #[arg(long)]
        configuration: Option<String>,
        /// Produce one binary even for server targets
        #[arg(long)]
        single_binary: bool,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Manage target declarations
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
}

#[derive(Subcommand)]
enum TargetAction {
    /// List declared targets
    List,
    /// Show details of a declared target
    Describe {
        /// Target name
        name: String,
        /// Output format (default: human-readable, "toml" for TOML)
        #[arg(long)]
        format: Option<String>,
    },
    /// Validate a target declaration
    Validate {
        /// Target name
        name: String,
    },
    /// Declare a new target
    Add {
        /// Target name
        name: String,
        /// Target kind (game, executable, server, editor, shared-library, static-library)
        #[arg(long)]
        kind: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Resolve {
            target,
            platform,
            configuration,
            single_binary,
            format,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let options = ResolveOptions {
                target: target.as_deref(),
                platform: platform.as_deref(),
                configuration: configuration.as_deref(),
                single_binary,
            };
            commands::resolve::run(&project_dir, manifest.as_ref(), &options, format.as_deref())
        }

        Commands::Target { action } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let project = manifest.as_ref().map(|m| m.project.name.as_str());
            match action {
                TargetAction::List => commands::target::list(&project_dir),
                TargetAction::Describe { name, format } => {
                    commands::target::describe(&name, project, &project_dir, format.as_deref())
                }
                TargetAction::Validate { name } => {
                    commands::target::validate(&name, project, &project_dir)
                }
                TargetAction::Add { name, kind } => {
                    commands::target::add(&name, kind.as_deref(), &project_dir)
                }
            }
        }
    }
}

/// Try to load a manifest from the current directory upward. Returns (None, None) if not found.
fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<BinderyManifest>, Option<PathBuf>)> {
    match BinderyManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use bindery_core::{Configuration, Platform, TargetKind};

    /// Full workflow: init → add server target → resolve both.
    #[test]
    fn init_add_resolve_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("Versatile");

        commands::init::create_project(&project, "Versatile").unwrap();
        commands::target::add("VersatileServer", Some("server"), &project).unwrap();

        let (manifest, found) = load_manifest_optional(&project.join("targets")).unwrap();
        let manifest = manifest.unwrap();
        assert_eq!(found.as_deref(), Some(project.as_path()));

        let game = ResolveOptions {
            platform: Some("win64"),
            configuration: Some("shipping"),
            ..Default::default()
        };
        let descriptor = commands::resolve::build_descriptor(Some(&manifest), &game).unwrap();
        assert_eq!(descriptor.platform, Platform::Win64);
        assert_eq!(descriptor.configuration, Configuration::Shipping);
        let r = commands::resolve::resolve_project(&project, Some(&manifest), &descriptor, &game)
            .unwrap();
        assert_eq!(r.binaries.len(), 1);
        assert_eq!(r.binaries[0].name, "Versatile-Win64-Shipping");
        assert_eq!(
            r.binaries[0].file_name(descriptor.platform),
            "Versatile-Win64-Shipping.exe"
        );

        let server = ResolveOptions {
            target: Some("VersatileServer"),
            platform: Some("linux"),
            ..Default::default()
        };
        let descriptor = commands::resolve::build_descriptor(Some(&manifest), &server).unwrap();
        let r = commands::resolve::resolve_project(&project, Some(&manifest), &descriptor, &server)
            .unwrap();
        assert_eq!(r.binaries.len(), 2);
        assert!(r.binaries.iter().all(|b| b.output_kind == TargetKind::Server));
        assert_eq!(r.modules, vec!["Versatile"]);
        let names: Vec<_> = r.binaries.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["VersatileServerClient", "VersatileServerServer"]);
    }

    #[test]
    fn cli_parses_resolve_flags() {
        let cli = Cli::try_parse_from([
            "bindery",
            "-v",
            "resolve",
            "--target",
            "Versatile",
            "--platform",
            "mac",
            "--single-binary",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Resolve {
                target,
                platform,
                single_binary,
                format,
                ..
            } => {
                assert_eq!(target.as_deref(), Some("Versatile"));
                assert_eq!(platform.as_deref(), Some("mac"));
                assert!(single_binary);
                assert_eq!(format.as_deref(), Some("json"));
            }
            _ => panic!("expected resolve"),
        }
    }
}
