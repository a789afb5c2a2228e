//! `bindery.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bindery_core::{BinaryPolicy, Configuration, Platform};
use serde::{Deserialize, Serialize};

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "bindery.toml";

/// The top-level manifest structure for a bindery project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinderyManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Default descriptor values.
    #[serde(default)]
    pub build: Option<BuildConfig>,
    /// Resolver policy.
    #[serde(default)]
    pub resolver: Option<ResolverConfig>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required); also the primary target's name.
    pub name: String,
    /// Project version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Build defaults section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Default platform tag.
    #[serde(default)]
    pub platform: Option<String>,
    /// Default configuration tag.
    #[serde(default)]
    pub configuration: Option<String>,
}

/// Resolver policy section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolverConfig {
    /// Whether server targets resolve to separate client and server binaries.
    #[serde(default)]
    pub split_server: Option<bool>,
}

impl BinderyManifest {
    /// Search upward from `start_dir` for a `bindery.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: BinderyManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                tracing::debug!(path = %candidate.display(), "loaded manifest");
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing bindery.toml")
    }

    /// Default platform, falling back to the host platform.
    pub fn default_platform(&self) -> Result<Option<Platform>> {
        match self.build.as_ref().and_then(|b| b.platform.as_deref()) {
            Some(tag) => Ok(Some(tag.parse().context("in [build] platform")?)),
            None => Ok(Platform::host()),
        }
    }

    /// Default configuration, falling back to development.
    pub fn default_configuration(&self) -> Result<Configuration> {
        match self.build.as_ref().and_then(|b| b.configuration.as_deref()) {
            Some(tag) => Ok(tag.parse().context("in [build] configuration")?),
            None => Ok(Configuration::default()),
        }
    }

    /// Resolver policy configured by the manifest.
    pub fn binary_policy(&self) -> BinaryPolicy {
        let split = self
            .resolver
            .as_ref()
            .and_then(|r| r.split_server)
            .unwrap_or(true);
        if split {
            BinaryPolicy::default()
        } else {
            BinaryPolicy::single()
        }
    }

    /// Generate the default template for `bindery init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
version = "0.1.0"

[build]
configuration = "development"

[resolver]
split-server = true
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_core::TargetKind;

    #[test]
    fn parse_full_manifest() {
        let toml_str = r#"
[project]
name = "Versatile"
version = "1.0.0"
description = "Third-person template"

[build]
platform = "Win64"
configuration = "Shipping"

[resolver]
split-server = false
"#;
        let manifest = BinderyManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.project.name, "Versatile");
        assert_eq!(manifest.project.version, "1.0.0");
        assert_eq!(manifest.default_platform().unwrap(), Some(Platform::Win64));
        assert_eq!(
            manifest.default_configuration().unwrap(),
            Configuration::Shipping
        );
        assert!(!manifest.binary_policy().is_split(TargetKind::Server));
    }

    #[test]
    fn parse_minimal_manifest() {
        let manifest = BinderyManifest::from_str("[project]\nname = \"minimal\"\n").unwrap();
        assert_eq!(manifest.project.version, "0.1.0");
        assert_eq!(manifest.default_platform().unwrap(), Platform::host());
        assert_eq!(
            manifest.default_configuration().unwrap(),
            Configuration::Development
        );
        assert!(manifest.binary_policy().is_split(TargetKind::Server));
    }

    #[test]
    fn unknown_platform_is_an_error() {
        let toml_str = "[project]\nname = \"p\"\n\n[build]\nplatform = \"amiga\"\n";
        let manifest = BinderyManifest::from_str(toml_str).unwrap();
        let err = manifest.default_platform().unwrap_err();
        assert!(format!("{err:#}").contains("amiga"));
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(BinderyManifest::from_str("this is not valid toml [[[").is_err());
    }

    #[test]
    fn template_is_valid_toml() {
        let manifest = BinderyManifest::from_str(&BinderyManifest::template("Versatile")).unwrap();
        assert_eq!(manifest.project.name, "Versatile");
        assert_eq!(
            manifest.default_configuration().unwrap(),
            Configuration::Development
        );
        assert!(manifest.binary_policy().is_split(TargetKind::Server));
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "[project]\nname = \"Parent\"\n",
        )
        .unwrap();
        let nested = dir.path().join("Source").join("Parent");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found_dir) = BinderyManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(manifest.project.name, "Parent");
        assert_eq!(found_dir, dir.path());
    }
}
