//! Binary resolution.
//!
//! Turns a descriptor and a declaration into the binaries to build. The
//! module list is the project's own module followed by the declared extra
//! modules with duplicates dropped (first occurrence wins, exact match). The
//! number of binaries comes from a [`BinaryPolicy`] table keyed by
//! [`TargetKind`].
//!
//! Resolution is a pure function: the same inputs always produce the same
//! output, down to the bytes of its serialized form.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::binary::{BinaryConfiguration, BinaryRole, OutputType};
use crate::declaration::{TargetDeclaration, TargetKind};
use crate::descriptor::{Configuration, TargetDescriptor};
use crate::error::{ResolveError, Result};
use crate::ident::is_identifier;

/// Which binaries each target kind resolves to.
///
/// Kinds without an entry resolve to a single [`BinaryRole::Primary`]
/// binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPolicy {
    roles: BTreeMap<TargetKind, Vec<BinaryRole>>,
}

impl BinaryPolicy {
    /// One binary for every kind.
    pub fn single() -> Self {
        Self {
            roles: BTreeMap::new(),
        }
    }

    /// Override the binaries produced for `kind`.
    pub fn with_roles(mut self, kind: TargetKind, roles: Vec<BinaryRole>) -> Self {
        self.roles.insert(kind, roles);
        self
    }

    /// Roles resolved for `kind`, in output order.
    pub fn roles(&self, kind: TargetKind) -> &[BinaryRole] {
        self.roles
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[BinaryRole::Primary])
    }

    /// Whether `kind` resolves to more than one binary.
    pub fn is_split(&self, kind: TargetKind) -> bool {
        self.roles(kind).len() > 1
    }
}

impl Default for BinaryPolicy {
    /// Server targets split into a client and a server binary; every other
    /// kind produces one binary.
    fn default() -> Self {
        Self::single().with_roles(
            TargetKind::Server,
            vec![BinaryRole::Client, BinaryRole::Server],
        )
    }
}

/// The output of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Resolution {
    /// Project the binaries belong to.
    pub project_name: String,
    /// Target the binaries were resolved from; binary names start with it.
    pub target: String,
    /// Declaration version, if the declaration carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<semver::Version>,
    /// Binaries to build, never empty.
    pub binaries: Vec<BinaryConfiguration>,
    /// Every module any binary links, in first-use order.
    pub modules: Vec<String>,
}

impl Resolution {
    /// SHA-256 hex digest of the canonical JSON form of this resolution.
    ///
    /// Identical inputs to [`resolve`] always give identical fingerprints.
    pub fn fingerprint(&self) -> String {
        // Struct fields serialize in declaration order and every collection
        // is a Vec, so the JSON form is canonical.
        let bytes = serde_json::to_vec(self)
            .expect("resolution always serializes to JSON");
        let digest = Sha256::digest(&bytes);
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Resolve with the default [`BinaryPolicy`].
pub fn resolve(descriptor: &TargetDescriptor, declaration: &TargetDeclaration) -> Result<Resolution> {
    resolve_with(descriptor, declaration, &BinaryPolicy::default())
}

/// Resolve the project's primary target into its binaries under `policy`.
///
/// The primary target shares the project's name.
pub fn resolve_with(
    descriptor: &TargetDescriptor,
    declaration: &TargetDeclaration,
    policy: &BinaryPolicy,
) -> Result<Resolution> {
    resolve_target(&descriptor.project_name, descriptor, declaration, policy)
}

/// Resolve the target called `target` into its binaries under `policy`.
///
/// Binary names start with `target`; the default module is still the
/// project's own module from `descriptor`.
pub fn resolve_target(
    target: &str,
    descriptor: &TargetDescriptor,
    declaration: &TargetDeclaration,
    policy: &BinaryPolicy,
) -> Result<Resolution> {
    descriptor
        .validate()
        .and_then(|()| declaration.validate())
        .map_err(|e| ResolveError::UnresolvedInput {
            detail: e.to_string(),
        })?;
    if !is_identifier(target) {
        return Err(ResolveError::UnresolvedInput {
            detail: format!("target name '{target}' is not an identifier"),
        });
    }

    let modules = module_sequence(descriptor.default_module(), &declaration.extra_modules);

    let binaries: Vec<BinaryConfiguration> = policy
        .roles(declaration.kind)
        .iter()
        .map(|&role| BinaryConfiguration {
            name: binary_name(target, descriptor, role),
            role,
            output_kind: declaration.kind,
            output_type: OutputType::from(declaration.kind),
            modules: modules.clone(),
        })
        .collect();

    if binaries.is_empty() {
        return Err(ResolveError::EmptyResolution {
            kind: declaration.kind.to_string(),
        });
    }

    Ok(Resolution {
        project_name: descriptor.project_name.clone(),
        target: target.to_string(),
        version: declaration.version.clone(),
        modules: flatten_modules(&binaries),
        binaries,
    })
}

/// The default module followed by `extra`, first occurrence wins.
fn module_sequence(default_module: &str, extra: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(extra.len() + 1);
    let mut modules = Vec::with_capacity(extra.len() + 1);
    for name in std::iter::once(default_module).chain(extra.iter().map(String::as_str)) {
        if seen.insert(name) {
            modules.push(name.to_string());
        }
    }
    modules
}

/// Union of every binary's modules, in first-use order.
fn flatten_modules(binaries: &[BinaryConfiguration]) -> Vec<String> {
    let mut seen = HashSet::new();
    binaries
        .iter()
        .flat_map(|b| b.modules.iter())
        .filter(|m| seen.insert(m.as_str()))
        .cloned()
        .collect()
}

/// `Target` in development builds, `Target-Platform-Configuration`
/// otherwise. Split roles add their suffix to the target part.
fn binary_name(target: &str, descriptor: &TargetDescriptor, role: BinaryRole) -> String {
    let stem = format!("{target}{}", role.name_suffix());
    if descriptor.configuration == Configuration::Development {
        stem
    } else {
        format!(
            "{stem}-{}-{}",
            descriptor.platform.binary_tag(),
            descriptor.configuration.binary_tag()
        )
    }
}
