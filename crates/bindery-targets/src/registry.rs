//! Declaration registry.
//!
//! Maps target names to their declarations for the lifetime of a build
//! process. Target names are lookup keys only; the descriptor's project
//! name still supplies every binary's default module.

use std::collections::BTreeMap;
use std::path::Path;

use bindery_core::{
    is_identifier, resolve_target, BinaryPolicy, Resolution, TargetDeclaration, TargetDescriptor,
};

use crate::error::{Result, TargetError};
use crate::parse::{discover_targets, load_declaration_toml};

/// Target name → declaration table with deterministic iteration order.
#[derive(Debug, Clone, Default)]
pub struct DeclarationRegistry {
    declarations: BTreeMap<String, TargetDeclaration>,
}

impl DeclarationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every declaration file in `project_dir/targets/`.
    ///
    /// Files whose stem is not an identifier cannot name a target and are
    /// skipped with a warning.
    pub fn load_dir(project_dir: &Path) -> Result<Self> {
        let mut registry = Self::new();
        for (name, path) in discover_targets(project_dir)? {
            if !is_identifier(&name) {
                tracing::warn!(
                    target_name = %name,
                    path = %path.display(),
                    "skipping declaration file: target name is not an identifier"
                );
                continue;
            }
            let declaration = load_declaration_toml(&path)?;
            tracing::debug!(
                target_name = %name,
                kind = %declaration.kind,
                modules = declaration.extra_modules.len(),
                path = %path.display(),
                "loaded target declaration"
            );
            registry.register(name, declaration)?;
        }
        Ok(registry)
    }

    /// Register `declaration` under `name`, returning any declaration it
    /// replaces.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        declaration: TargetDeclaration,
    ) -> Result<Option<TargetDeclaration>> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(TargetError::Validation {
                detail: format!("target name '{name}' is not an identifier"),
            });
        }
        declaration.validate()?;
        let previous = self.declarations.insert(name.clone(), declaration);
        if previous.is_some() {
            tracing::debug!(target_name = %name, "replaced target declaration");
        }
        Ok(previous)
    }

    /// Look up the declaration registered as `name`.
    pub fn get(&self, name: &str) -> Option<&TargetDeclaration> {
        self.declarations.get(name)
    }

    /// Registered target names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    /// Iterate over (name, declaration) pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TargetDeclaration)> {
        self.declarations.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Resolve the declaration registered as `target` for the project in
    /// `descriptor`.
    pub fn resolve(
        &self,
        target: &str,
        descriptor: &TargetDescriptor,
        policy: &BinaryPolicy,
    ) -> Result<Resolution> {
        let declaration = self
            .get(target)
            .ok_or_else(|| TargetError::UnknownTarget {
                name: target.to_string(),
            })?;
        Ok(resolve_target(target, descriptor, declaration, policy)?)
    }
}
