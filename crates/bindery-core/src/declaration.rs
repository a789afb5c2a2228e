//! Target declaration.
//!
//! A project declares its target once: what kind of binary it builds and
//! which modules beyond its own primary module have to be linked in. The
//! declaration is append-only and keeps module order exactly as written;
//! deduplication is the resolver's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};
use crate::ident::is_identifier;

/// The kind of build a target produces.
///
/// Serializes as its canonical tag; deserializes through [`FromStr`], so
/// aliases like `game` are accepted wherever a kind is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum TargetKind {
    /// A standalone program, such as a game.
    Executable,
    SharedLibrary,
    StaticLibrary,
    /// A dedicated server; resolves to a client and a server binary.
    Server,
    /// A tool that runs inside the editor environment.
    EditorTool,
}

impl TargetKind {
    /// Every recognized kind.
    pub const ALL: [TargetKind; 5] = [
        TargetKind::Executable,
        TargetKind::SharedLibrary,
        TargetKind::StaticLibrary,
        TargetKind::Server,
        TargetKind::EditorTool,
    ];

    /// The kind tag (e.g., "shared-library").
    pub const fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Executable => "executable",
            TargetKind::SharedLibrary => "shared-library",
            TargetKind::StaticLibrary => "static-library",
            TargetKind::Server => "server",
            TargetKind::EditorTool => "editor-tool",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "executable" | "game" | "program" | "client" => Ok(TargetKind::Executable),
            "shared-library" | "shared" | "dylib" => Ok(TargetKind::SharedLibrary),
            "static-library" | "static" | "lib" => Ok(TargetKind::StaticLibrary),
            "server" => Ok(TargetKind::Server),
            "editor-tool" | "editor" => Ok(TargetKind::EditorTool),
            _ => Err(ResolveError::InvalidKind {
                kind: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for TargetKind {
    type Error = ResolveError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A project's target declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetDeclaration {
    /// Build kind.
    pub kind: TargetKind,
    /// Modules required beyond the project's own module, in link order.
    #[serde(default)]
    pub extra_modules: Vec<String>,
    /// Declaration version, for audit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<semver::Version>,
}

impl TargetDeclaration {
    /// A declaration of the given kind with no extra modules.
    pub fn new(kind: TargetKind) -> Self {
        Self {
            kind,
            extra_modules: Vec::new(),
            version: None,
        }
    }

    /// Create a declaration from a kind tag and a list of extra modules.
    ///
    /// Fails with [`ResolveError::InvalidKind`] for an unrecognized kind and
    /// [`ResolveError::InvalidModuleName`] for the first malformed module.
    pub fn create<I, S>(kind: &str, extra_modules: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut declaration = Self::new(kind.parse()?);
        for name in extra_modules {
            declaration = declaration.add_module(name)?;
        }
        Ok(declaration)
    }

    /// Return a new declaration with `name` appended to the extra modules.
    ///
    /// Appending a name that is already present is allowed and kept verbatim.
    pub fn add_module(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        check_module_name(&name)?;
        self.extra_modules.push(name);
        Ok(self)
    }

    /// Return a new declaration carrying `version`.
    pub fn with_version(mut self, version: semver::Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Check the declaration invariants.
    pub fn validate(&self) -> Result<()> {
        self.extra_modules
            .iter()
            .try_for_each(|name| check_module_name(name))
    }
}

fn check_module_name(name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(ResolveError::InvalidModuleName {
            name: name.to_string(),
        })
    }
}
