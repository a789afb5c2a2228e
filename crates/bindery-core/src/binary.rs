//! Resolved binary configurations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::declaration::TargetKind;
use crate::descriptor::Platform;

/// Which part of a target a binary represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinaryRole {
    /// The only binary of a single-binary target.
    Primary,
    Client,
    Server,
}

impl BinaryRole {
    /// Suffix appended to the target name for this role.
    pub const fn name_suffix(&self) -> &'static str {
        match self {
            BinaryRole::Primary => "",
            BinaryRole::Client => "Client",
            BinaryRole::Server => "Server",
        }
    }
}

impl fmt::Display for BinaryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryRole::Primary => "primary",
            BinaryRole::Client => "client",
            BinaryRole::Server => "server",
        })
    }
}

/// Artifact type a binary is linked into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputType {
    Executable,
    SharedLibrary,
    StaticLibrary,
}

impl From<TargetKind> for OutputType {
    fn from(kind: TargetKind) -> Self {
        match kind {
            TargetKind::SharedLibrary => OutputType::SharedLibrary,
            TargetKind::StaticLibrary => OutputType::StaticLibrary,
            TargetKind::Executable | TargetKind::Server | TargetKind::EditorTool => {
                OutputType::Executable
            }
        }
    }
}

/// One binary to build and the modules linked into it, in link order.
///
/// Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BinaryConfiguration {
    /// Output name without platform prefix or extension.
    pub name: String,
    /// Role within the target.
    pub role: BinaryRole,
    /// Kind of the declaration this binary came from.
    pub output_kind: TargetKind,
    /// Artifact type.
    pub output_type: OutputType,
    /// Modules in link order; the project's own module is always first.
    pub modules: Vec<String>,
}

impl BinaryConfiguration {
    /// The project's own module.
    pub fn default_module(&self) -> &str {
        // Resolution never yields an empty module list.
        self.modules.first().map(String::as_str).unwrap_or_default()
    }

    /// File name of the artifact on `platform`.
    pub fn file_name(&self, platform: Platform) -> String {
        let (prefix, suffix) = match self.output_type {
            OutputType::Executable => ("", platform.executable_suffix()),
            OutputType::SharedLibrary => platform.shared_library_affixes(),
            OutputType::StaticLibrary => platform.static_library_affixes(),
        };
        format!("{prefix}{}{suffix}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(output_kind: TargetKind) -> BinaryConfiguration {
        BinaryConfiguration {
            name: "Versatile".into(),
            role: BinaryRole::Primary,
            output_kind,
            output_type: output_kind.into(),
            modules: vec!["Versatile".into(), "Core".into()],
        }
    }

    #[test]
    fn output_type_from_kind() {
        assert_eq!(OutputType::from(TargetKind::Server), OutputType::Executable);
        assert_eq!(OutputType::from(TargetKind::EditorTool), OutputType::Executable);
        assert_eq!(
            OutputType::from(TargetKind::SharedLibrary),
            OutputType::SharedLibrary
        );
    }

    #[test]
    fn file_names_per_platform() {
        let exe = config(TargetKind::Executable);
        assert_eq!(exe.file_name(Platform::Win64), "Versatile.exe");
        assert_eq!(exe.file_name(Platform::Linux), "Versatile");

        let shared = config(TargetKind::SharedLibrary);
        assert_eq!(shared.file_name(Platform::Win64), "Versatile.dll");
        assert_eq!(shared.file_name(Platform::Mac), "libVersatile.dylib");
        assert_eq!(shared.file_name(Platform::Linux), "libVersatile.so");

        let stat = config(TargetKind::StaticLibrary);
        assert_eq!(stat.file_name(Platform::Win32), "Versatile.lib");
        assert_eq!(stat.file_name(Platform::Android), "libVersatile.a");
    }

    #[test]
    fn structural_equality() {
        let a = config(TargetKind::Executable);
        let mut b = config(TargetKind::Executable);
        assert_eq!(a, b);
        b.modules.reverse();
        assert_ne!(a, b);
    }

    #[test]
    fn default_module_is_first() {
        assert_eq!(config(TargetKind::Executable).default_module(), "Versatile");
    }
}
