//! Target descriptor.
//!
//! A [`TargetDescriptor`] says *what is being built*: the platform, the build
//! configuration, and the project. The build engine assembles one per
//! invocation from its own inputs and hands it to the resolver.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};
use crate::ident::is_identifier;

/// Operating-system family of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OsFamily {
    Windows,
    Apple,
    Linux,
}

/// A recognized target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "win64")]
    Win64,
    #[serde(rename = "win32")]
    Win32,
    #[serde(rename = "mac")]
    Mac,
    #[serde(rename = "linux")]
    Linux,
    #[serde(rename = "linux-aarch64")]
    LinuxAArch64,
    #[serde(rename = "android")]
    Android,
    #[serde(rename = "ios")]
    Ios,
}

impl Platform {
    /// Every recognized platform, in declaration order.
    pub const ALL: [Platform; 7] = [
        Platform::Win64,
        Platform::Win32,
        Platform::Mac,
        Platform::Linux,
        Platform::LinuxAArch64,
        Platform::Android,
        Platform::Ios,
    ];

    /// The platform tag (e.g., "win64", "linux-aarch64").
    pub const fn as_str(&self) -> &'static str {
        match self {
            Platform::Win64 => "win64",
            Platform::Win32 => "win32",
            Platform::Mac => "mac",
            Platform::Linux => "linux",
            Platform::LinuxAArch64 => "linux-aarch64",
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }

    /// The spelling used inside binary names (e.g., "Win64", "LinuxAArch64").
    pub const fn binary_tag(&self) -> &'static str {
        match self {
            Platform::Win64 => "Win64",
            Platform::Win32 => "Win32",
            Platform::Mac => "Mac",
            Platform::Linux => "Linux",
            Platform::LinuxAArch64 => "LinuxAArch64",
            Platform::Android => "Android",
            Platform::Ios => "IOS",
        }
    }

    /// Operating-system family.
    pub const fn os_family(&self) -> OsFamily {
        match self {
            Platform::Win64 | Platform::Win32 => OsFamily::Windows,
            Platform::Mac | Platform::Ios => OsFamily::Apple,
            Platform::Linux | Platform::LinuxAArch64 | Platform::Android => OsFamily::Linux,
        }
    }

    /// File-name suffix of an executable.
    pub const fn executable_suffix(&self) -> &'static str {
        match self.os_family() {
            OsFamily::Windows => ".exe",
            OsFamily::Apple | OsFamily::Linux => "",
        }
    }

    /// File-name prefix and suffix of a shared library.
    pub const fn shared_library_affixes(&self) -> (&'static str, &'static str) {
        match self.os_family() {
            OsFamily::Windows => ("", ".dll"),
            OsFamily::Apple => ("lib", ".dylib"),
            OsFamily::Linux => ("lib", ".so"),
        }
    }

    /// File-name prefix and suffix of a static library.
    pub const fn static_library_affixes(&self) -> (&'static str, &'static str) {
        match self.os_family() {
            OsFamily::Windows => ("", ".lib"),
            OsFamily::Apple | OsFamily::Linux => ("lib", ".a"),
        }
    }

    /// The platform this process is running on, if it is a recognized one.
    pub fn host() -> Option<Self> {
        if cfg!(all(target_os = "windows", target_pointer_width = "64")) {
            Some(Platform::Win64)
        } else if cfg!(target_os = "windows") {
            Some(Platform::Win32)
        } else if cfg!(target_os = "macos") {
            Some(Platform::Mac)
        } else if cfg!(all(target_os = "linux", target_arch = "aarch64")) {
            Some(Platform::LinuxAArch64)
        } else if cfg!(target_os = "linux") {
            Some(Platform::Linux)
        } else {
            None
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win64" | "windows" => Ok(Platform::Win64),
            "win32" => Ok(Platform::Win32),
            "mac" | "macos" => Ok(Platform::Mac),
            "linux" => Ok(Platform::Linux),
            "linux-aarch64" | "linuxaarch64" | "linux-arm64" => Ok(Platform::LinuxAArch64),
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            _ => Err(ResolveError::InvalidDescriptor {
                detail: format!("unrecognized platform '{s}'"),
            }),
        }
    }
}

/// A recognized build configuration.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Configuration {
    /// Everything unoptimized, engine included.
    Debug,
    /// Project modules unoptimized, engine optimized.
    DebugGame,
    /// Optimized with developer tooling enabled.
    #[default]
    Development,
    /// Shipping build with test hooks left in.
    Test,
    /// Final release build.
    Shipping,
}

impl Configuration {
    /// Every recognized configuration, from least to most optimized.
    pub const ALL: [Configuration; 5] = [
        Configuration::Debug,
        Configuration::DebugGame,
        Configuration::Development,
        Configuration::Test,
        Configuration::Shipping,
    ];

    /// The configuration tag (e.g., "debug-game").
    pub const fn as_str(&self) -> &'static str {
        match self {
            Configuration::Debug => "debug",
            Configuration::DebugGame => "debug-game",
            Configuration::Development => "development",
            Configuration::Test => "test",
            Configuration::Shipping => "shipping",
        }
    }

    /// The spelling used inside binary names (e.g., "DebugGame").
    pub const fn binary_tag(&self) -> &'static str {
        match self {
            Configuration::Debug => "Debug",
            Configuration::DebugGame => "DebugGame",
            Configuration::Development => "Development",
            Configuration::Test => "Test",
            Configuration::Shipping => "Shipping",
        }
    }

    /// Whether project code is built with optimizations.
    pub const fn is_optimized(&self) -> bool {
        !matches!(self, Configuration::Debug | Configuration::DebugGame)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Configuration {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Configuration::Debug),
            "debug-game" | "debuggame" => Ok(Configuration::DebugGame),
            "development" | "dev" => Ok(Configuration::Development),
            "test" => Ok(Configuration::Test),
            "shipping" => Ok(Configuration::Shipping),
            _ => Err(ResolveError::InvalidDescriptor {
                detail: format!("unrecognized configuration '{s}'"),
            }),
        }
    }
}

/// Describes one requested build: where, how, and for which project.
///
/// Fields are public so the engine can destructure a descriptor freely;
/// [`TargetDescriptor::new`] and [`TargetDescriptor::parse`] are the
/// validating ways to create one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetDescriptor {
    /// Target platform.
    pub platform: Platform,
    /// Build configuration.
    pub configuration: Configuration,
    /// Project name; also the name of the project's primary module.
    pub project_name: String,
}

impl TargetDescriptor {
    /// Create a descriptor, rejecting blank or non-identifier project names.
    pub fn new(
        platform: Platform,
        configuration: Configuration,
        project_name: impl Into<String>,
    ) -> Result<Self> {
        let descriptor = Self {
            platform,
            configuration,
            project_name: project_name.into(),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Create a descriptor from string tags, as they arrive from a command
    /// line or environment.
    pub fn parse(platform: &str, configuration: &str, project_name: &str) -> Result<Self> {
        Self::new(platform.parse()?, configuration.parse()?, project_name)
    }

    /// Check the descriptor invariants.
    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(ResolveError::InvalidDescriptor {
                detail: "project name is empty".into(),
            });
        }
        if !is_identifier(&self.project_name) {
            return Err(ResolveError::InvalidDescriptor {
                detail: format!("project name '{}' is not an identifier", self.project_name),
            });
        }
        Ok(())
    }

    /// Name of the module every target of this project implicitly includes.
    pub fn default_module(&self) -> &str {
        &self.project_name
    }
}
