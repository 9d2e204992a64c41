//! Build settings.
//!
//! This module contains the configuration axes a recipe is evaluated
//! against: target OS, compiler family, build type, C++ standard, and
//! the mutually exclusive build variants. A validated snapshot of all
//! of them is a [`BuildConfig`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::diagnostic::VariantConflictError;

/// Target operating system.
///
/// Only the axes that change artifact deployment are distinguished;
/// everything else is a free-form `arch` string on [`BuildConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Windows,
    Linux,
    #[serde(alias = "darwin", alias = "osx")]
    Macos,
}

impl TargetOs {
    /// Detect the host operating system.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => TargetOs::Windows,
            "macos" => TargetOs::Macos,
            "linux" => TargetOs::Linux,
            other => {
                tracing::debug!("unrecognized host os `{other}`, assuming a linux-style layout");
                TargetOs::Linux
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Windows => "windows",
            TargetOs::Linux => "linux",
            TargetOs::Macos => "macos",
        }
    }
}

impl FromStr for TargetOs {
    type Err = OsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win" | "win32" => Ok(TargetOs::Windows),
            "linux" => Ok(TargetOs::Linux),
            "macos" | "darwin" | "osx" => Ok(TargetOs::Macos),
            _ => Err(OsParseError(s.to_string())),
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an invalid OS name.
#[derive(Debug, Clone)]
pub struct OsParseError(pub String);

impl fmt::Display for OsParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid os '{}', valid values: windows, linux, macos",
            self.0
        )
    }
}

impl std::error::Error for OsParseError {}

/// Compiler family.
///
/// Any name stevedore has no specific handling for deserializes to
/// [`CompilerFamily::Other`] and takes the single-configuration path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerFamily {
    #[serde(alias = "Visual Studio", alias = "cl")]
    Msvc,
    Gcc,
    Clang,
    #[serde(rename = "apple-clang", alias = "appleclang")]
    AppleClang,
    #[serde(other)]
    Other,
}

impl CompilerFamily {
    /// Whether this family's build system emits per-configuration
    /// subdirectories (`Debug/`, `Release/`) under each output dir.
    pub fn is_multi_config(&self) -> bool {
        matches!(self, CompilerFamily::Msvc)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Msvc => "msvc",
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::AppleClang => "apple-clang",
            CompilerFamily::Other => "other",
        }
    }

    /// Probe the host for a sensible default compiler family.
    pub fn detect(os: TargetOs) -> Self {
        use which::which;

        match os {
            TargetOs::Windows => {
                if which("cl").is_ok() {
                    CompilerFamily::Msvc
                } else if which("clang").is_ok() {
                    CompilerFamily::Clang
                } else {
                    CompilerFamily::Msvc
                }
            }
            TargetOs::Macos => CompilerFamily::AppleClang,
            TargetOs::Linux => {
                if which("gcc").is_ok() {
                    CompilerFamily::Gcc
                } else if which("clang").is_ok() {
                    CompilerFamily::Clang
                } else {
                    CompilerFamily::Gcc
                }
            }
        }
    }
}

impl FromStr for CompilerFamily {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "msvc" | "cl" | "visual studio" => CompilerFamily::Msvc,
            "gcc" => CompilerFamily::Gcc,
            "clang" => CompilerFamily::Clang,
            "apple-clang" | "appleclang" => CompilerFamily::AppleClang,
            other => {
                tracing::debug!("unrecognized compiler family `{other}`, treating as generic");
                CompilerFamily::Other
            }
        })
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Requested optimization profile.
///
/// This is a hint passed through to external generators; the output
/// directory layout never keys off it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    #[serde(alias = "Debug")]
    Debug,
    #[default]
    #[serde(alias = "Release")]
    Release,
    #[serde(rename = "relwithdebinfo", alias = "RelWithDebInfo")]
    RelWithDebInfo,
    #[serde(rename = "minsizerel", alias = "MinSizeRel")]
    MinSizeRel,
}

impl BuildType {
    /// The configuration directory name used by multi-config build
    /// systems (e.g. `Debug`, `Release`).
    pub fn dir_name(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl FromStr for BuildType {
    type Err = BuildTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            _ => Err(BuildTypeParseError(s.to_string())),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// Error returned when parsing an invalid build type.
#[derive(Debug, Clone)]
pub struct BuildTypeParseError(pub String);

impl fmt::Display for BuildTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid build type '{}', valid values: Debug, Release, RelWithDebInfo, MinSizeRel",
            self.0
        )
    }
}

impl std::error::Error for BuildTypeParseError {}

/// C++ standard version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CppStandard {
    #[serde(rename = "11", alias = "c++11", alias = "cpp11")]
    Cpp11,
    #[serde(rename = "14", alias = "c++14", alias = "cpp14")]
    Cpp14,
    #[serde(rename = "17", alias = "c++17", alias = "cpp17")]
    Cpp17,
    #[serde(rename = "20", alias = "c++20", alias = "cpp20")]
    Cpp20,
    #[serde(rename = "23", alias = "c++23", alias = "cpp23")]
    Cpp23,
}

impl FromStr for CppStandard {
    type Err = CppStandardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "11" | "c++11" | "cpp11" => Ok(CppStandard::Cpp11),
            "14" | "c++14" | "cpp14" => Ok(CppStandard::Cpp14),
            "17" | "c++17" | "cpp17" => Ok(CppStandard::Cpp17),
            "20" | "c++20" | "cpp20" => Ok(CppStandard::Cpp20),
            "23" | "c++23" | "cpp23" => Ok(CppStandard::Cpp23),
            _ => Err(CppStandardParseError(s.to_string())),
        }
    }
}

impl fmt::Display for CppStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C++{}",
            match self {
                CppStandard::Cpp11 => "11",
                CppStandard::Cpp14 => "14",
                CppStandard::Cpp17 => "17",
                CppStandard::Cpp20 => "20",
                CppStandard::Cpp23 => "23",
            }
        )
    }
}

/// Error returned when parsing an invalid C++ standard string.
#[derive(Debug, Clone)]
pub struct CppStandardParseError(pub String);

impl fmt::Display for CppStandardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid C++ standard '{}', valid values: 11, 14, 17, 20, 23",
            self.0
        )
    }
}

impl std::error::Error for CppStandardParseError {}

/// A build variant. At most one may be active for a configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildVariant {
    /// Ordinary build with no instrumentation.
    #[default]
    Plain,
    /// Developer build with extra diagnostics.
    Dev,
    /// Coverage-instrumented build.
    Coverage,
    /// Sanitizer-instrumented build.
    Sanitize,
}

impl BuildVariant {
    /// Root of this variant's output tree, relative to the workspace.
    ///
    /// The instrumented variants nest under `build/` so that wiping
    /// `build/` clears every variant at once.
    pub fn base_path(&self) -> &'static str {
        match self {
            BuildVariant::Plain => "build",
            BuildVariant::Dev => "build/dev",
            BuildVariant::Coverage => "build/coverage",
            BuildVariant::Sanitize => "build/sanitize",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildVariant::Plain => "plain",
            BuildVariant::Dev => "dev",
            BuildVariant::Coverage => "coverage",
            BuildVariant::Sanitize => "sanitize",
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw variant switches, as they arrive from CLI flags or a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantFlags {
    pub dev: bool,
    pub coverage: bool,
    pub sanitize: bool,
}

impl VariantFlags {
    /// Whether any switch is enabled.
    pub fn any_set(&self) -> bool {
        self.dev || self.coverage || self.sanitize
    }

    /// Reduce the switches to a single variant.
    ///
    /// More than one enabled switch is a configuration conflict and is
    /// rejected here, before any resolution or filesystem work runs.
    pub fn resolve(&self) -> Result<BuildVariant, VariantConflictError> {
        let enabled: Vec<(&'static str, BuildVariant)> = [
            (self.dev, "dev", BuildVariant::Dev),
            (self.coverage, "coverage", BuildVariant::Coverage),
            (self.sanitize, "sanitize", BuildVariant::Sanitize),
        ]
        .into_iter()
        .filter_map(|(on, name, variant)| on.then_some((name, variant)))
        .collect();

        match enabled.as_slice() {
            [] => Ok(BuildVariant::Plain),
            [(_, variant)] => Ok(*variant),
            many => Err(VariantConflictError::new(many.iter().map(|(name, _)| *name))),
        }
    }
}

/// An immutable snapshot of the configuration a recipe is evaluated
/// against.
///
/// Constructing one validates the variant switches, so downstream
/// consumers (layout resolution, deployment) never see a conflicting
/// set and can stay infallible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    os: TargetOs,
    arch: String,
    compiler: CompilerFamily,
    variant: BuildVariant,
    build_type: BuildType,
    cppstd: Option<CppStandard>,
}

impl BuildConfig {
    /// Create a configuration, reducing `flags` to a single variant.
    pub fn new(
        os: TargetOs,
        compiler: CompilerFamily,
        flags: VariantFlags,
    ) -> Result<Self, VariantConflictError> {
        Ok(BuildConfig {
            os,
            arch: std::env::consts::ARCH.to_string(),
            compiler,
            variant: flags.resolve()?,
            build_type: BuildType::default(),
            cppstd: None,
        })
    }

    /// Set the target architecture string.
    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    /// Set the build type hint.
    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Set the configured C++ standard.
    pub fn with_cppstd(mut self, cppstd: Option<CppStandard>) -> Self {
        self.cppstd = cppstd;
        self
    }

    pub fn os(&self) -> TargetOs {
        self.os
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    pub fn compiler(&self) -> CompilerFamily {
        self.compiler
    }

    pub fn variant(&self) -> BuildVariant {
        self.variant
    }

    pub fn build_type(&self) -> BuildType {
        self.build_type
    }

    pub fn cppstd(&self) -> Option<CppStandard> {
        self.cppstd
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {} ({} variant, {})",
            self.os, self.arch, self.compiler, self.variant, self.build_type
        )?;
        if let Some(std) = self.cppstd {
            write!(f, " {std}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_resolve_to_plain() {
        let flags = VariantFlags::default();
        assert_eq!(flags.resolve().unwrap(), BuildVariant::Plain);
    }

    #[test]
    fn test_single_flag_resolves() {
        let flags = VariantFlags {
            coverage: true,
            ..Default::default()
        };
        assert_eq!(flags.resolve().unwrap(), BuildVariant::Coverage);
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        let flags = VariantFlags {
            dev: true,
            sanitize: true,
            ..Default::default()
        };
        let err = flags.resolve().unwrap_err();
        assert_eq!(err.enabled, vec!["dev", "sanitize"]);
    }

    #[test]
    fn test_config_construction_checks_variants() {
        let flags = VariantFlags {
            dev: true,
            coverage: true,
            sanitize: true,
        };
        let err = BuildConfig::new(TargetOs::Linux, CompilerFamily::Gcc, flags).unwrap_err();
        assert_eq!(err.enabled.len(), 3);
    }

    #[test]
    fn test_only_msvc_is_multi_config() {
        assert!(CompilerFamily::Msvc.is_multi_config());
        assert!(!CompilerFamily::Gcc.is_multi_config());
        assert!(!CompilerFamily::Clang.is_multi_config());
        assert!(!CompilerFamily::AppleClang.is_multi_config());
        assert!(!CompilerFamily::Other.is_multi_config());
    }

    #[test]
    fn test_unknown_compiler_parses_as_other() {
        let family: CompilerFamily = "icc".parse().unwrap();
        assert_eq!(family, CompilerFamily::Other);
        assert!(!family.is_multi_config());
    }

    #[test]
    fn test_os_aliases() {
        assert_eq!("darwin".parse::<TargetOs>().unwrap(), TargetOs::Macos);
        assert_eq!("win".parse::<TargetOs>().unwrap(), TargetOs::Windows);
        assert!("beos".parse::<TargetOs>().is_err());
    }

    #[test]
    fn test_cppstd_ordering() {
        assert!(CppStandard::Cpp17 < CppStandard::Cpp20);
        assert!(CppStandard::Cpp23 > CppStandard::Cpp11);
    }

    #[test]
    fn test_cppstd_parses_short_and_long_forms() {
        assert_eq!("20".parse::<CppStandard>().unwrap(), CppStandard::Cpp20);
        assert_eq!("c++17".parse::<CppStandard>().unwrap(), CppStandard::Cpp17);
        assert!("98".parse::<CppStandard>().is_err());
    }

    #[test]
    fn test_build_type_accepts_cmake_spelling() {
        assert_eq!("Debug".parse::<BuildType>().unwrap(), BuildType::Debug);
        assert_eq!(
            "relwithdebinfo".parse::<BuildType>().unwrap(),
            BuildType::RelWithDebInfo
        );
    }

    #[test]
    fn test_variant_base_paths() {
        assert_eq!(BuildVariant::Plain.base_path(), "build");
        assert_eq!(BuildVariant::Dev.base_path(), "build/dev");
        assert_eq!(BuildVariant::Coverage.base_path(), "build/coverage");
        assert_eq!(BuildVariant::Sanitize.base_path(), "build/sanitize");
    }
}
