//! Profile support for stevedore.
//!
//! A profile captures a reusable set of build settings in TOML:
//!
//! ```toml
//! [settings]
//! os = "linux"
//! arch = "x86_64"
//! compiler = "gcc"
//! build_type = "Release"
//! cppstd = "20"
//!
//! [variants]
//! dev = true
//! ```
//!
//! Named profiles live in `<home>/profiles/<name>.toml`; a reference
//! that looks like a path is used as-is. Settings given on the command
//! line override profile values, and anything still unset falls back
//! to host detection.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::settings::{
    BuildConfig, BuildType, CompilerFamily, CppStandard, TargetOs, VariantFlags,
};
use crate::util::context::GlobalContext;
use crate::util::diagnostic::VariantConflictError;

/// A profile file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Build settings
    pub settings: SettingsSection,

    /// Variant switches
    pub variants: VariantFlags,
}

/// The `[settings]` section of a profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSection {
    pub os: Option<TargetOs>,
    pub arch: Option<String>,
    pub compiler: Option<CompilerFamily>,
    pub build_type: Option<BuildType>,
    pub cppstd: Option<CppStandard>,
}

impl Profile {
    /// Load a profile from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse profile: {}", path.display()))
    }
}

/// Resolve a profile reference to a file path.
///
/// References containing a separator or a `.toml` suffix are treated
/// as paths (relative ones resolve against the working directory).
/// Anything else names a profile under the profiles directory.
pub fn profile_path(ctx: &GlobalContext, reference: &str) -> PathBuf {
    if reference.ends_with(".toml") || reference.contains(['/', '\\']) {
        ctx.cwd().join(reference)
    } else {
        ctx.profiles_dir().join(format!("{reference}.toml"))
    }
}

/// Settings overrides collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub os: Option<TargetOs>,
    pub arch: Option<String>,
    pub compiler: Option<CompilerFamily>,
    pub build_type: Option<BuildType>,
    pub cppstd: Option<CppStandard>,
    pub variants: VariantFlags,
}

/// Layer overrides, profile, and host defaults into a configuration.
///
/// Precedence per axis: command line, then profile, then detection.
/// Variant switches are taken wholesale from the command line when any
/// is set there, otherwise wholesale from the profile; mixing switches
/// from the two sources would manufacture conflicts neither declared.
pub fn resolve_build_config(
    overrides: &ConfigOverrides,
    profile: Option<&Profile>,
) -> Result<BuildConfig, VariantConflictError> {
    let settings = profile.map(|p| &p.settings);

    let os = overrides
        .os
        .or(settings.and_then(|s| s.os))
        .unwrap_or_else(TargetOs::host);

    let compiler = overrides
        .compiler
        .or(settings.and_then(|s| s.compiler))
        .unwrap_or_else(|| CompilerFamily::detect(os));

    let flags = if overrides.variants.any_set() {
        overrides.variants
    } else {
        profile.map(|p| p.variants).unwrap_or_default()
    };

    let mut config = BuildConfig::new(os, compiler, flags)?;

    if let Some(arch) = overrides
        .arch
        .clone()
        .or_else(|| settings.and_then(|s| s.arch.clone()))
    {
        config = config.with_arch(arch);
    }
    if let Some(build_type) = overrides.build_type.or(settings.and_then(|s| s.build_type)) {
        config = config.with_build_type(build_type);
    }

    Ok(config.with_cppstd(overrides.cppstd.or(settings.and_then(|s| s.cppstd))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::BuildVariant;
    use tempfile::TempDir;

    fn profile_from(content: &str) -> Profile {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn test_profile_parses() {
        let profile = profile_from(
            r#"
[settings]
os = "windows"
compiler = "msvc"
cppstd = "20"
build_type = "Debug"

[variants]
coverage = true
"#,
        );

        assert_eq!(profile.settings.os, Some(TargetOs::Windows));
        assert_eq!(profile.settings.compiler, Some(CompilerFamily::Msvc));
        assert_eq!(profile.settings.cppstd, Some(CppStandard::Cpp20));
        assert!(profile.variants.coverage);
    }

    #[test]
    fn test_overrides_beat_profile() {
        let profile = profile_from(
            r#"
[settings]
os = "windows"
compiler = "msvc"
"#,
        );
        let overrides = ConfigOverrides {
            os: Some(TargetOs::Linux),
            compiler: Some(CompilerFamily::Clang),
            ..Default::default()
        };

        let config = resolve_build_config(&overrides, Some(&profile)).unwrap();
        assert_eq!(config.os(), TargetOs::Linux);
        assert_eq!(config.compiler(), CompilerFamily::Clang);
    }

    #[test]
    fn test_profile_fills_unset_axes() {
        let profile = profile_from(
            r#"
[settings]
os = "macos"
compiler = "apple-clang"
arch = "armv8"
cppstd = "17"
"#,
        );

        let config = resolve_build_config(&ConfigOverrides::default(), Some(&profile)).unwrap();
        assert_eq!(config.os(), TargetOs::Macos);
        assert_eq!(config.compiler(), CompilerFamily::AppleClang);
        assert_eq!(config.arch(), "armv8");
        assert_eq!(config.cppstd(), Some(CppStandard::Cpp17));
        assert_eq!(config.build_type(), BuildType::Release);
    }

    #[test]
    fn test_profile_variants_apply_when_cli_sets_none() {
        let profile = profile_from("[variants]\ndev = true\n");
        let overrides = ConfigOverrides {
            os: Some(TargetOs::Linux),
            compiler: Some(CompilerFamily::Gcc),
            ..Default::default()
        };

        let config = resolve_build_config(&overrides, Some(&profile)).unwrap();
        assert_eq!(config.variant(), BuildVariant::Dev);
    }

    #[test]
    fn test_cli_variants_replace_profile_variants() {
        let profile = profile_from("[variants]\ncoverage = true\n");
        let overrides = ConfigOverrides {
            os: Some(TargetOs::Linux),
            compiler: Some(CompilerFamily::Gcc),
            variants: VariantFlags {
                dev: true,
                ..Default::default()
            },
            ..Default::default()
        };

        // No conflict: the CLI's switches replace the profile's.
        let config = resolve_build_config(&overrides, Some(&profile)).unwrap();
        assert_eq!(config.variant(), BuildVariant::Dev);
    }

    #[test]
    fn test_conflicting_profile_variants_rejected() {
        let profile = profile_from("[variants]\ndev = true\nsanitize = true\n");
        let overrides = ConfigOverrides {
            os: Some(TargetOs::Linux),
            compiler: Some(CompilerFamily::Gcc),
            ..Default::default()
        };

        let err = resolve_build_config(&overrides, Some(&profile)).unwrap_err();
        assert_eq!(err.enabled, vec!["dev", "sanitize"]);
    }

    #[test]
    fn test_profile_path_resolution() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();

        assert_eq!(
            profile_path(&ctx, "ci-msvc"),
            ctx.profiles_dir().join("ci-msvc.toml")
        );
        assert_eq!(
            profile_path(&ctx, "configs/local.toml"),
            tmp.path().join("configs/local.toml")
        );
    }

    #[test]
    fn test_profile_load_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.toml");
        std::fs::write(&path, "[settings\n").unwrap();

        let err = Profile::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse profile"));
    }
}
