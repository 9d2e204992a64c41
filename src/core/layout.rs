//! Output directory layout.
//!
//! The layout is a pure function of the build configuration: a variant
//! selects the base of the output tree, and the compiler family
//! decides whether that base is split into per-configuration
//! subdirectories. Every build directory has a `test/` sibling tree so
//! test executables always sit next to the same staged libraries the
//! product binaries see.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::settings::{BuildConfig, BuildType, BuildVariant};

/// Name of the test subtree inside a variant's output tree.
pub const TEST_SUBDIR: &str = "test";

/// Configuration subdirectories emitted by multi-config build systems.
///
/// Always `Debug` and `Release`, regardless of the configured build
/// type: multi-config generators lay out both trees up front and pick
/// one at build time.
pub const MULTI_CONFIG_DIRS: [BuildType; 2] = [BuildType::Debug, BuildType::Release];

/// A build directory and its test sibling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDirPair {
    /// Where freshly built binaries land.
    pub build_dir: PathBuf,
    /// Where test executables land.
    pub test_dir: PathBuf,
}

impl OutputDirPair {
    /// Re-base both directories onto `root`.
    pub fn rooted_at(&self, root: &Path) -> OutputDirPair {
        OutputDirPair {
            build_dir: root.join(&self.build_dir),
            test_dir: root.join(&self.test_dir),
        }
    }
}

/// Resolve the ordered output directory pairs for a configuration.
///
/// Paths are relative to the workspace root; use
/// [`OutputDirPair::rooted_at`] to anchor them.
///
/// Single-configuration toolchains get exactly one pair. MSVC-style
/// toolchains building the plain variant get one pair per entry in
/// [`MULTI_CONFIG_DIRS`], `Debug` first. The instrumented variants are
/// always single-configuration, even under MSVC.
pub fn resolve_output_dirs(config: &BuildConfig) -> Vec<OutputDirPair> {
    let base = Path::new(config.variant().base_path());

    if config.compiler().is_multi_config() && config.variant() == BuildVariant::Plain {
        MULTI_CONFIG_DIRS
            .iter()
            .map(|cfg| OutputDirPair {
                build_dir: base.join(cfg.dir_name()),
                test_dir: base.join(TEST_SUBDIR).join(cfg.dir_name()),
            })
            .collect()
    } else {
        vec![OutputDirPair {
            build_dir: base.to_path_buf(),
            test_dir: base.join(TEST_SUBDIR),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::{CompilerFamily, TargetOs, VariantFlags};

    fn config(compiler: CompilerFamily, flags: VariantFlags) -> BuildConfig {
        BuildConfig::new(TargetOs::Linux, compiler, flags).unwrap()
    }

    #[test]
    fn test_plain_single_config_layout() {
        let pairs = resolve_output_dirs(&config(CompilerFamily::Gcc, VariantFlags::default()));
        assert_eq!(
            pairs,
            vec![OutputDirPair {
                build_dir: PathBuf::from("build"),
                test_dir: PathBuf::from("build/test"),
            }]
        );
    }

    #[test]
    fn test_dev_variant_layout() {
        let flags = VariantFlags {
            dev: true,
            ..Default::default()
        };
        let pairs = resolve_output_dirs(&config(CompilerFamily::Gcc, flags));
        assert_eq!(
            pairs,
            vec![OutputDirPair {
                build_dir: PathBuf::from("build/dev"),
                test_dir: PathBuf::from("build/dev/test"),
            }]
        );
    }

    #[test]
    fn test_coverage_and_sanitize_layouts() {
        let coverage = VariantFlags {
            coverage: true,
            ..Default::default()
        };
        let pairs = resolve_output_dirs(&config(CompilerFamily::Clang, coverage));
        assert_eq!(pairs[0].build_dir, PathBuf::from("build/coverage"));
        assert_eq!(pairs[0].test_dir, PathBuf::from("build/coverage/test"));

        let sanitize = VariantFlags {
            sanitize: true,
            ..Default::default()
        };
        let pairs = resolve_output_dirs(&config(CompilerFamily::Clang, sanitize));
        assert_eq!(pairs[0].build_dir, PathBuf::from("build/sanitize"));
        assert_eq!(pairs[0].test_dir, PathBuf::from("build/sanitize/test"));
    }

    #[test]
    fn test_msvc_plain_splits_per_configuration() {
        let pairs = resolve_output_dirs(&config(CompilerFamily::Msvc, VariantFlags::default()));
        assert_eq!(
            pairs,
            vec![
                OutputDirPair {
                    build_dir: PathBuf::from("build/Debug"),
                    test_dir: PathBuf::from("build/test/Debug"),
                },
                OutputDirPair {
                    build_dir: PathBuf::from("build/Release"),
                    test_dir: PathBuf::from("build/test/Release"),
                },
            ]
        );
    }

    #[test]
    fn test_msvc_variant_stays_single_config() {
        let flags = VariantFlags {
            dev: true,
            ..Default::default()
        };
        let pairs = resolve_output_dirs(&config(CompilerFamily::Msvc, flags));
        assert_eq!(
            pairs,
            vec![OutputDirPair {
                build_dir: PathBuf::from("build/dev"),
                test_dir: PathBuf::from("build/dev/test"),
            }]
        );
    }

    #[test]
    fn test_unrecognized_family_uses_single_config_layout() {
        let pairs = resolve_output_dirs(&config(CompilerFamily::Other, VariantFlags::default()));
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].build_dir, PathBuf::from("build"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let cfg = config(CompilerFamily::Msvc, VariantFlags::default());
        assert_eq!(resolve_output_dirs(&cfg), resolve_output_dirs(&cfg));
    }

    #[test]
    fn test_rooted_at_prefixes_both_dirs() {
        let pair = OutputDirPair {
            build_dir: PathBuf::from("build/dev"),
            test_dir: PathBuf::from("build/dev/test"),
        };
        let rooted = pair.rooted_at(Path::new("/work/engine"));
        assert_eq!(rooted.build_dir, PathBuf::from("/work/engine/build/dev"));
        assert_eq!(rooted.test_dir, PathBuf::from("/work/engine/build/dev/test"));
    }
}
