//! Artifact deployment.
//!
//! After the resolution step has fetched packages, their shared
//! libraries have to end up next to the binaries that load them. This
//! op walks the dependency descriptor and copies every matching
//! artifact into each output directory pair, so product binaries and
//! test executables both run in place with no loader-path setup.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use glob::Pattern;
use serde::Serialize;

use crate::core::dependency::{ArtifactDirKind, DependencySet};
use crate::core::layout::OutputDirPair;
use crate::core::settings::TargetOs;
use crate::util;

/// What one target OS wants staged: which of a dependency's directory
/// lists to read, and which file names count as shared libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployRule {
    pub dir_kind: ArtifactDirKind,
    pub pattern: &'static str,
}

impl DeployRule {
    /// The deploy rule for a target OS.
    ///
    /// Windows loads DLLs from next to the executable and packages
    /// ship them in `bin/`. Unix-likes ship loadable libraries in
    /// `lib/`; the `*.so*` form also catches versioned sonames like
    /// `libfmt.so.9.1.0`.
    pub fn for_os(os: TargetOs) -> DeployRule {
        match os {
            TargetOs::Windows => DeployRule {
                dir_kind: ArtifactDirKind::Bin,
                pattern: "*.dll",
            },
            TargetOs::Linux => DeployRule {
                dir_kind: ArtifactDirKind::Lib,
                pattern: "*.so*",
            },
            TargetOs::Macos => DeployRule {
                dir_kind: ArtifactDirKind::Lib,
                pattern: "*.dylib",
            },
        }
    }
}

/// Options for artifact deployment.
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Target OS whose deploy rule applies
    pub os: TargetOs,

    /// Log the plan without touching the filesystem
    pub dry_run: bool,
}

impl DeployOptions {
    pub fn new(os: TargetOs) -> Self {
        DeployOptions { os, dry_run: false }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// One file staged into one destination directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopiedArtifact {
    /// Dependency that provided the file
    pub dependency: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Why a dependency contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The descriptor lists no directories of the kind the OS needs.
    NoArtifactDirs,
    /// None of the listed directories exists (or is readable).
    ArtifactDirsMissing,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoArtifactDirs => {
                write!(f, "descriptor lists no artifact directories")
            }
            SkipReason::ArtifactDirsMissing => {
                write!(f, "no listed artifact directory exists")
            }
        }
    }
}

/// A dependency that was recorded rather than copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDependency {
    pub name: String,
    pub reason: SkipReason,
}

/// Outcome of a deployment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeployReport {
    /// Files staged (or, under dry-run, that would be staged)
    pub copied: Vec<CopiedArtifact>,

    /// Dependencies that provided nothing, with reasons
    pub skipped: Vec<SkippedDependency>,
}

impl DeployReport {
    pub fn copied_count(&self) -> usize {
        self.copied.len()
    }
}

/// Stage dependency shared libraries into every output directory pair.
///
/// Dependencies are visited in descriptor order and each matching file
/// is copied into both the build and the test directory of every pair,
/// creating destination directories on demand. Copies overwrite, so
/// re-running converges and the last dependency to ship a file name
/// wins.
///
/// A dependency with no usable source directories is recorded in the
/// report and the run continues. Only destination failures abort;
/// files copied before the failure are left in place.
pub fn deploy_artifacts(
    deps: &DependencySet,
    pairs: &[OutputDirPair],
    opts: &DeployOptions,
) -> Result<DeployReport> {
    let rule = DeployRule::for_os(opts.os);
    let pattern = Pattern::new(rule.pattern)
        .with_context(|| format!("invalid artifact pattern `{}`", rule.pattern))?;

    let mut report = DeployReport::default();

    for dep in deps {
        let dirs = dep.artifact_dirs(rule.dir_kind);
        if dirs.is_empty() {
            tracing::debug!(
                "skipping `{}`: {}",
                dep.name(),
                SkipReason::NoArtifactDirs
            );
            report.skipped.push(SkippedDependency {
                name: dep.name().to_string(),
                reason: SkipReason::NoArtifactDirs,
            });
            continue;
        }

        // Collect matches from every directory that can be scanned. A
        // directory that exists but matches nothing still counts as
        // scanned; the descriptor told the truth, there was just
        // nothing to stage.
        let mut any_dir_scanned = false;
        let mut files = Vec::new();
        for dir in dirs {
            if !dir.is_dir() {
                tracing::debug!("artifact directory absent: {}", dir.display());
                continue;
            }
            match util::fs::matching_files(dir, &pattern) {
                Ok(mut found) => {
                    any_dir_scanned = true;
                    files.append(&mut found);
                }
                Err(e) => {
                    tracing::warn!("cannot read artifact directory {}: {}", dir.display(), e);
                }
            }
        }

        if !any_dir_scanned {
            tracing::debug!(
                "skipping `{}`: {}",
                dep.name(),
                SkipReason::ArtifactDirsMissing
            );
            report.skipped.push(SkippedDependency {
                name: dep.name().to_string(),
                reason: SkipReason::ArtifactDirsMissing,
            });
            continue;
        }

        for file in &files {
            let file_name = file
                .file_name()
                .with_context(|| format!("artifact has no file name: {}", file.display()))?;

            for pair in pairs {
                for dest_dir in [&pair.build_dir, &pair.test_dir] {
                    let destination = dest_dir.join(file_name);

                    if opts.dry_run {
                        tracing::info!(
                            "[dry-run] Would copy {} -> {}",
                            file.display(),
                            destination.display()
                        );
                    } else {
                        util::fs::ensure_dir(dest_dir)?;
                        util::fs::copy_file(file, &destination)?;
                        tracing::debug!(
                            "Copied {} -> {}",
                            file.display(),
                            destination.display()
                        );
                    }

                    report.copied.push(CopiedArtifact {
                        dependency: dep.name().to_string(),
                        source: file.clone(),
                        destination,
                    });
                }
            }
        }
    }

    Ok(report)
}
