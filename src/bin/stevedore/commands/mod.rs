//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::Result;

use stevedore::core::dependency::DependencySet;
use stevedore::core::settings::{BuildConfig, VariantFlags};
use stevedore::ops::DeployReport;
use stevedore::util::config::{profile_path, resolve_build_config, ConfigOverrides, Profile};
use stevedore::util::diagnostic::{emit, suggestions, Diagnostic};
use stevedore::util::GlobalContext;

use crate::cli::ConfigArgs;

pub mod add;
pub mod clean;
pub mod completions;
pub mod configure;
pub mod deploy;
pub mod init;
pub mod layout;
pub mod remove;
pub mod validate;

/// Layer CLI settings over an optional profile into a configuration.
pub fn build_config(ctx: &GlobalContext, args: &ConfigArgs) -> Result<BuildConfig> {
    let profile = match &args.profile {
        Some(reference) => Some(Profile::load(&profile_path(ctx, reference))?),
        None => None,
    };

    let overrides = ConfigOverrides {
        os: args.os,
        arch: args.arch.clone(),
        compiler: args.compiler,
        build_type: args.build_type,
        cppstd: args.cppstd,
        variants: VariantFlags {
            dev: args.dev,
            coverage: args.coverage,
            sanitize: args.sanitize,
        },
    };

    Ok(resolve_build_config(&overrides, profile.as_ref())?)
}

/// Load the dependency descriptor for a workspace.
///
/// A missing descriptor is a hard error rather than an implicit empty
/// set; a project with no dependencies writes a descriptor with an
/// empty list.
pub fn load_dependency_set(root: &Path, override_path: Option<&Path>) -> Result<DependencySet> {
    let path: PathBuf = match override_path {
        Some(path) => path.to_path_buf(),
        None => GlobalContext::deps_descriptor_path(root),
    };

    if !path.is_file() {
        anyhow::bail!(
            "dependency descriptor not found: {}\n{}",
            path.display(),
            suggestions::NO_DESCRIPTOR
        );
    }

    DependencySet::load(&path)
}

/// Render a deployment's skipped-dependency records as warnings.
pub fn emit_skip_warnings(report: &DeployReport, color: bool) {
    for skip in &report.skipped {
        let diag = Diagnostic::warning(format!("skipped `{}`: {}", skip.name, skip.reason))
            .with_suggestion(suggestions::MISSING_ARTIFACTS);
        emit(&diag, color);
    }
}
