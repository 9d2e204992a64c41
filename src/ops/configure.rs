//! Implementation of `stevedore configure`.
//!
//! Configure is the one-shot entry point: validate the recipe against
//! the configuration, resolve the output layout, and stage dependency
//! artifacts into it. Validation runs before anything touches the
//! filesystem, so a rejected configuration leaves the workspace
//! untouched.

use std::path::Path;

use anyhow::Result;

use crate::core::dependency::DependencySet;
use crate::core::layout::{resolve_output_dirs, OutputDirPair};
use crate::core::recipe::Recipe;
use crate::core::settings::BuildConfig;
use crate::ops::deploy::{deploy_artifacts, DeployOptions, DeployReport};
use crate::ops::validate::check_min_cppstd;

/// Options for the configure command.
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    /// Plan without touching the filesystem
    pub dry_run: bool,
}

/// Outcome of a configure run.
#[derive(Debug, Clone)]
pub struct ConfigureSummary {
    /// Output pairs, rooted at the workspace
    pub pairs: Vec<OutputDirPair>,

    /// Deployment outcome
    pub report: DeployReport,
}

/// Lay out the output tree for `config` and stage `deps` into it.
pub fn configure(
    root: &Path,
    recipe: &Recipe,
    config: &BuildConfig,
    deps: &DependencySet,
    opts: &ConfigureOptions,
) -> Result<ConfigureSummary> {
    tracing::debug!(
        "configuring {} from {}",
        recipe.name().unwrap_or("unnamed recipe"),
        recipe.path().display()
    );

    check_min_cppstd(recipe, config)?;
    warn_undescribed_requirements(recipe, deps);

    let pairs: Vec<OutputDirPair> = resolve_output_dirs(config)
        .iter()
        .map(|pair| pair.rooted_at(root))
        .collect();

    // Generators and options run in the build-system integration that
    // consumes this layout; here they are only recorded.
    if !recipe.generators().is_empty() {
        tracing::info!("generators: {}", recipe.generators().join(", "));
    }
    for (key, value) in recipe.options() {
        tracing::debug!("option {key} = {value}");
    }

    let deploy_opts = DeployOptions::new(config.os()).with_dry_run(opts.dry_run);
    let report = deploy_artifacts(deps, &pairs, &deploy_opts)?;

    Ok(ConfigureSummary { pairs, report })
}

/// Warn when a declared requirement has no descriptor entry: the
/// recipe and the resolution step have drifted, and deployment would
/// silently ignore the requirement otherwise.
fn warn_undescribed_requirements(recipe: &Recipe, deps: &DependencySet) {
    for name in recipe
        .requirements()
        .keys()
        .chain(recipe.test_requirements().keys())
    {
        if !deps.iter().any(|d| d.name() == name) {
            tracing::warn!("requirement `{name}` has no entry in the dependency descriptor");
        }
    }
}
