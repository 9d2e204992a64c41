//! `stevedore configure` command

use std::path::Path;

use anyhow::Result;

use crate::cli::ConfigureArgs;
use stevedore::ops::{configure, ConfigureOptions};
use stevedore::util::fs::relative_path;
use stevedore::util::GlobalContext;
use stevedore::Recipe;

pub fn execute(args: ConfigureArgs, color: bool) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_color(color);
    let manifest_path = ctx.find_manifest()?;
    let root = manifest_path
        .parent()
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let recipe = Recipe::load(&manifest_path)?;
    let config = super::build_config(&ctx, &args.config)?;
    let deps = super::load_dependency_set(&root, args.deps.as_deref())?;

    tracing::info!("configuring for {config}");

    let summary = configure(
        &root,
        &recipe,
        &config,
        &deps,
        &ConfigureOptions {
            dry_run: args.dry_run,
        },
    )?;

    for pair in &summary.pairs {
        eprintln!(
            "      Output {}  (tests: {})",
            relative_path(&root, &pair.build_dir).display(),
            relative_path(&root, &pair.test_dir).display()
        );
    }
    eprintln!(
        "      Staged {} artifact(s) from {} dependency(ies)",
        summary.report.copied_count(),
        deps.len() - summary.report.skipped.len()
    );
    super::emit_skip_warnings(&summary.report, ctx.color());

    Ok(())
}
