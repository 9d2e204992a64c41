//! `stevedore deploy` command

use anyhow::Result;

use crate::cli::DeployArgs;
use stevedore::core::layout::OutputDirPair;
use stevedore::ops::{deploy_artifacts, DeployOptions};
use stevedore::resolve_output_dirs;
use stevedore::util::GlobalContext;

pub fn execute(args: DeployArgs, color: bool) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_color(color);
    let root = ctx.find_workspace_root()?;

    let config = super::build_config(&ctx, &args.config)?;
    let deps = super::load_dependency_set(&root, args.deps.as_deref())?;

    let pairs: Vec<OutputDirPair> = resolve_output_dirs(&config)
        .iter()
        .map(|pair| pair.rooted_at(&root))
        .collect();

    let opts = DeployOptions::new(config.os()).with_dry_run(args.dry_run);
    let report = deploy_artifacts(&deps, &pairs, &opts)?;

    if args.emit_report {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    eprintln!(
        "      Staged {} artifact(s) into {} output pair(s)",
        report.copied_count(),
        pairs.len()
    );
    super::emit_skip_warnings(&report, ctx.color());

    Ok(())
}
