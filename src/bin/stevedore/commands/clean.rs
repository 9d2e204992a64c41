//! `stevedore clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use stevedore::core::settings::BuildVariant;
use stevedore::util::fs::remove_dir_all_if_exists;
use stevedore::util::GlobalContext;

pub fn execute(args: CleanArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let root = ctx.find_workspace_root()?;

    // The plain base is `build`, which every variant nests under, so
    // `--all` wipes all of them at once.
    let target = if args.all {
        root.join(BuildVariant::Plain.base_path())
    } else {
        let config = super::build_config(&ctx, &args.config)?;
        root.join(config.variant().base_path())
    };

    remove_dir_all_if_exists(&target)?;
    eprintln!("     Removed {}", target.display());

    Ok(())
}
