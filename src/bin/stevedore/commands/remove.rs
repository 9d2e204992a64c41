//! `stevedore remove` command

use anyhow::Result;

use crate::cli::RemoveArgs;
use stevedore::ops::remove_requirement;
use stevedore::util::GlobalContext;

pub fn execute(args: RemoveArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.find_manifest()?;

    remove_requirement(&manifest_path, &args.name)?;
    eprintln!("     Removed {} from Stevedore.toml", args.name);

    Ok(())
}
