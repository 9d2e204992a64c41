//! `stevedore add` command

use anyhow::Result;

use crate::cli::AddArgs;
use stevedore::ops::{add_requirement, AddOptions};
use stevedore::util::GlobalContext;

pub fn execute(args: AddArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.find_manifest()?;

    add_requirement(
        &manifest_path,
        &AddOptions {
            name: args.name.clone(),
            version: args.version.clone(),
            test: args.test,
        },
    )?;

    let table = if args.test {
        "test_requirements"
    } else {
        "requirements"
    };
    eprintln!("       Added {} = \"{}\" to [{}]", args.name, args.version, table);

    Ok(())
}
