//! `stevedore init` command

use anyhow::{Context, Result};

use crate::cli::InitArgs;
use stevedore::ops::init_recipe;

pub fn execute(args: InitArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;

    let name = args.name.unwrap_or_else(|| {
        cwd.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string()
    });

    let manifest_path = init_recipe(&cwd, &name)?;
    eprintln!("     Created {}", manifest_path.display());

    Ok(())
}
