//! `stevedore validate` command

use anyhow::Result;

use crate::cli::ValidateArgs;
use stevedore::ops::check_min_cppstd;
use stevedore::util::GlobalContext;
use stevedore::Recipe;

pub fn execute(args: ValidateArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.find_manifest()?;

    let recipe = Recipe::load(&manifest_path)?;
    let config = super::build_config(&ctx, &args.config)?;

    match recipe.min_cppstd() {
        Some(required) => {
            check_min_cppstd(&recipe, &config)?;
            eprintln!("   Validated configuration satisfies the recipe minimum {required}");
        }
        None => {
            // An explicit note, so a quiet pass is not mistaken for a
            // real check.
            eprintln!("   Validated (recipe declares no minimum C++ standard)");
        }
    }

    Ok(())
}
