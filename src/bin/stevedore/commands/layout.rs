//! `stevedore layout` command

use anyhow::Result;

use crate::cli::LayoutArgs;
use stevedore::resolve_output_dirs;
use stevedore::util::GlobalContext;

pub fn execute(args: LayoutArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = super::build_config(&ctx, &args.config)?;
    let pairs = resolve_output_dirs(&config);

    if args.emit_json {
        println!("{}", serde_json::to_string_pretty(&pairs)?);
        return Ok(());
    }

    eprintln!("Layout for {config}:");
    for pair in &pairs {
        println!(
            "{}  (tests: {})",
            pair.build_dir.display(),
            pair.test_dir.display()
        );
    }

    Ok(())
}
