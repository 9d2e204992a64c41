//! Implementation of `stevedore init`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::recipe::{starter_manifest, MANIFEST_NAME};

/// Write a starter recipe into an existing directory.
///
/// Refuses to clobber a recipe that is already there; `init` never
/// creates the directory itself.
pub fn init_recipe(path: &Path, name: &str) -> Result<PathBuf> {
    let manifest_path = path.join(MANIFEST_NAME);
    if manifest_path.exists() {
        bail!("`{}` already exists in `{}`", MANIFEST_NAME, path.display());
    }

    std::fs::write(&manifest_path, starter_manifest(name))
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;

    Ok(manifest_path)
}
