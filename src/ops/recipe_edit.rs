//! Implementation of `stevedore add` and `stevedore remove`.
//!
//! Both commands edit Stevedore.toml in place through `toml_edit`, so
//! user formatting and comments survive the round trip.

use std::path::Path;

use anyhow::{bail, Context, Result};
use toml_edit::{value, DocumentMut, Item, Table};

use crate::util::fs;

/// Options for adding a requirement.
#[derive(Debug, Clone)]
pub struct AddOptions {
    /// Package name
    pub name: String,

    /// Version string recorded in the recipe
    pub version: String,

    /// Add to `[test_requirements]` instead of `[requirements]`
    pub test: bool,
}

fn table_name(test: bool) -> &'static str {
    if test {
        "test_requirements"
    } else {
        "requirements"
    }
}

/// Add a requirement declaration to Stevedore.toml.
///
/// An existing declaration for the same name is replaced.
pub fn add_requirement(manifest_path: &Path, opts: &AddOptions) -> Result<()> {
    let content = fs::read_to_string(manifest_path)?;
    let mut doc: DocumentMut = content
        .parse()
        .with_context(|| "failed to parse Stevedore.toml")?;

    let table = table_name(opts.test);
    if !doc.contains_key(table) {
        doc[table] = Item::Table(Table::new());
    }
    doc[table][opts.name.as_str()] = value(opts.version.as_str());

    fs::write_string(manifest_path, &doc.to_string())?;

    Ok(())
}

/// Remove a requirement from Stevedore.toml.
///
/// Both tables are searched, so removal works regardless of where the
/// requirement was declared.
pub fn remove_requirement(manifest_path: &Path, name: &str) -> Result<()> {
    let content = fs::read_to_string(manifest_path)?;
    let mut doc: DocumentMut = content
        .parse()
        .with_context(|| "failed to parse Stevedore.toml")?;

    let mut removed = false;
    for table in ["requirements", "test_requirements"] {
        if let Some(entries) = doc.get_mut(table).and_then(Item::as_table_mut) {
            removed |= entries.remove(name).is_some();
        }
    }

    if !removed {
        bail!("requirement `{}` not found in Stevedore.toml", name);
    }

    fs::write_string(manifest_path, &doc.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recipe::Recipe;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_recipe(dir: &Path) -> PathBuf {
        let manifest_path = dir.join("Stevedore.toml");
        std::fs::write(
            &manifest_path,
            r#"[recipe]
name = "jengine"

# Rendering and profiling stack.
[requirements]
fmt = "9.1.0"
"#,
        )
        .unwrap();
        manifest_path
    }

    #[test]
    fn test_add_requirement() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_recipe(tmp.path());

        add_requirement(
            &manifest_path,
            &AddOptions {
                name: "tracy".to_string(),
                version: "cci.20220130".to_string(),
                test: false,
            },
        )
        .unwrap();

        let recipe = Recipe::load(&manifest_path).unwrap();
        assert_eq!(
            recipe.requirements().get("tracy").map(String::as_str),
            Some("cci.20220130")
        );

        // Comments survive the edit.
        let written = std::fs::read_to_string(&manifest_path).unwrap();
        assert!(written.contains("# Rendering and profiling stack."));
    }

    #[test]
    fn test_add_test_requirement_creates_table() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_recipe(tmp.path());

        add_requirement(
            &manifest_path,
            &AddOptions {
                name: "catch2".to_string(),
                version: "3.1.0".to_string(),
                test: true,
            },
        )
        .unwrap();

        let recipe = Recipe::load(&manifest_path).unwrap();
        assert_eq!(
            recipe.test_requirements().get("catch2").map(String::as_str),
            Some("3.1.0")
        );
        assert!(!recipe.requirements().contains_key("catch2"));
    }

    #[test]
    fn test_add_replaces_existing_version() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_recipe(tmp.path());

        add_requirement(
            &manifest_path,
            &AddOptions {
                name: "fmt".to_string(),
                version: "10.0.0".to_string(),
                test: false,
            },
        )
        .unwrap();

        let recipe = Recipe::load(&manifest_path).unwrap();
        assert_eq!(recipe.requirements().len(), 1);
        assert_eq!(
            recipe.requirements().get("fmt").map(String::as_str),
            Some("10.0.0")
        );
    }

    #[test]
    fn test_remove_requirement() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_recipe(tmp.path());

        remove_requirement(&manifest_path, "fmt").unwrap();

        let recipe = Recipe::load(&manifest_path).unwrap();
        assert!(recipe.requirements().is_empty());
    }

    #[test]
    fn test_remove_searches_test_requirements() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_recipe(tmp.path());
        add_requirement(
            &manifest_path,
            &AddOptions {
                name: "catch2".to_string(),
                version: "3.1.0".to_string(),
                test: true,
            },
        )
        .unwrap();

        remove_requirement(&manifest_path, "catch2").unwrap();
        let recipe = Recipe::load(&manifest_path).unwrap();
        assert!(recipe.test_requirements().is_empty());
    }

    #[test]
    fn test_remove_missing_requirement_fails() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_recipe(tmp.path());

        let err = remove_requirement(&manifest_path, "openssl").unwrap_err();
        assert!(err.to_string().contains("`openssl` not found"));
    }
}
