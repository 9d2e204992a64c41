//! Stevedore.toml recipe parsing and schema.
//!
//! The recipe declares what a project consumes: requirements, test
//! requirements, dependency options, the generators the build-system
//! integration should run, and validation constraints such as a
//! minimum C++ standard.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::settings::CppStandard;

/// Canonical recipe file name.
pub const MANIFEST_NAME: &str = "Stevedore.toml";

/// A dependency option value as written in the recipe.
///
/// `[options]` keys are `package:option` pairs; values keep whatever
/// scalar type the recipe used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{v}"),
            OptionValue::Int(v) => write!(f, "{v}"),
            OptionValue::String(v) => write!(f, "{v}"),
        }
    }
}

/// Raw `[recipe]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawRecipeSection {
    name: Option<String>,
    generators: Vec<String>,
}

/// Raw `[validate]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawValidateSection {
    min_cppstd: Option<CppStandard>,
}

/// Raw Stevedore.toml schema.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawRecipe {
    recipe: RawRecipeSection,
    requirements: BTreeMap<String, String>,
    test_requirements: BTreeMap<String, String>,
    options: BTreeMap<String, OptionValue>,
    validate: RawValidateSection,
}

/// A parsed and validated recipe.
#[derive(Debug, Clone)]
pub struct Recipe {
    /// Project name, if declared. Consumer recipes may omit it.
    name: Option<String>,
    generators: Vec<String>,
    requirements: BTreeMap<String, String>,
    test_requirements: BTreeMap<String, String>,
    options: BTreeMap<String, OptionValue>,
    min_cppstd: Option<CppStandard>,
    path: PathBuf,
}

impl Recipe {
    /// Load a recipe from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read recipe: {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse recipe content.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawRecipe = toml::from_str(content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        for (table, entries) in [
            ("requirements", &raw.requirements),
            ("test_requirements", &raw.test_requirements),
        ] {
            for (name, version) in entries {
                if name.is_empty() {
                    anyhow::bail!("[{table}] contains an entry with an empty name");
                }
                if version.is_empty() {
                    anyhow::bail!("[{table}] entry `{name}` has an empty version");
                }
            }
        }

        Ok(Recipe {
            name: raw.recipe.name,
            generators: raw.recipe.generators,
            requirements: raw.requirements,
            test_requirements: raw.test_requirements,
            options: raw.options,
            min_cppstd: raw.validate.min_cppstd,
            path: path.to_path_buf(),
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Generators the build-system integration should run after
    /// stevedore has laid out the output tree.
    pub fn generators(&self) -> &[String] {
        &self.generators
    }

    pub fn requirements(&self) -> &BTreeMap<String, String> {
        &self.requirements
    }

    pub fn test_requirements(&self) -> &BTreeMap<String, String> {
        &self.test_requirements
    }

    pub fn options(&self) -> &BTreeMap<String, OptionValue> {
        &self.options
    }

    /// Minimum C++ standard the recipe demands, if any.
    pub fn min_cppstd(&self) -> Option<CppStandard> {
        self.min_cppstd
    }

    /// Path this recipe was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Search upward from `start` for a recipe file.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Generate a starter Stevedore.toml.
pub fn starter_manifest(name: &str) -> String {
    format!(
        r#"[recipe]
name = "{name}"
generators = ["cmake-toolchain", "cmake-deps", "run-env"]

# Requirements are `name = "version"` pairs, for example:
#   fmt = "9.1.0"
[requirements]

[test_requirements]

# Dependency options use `"package:option"` keys:
#   "tracy:shared" = true
[options]

[validate]
# min_cppstd = "17"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ENGINE_RECIPE: &str = r#"
[recipe]
name = "jengine"
generators = ["cmake-toolchain", "cmake-deps", "run-env"]

[requirements]
fmt = "9.1.0"
nanosvg = "cci.20210904"
tracy = "cci.20220130"

[test_requirements]
catch2 = "3.1.0"

[options]
"tracy:shared" = true
"tracy:callstack" = 16

[validate]
min_cppstd = "20"
"#;

    #[test]
    fn test_parse_full_recipe() {
        let recipe = Recipe::parse(ENGINE_RECIPE, Path::new("Stevedore.toml")).unwrap();

        assert_eq!(recipe.name(), Some("jengine"));
        assert_eq!(recipe.generators().len(), 3);
        assert_eq!(recipe.requirements().len(), 3);
        assert_eq!(
            recipe.requirements().get("fmt").map(String::as_str),
            Some("9.1.0")
        );
        assert_eq!(recipe.test_requirements().len(), 1);
        assert_eq!(
            recipe.options().get("tracy:shared"),
            Some(&OptionValue::Bool(true))
        );
        assert_eq!(
            recipe.options().get("tracy:callstack"),
            Some(&OptionValue::Int(16))
        );
        assert_eq!(recipe.min_cppstd(), Some(CppStandard::Cpp20));
    }

    #[test]
    fn test_option_value_display_keeps_scalar_form() {
        assert_eq!(OptionValue::Bool(true).to_string(), "true");
        assert_eq!(OptionValue::Int(16).to_string(), "16");
        assert_eq!(OptionValue::String("x86_64".to_string()).to_string(), "x86_64");
    }

    #[test]
    fn test_parse_minimal_recipe() {
        let recipe = Recipe::parse("", Path::new("Stevedore.toml")).unwrap();

        assert_eq!(recipe.name(), None);
        assert!(recipe.requirements().is_empty());
        assert_eq!(recipe.min_cppstd(), None);
    }

    #[test]
    fn test_parse_rejects_empty_version() {
        let content = r#"
[requirements]
fmt = ""
"#;
        let err = Recipe::parse(content, Path::new("Stevedore.toml")).unwrap_err();
        assert!(err.to_string().contains("empty version"));
    }

    #[test]
    fn test_find_manifest_walks_upward() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("src").join("render");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join(MANIFEST_NAME), "[recipe]\n").unwrap();

        let found = find_manifest(&nested).unwrap();
        assert_eq!(found, tmp.path().join(MANIFEST_NAME));
        assert!(find_manifest(Path::new("/nonexistent-root-xyz")).is_none());
    }

    #[test]
    fn test_starter_manifest_parses() {
        let recipe =
            Recipe::parse(&starter_manifest("jengine"), Path::new("Stevedore.toml")).unwrap();
        assert_eq!(recipe.name(), Some("jengine"));
        assert!(recipe.requirements().is_empty());
        // The starter leaves the minimum standard commented out.
        assert_eq!(recipe.min_cppstd(), None);
    }
}
