//! Global context for stevedore operations.
//!
//! Provides centralized access to paths and environment: the current
//! workspace, the per-user stevedore home, and the project-local
//! `.stevedore/` directory the resolution step writes into.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};

use crate::core::recipe;
use crate::util::diagnostic::suggestions;

/// Project directories for stevedore
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "stevedore", "stevedore"));

/// Global context containing paths and environment.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global stevedore data (profiles live here)
    home: PathBuf,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = if let Some(dirs) = PROJECT_DIRS.as_ref() {
            dirs.config_dir().to_path_buf()
        } else {
            // Fallback to ~/.stevedore
            BaseDirs::new()
                .map(|b| b.home_dir().join(".stevedore"))
                .unwrap_or_else(|| PathBuf::from(".stevedore"))
        };

        Ok(GlobalContext {
            cwd,
            home,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the stevedore home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Directory holding named profiles (`<home>/profiles/<name>.toml`).
    pub fn profiles_dir(&self) -> PathBuf {
        self.home.join("profiles")
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find the recipe file starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf> {
        recipe::find_manifest(&self.cwd).ok_or_else(|| {
            anyhow::anyhow!(
                "no {} found in `{}` or any parent directory\n{}",
                recipe::MANIFEST_NAME,
                self.cwd.display(),
                suggestions::NO_MANIFEST
            )
        })
    }

    /// Find the workspace root (directory containing Stevedore.toml).
    pub fn find_workspace_root(&self) -> Result<PathBuf> {
        self.find_manifest()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
    }

    /// Project-local stevedore directory for a workspace root.
    pub fn project_dir(root: &Path) -> PathBuf {
        root.join(".stevedore")
    }

    /// Default dependency descriptor path for a workspace root.
    pub fn deps_descriptor_path(root: &Path) -> PathBuf {
        Self::project_dir(root).join("deps.json")
    }
}
