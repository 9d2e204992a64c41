//! Dependency artifact descriptors.
//!
//! The upstream resolution step records, for every requirement, where
//! its packaged binaries live on disk. Stevedore consumes that record
//! (by default `.stevedore/deps.json`) and never resolves versions or
//! fetches packages itself.

use std::path::{Path, PathBuf};
use std::slice;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util;

/// Which of a dependency's directory lists a deploy rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactDirKind {
    /// `bin_dirs`: runtime DLLs on Windows.
    Bin,
    /// `lib_dirs`: shared objects and dylibs elsewhere.
    Lib,
}

/// The artifact directories one resolved dependency provides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyArtifacts {
    /// Package name
    name: String,

    /// Directories holding runtime binaries (DLLs)
    bin_dirs: Vec<PathBuf>,

    /// Directories holding linkable/loadable libraries
    lib_dirs: Vec<PathBuf>,
}

impl DependencyArtifacts {
    /// Create a descriptor entry with no directories.
    pub fn new(name: impl Into<String>) -> Self {
        DependencyArtifacts {
            name: name.into(),
            bin_dirs: Vec::new(),
            lib_dirs: Vec::new(),
        }
    }

    /// Add a runtime binary directory.
    pub fn with_bin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bin_dirs.push(dir.into());
        self
    }

    /// Add a library directory.
    pub fn with_lib_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lib_dirs.push(dir.into());
        self
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the runtime binary directories.
    pub fn bin_dirs(&self) -> &[PathBuf] {
        &self.bin_dirs
    }

    /// Get the library directories.
    pub fn lib_dirs(&self) -> &[PathBuf] {
        &self.lib_dirs
    }

    /// Get the directory list a deploy rule selects.
    pub fn artifact_dirs(&self, kind: ArtifactDirKind) -> &[PathBuf] {
        match kind {
            ArtifactDirKind::Bin => &self.bin_dirs,
            ArtifactDirKind::Lib => &self.lib_dirs,
        }
    }
}

/// Every dependency the resolution step reported, in resolution order.
///
/// Order matters downstream: when two dependencies ship a file with the
/// same name, the later one wins the copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencySet {
    dependencies: Vec<DependencyArtifacts>,
}

impl DependencySet {
    pub fn new(dependencies: Vec<DependencyArtifacts>) -> Self {
        DependencySet { dependencies }
    }

    /// Load a descriptor from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = util::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse dependency descriptor: {}", path.display()))
    }

    pub fn iter(&self) -> slice::Iter<'_, DependencyArtifacts> {
        self.dependencies.iter()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a DependencyArtifacts;
    type IntoIter = slice::Iter<'a, DependencyArtifacts>;

    fn into_iter(self) -> Self::IntoIter {
        self.dependencies.iter()
    }
}
