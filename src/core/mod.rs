//! Core data structures for Stevedore.
//!
//! This module contains the foundational types used throughout
//! stevedore:
//! - Build settings and validated configurations
//! - Output directory layout resolution
//! - Dependency artifact descriptors
//! - Recipe parsing

pub mod dependency;
pub mod layout;
pub mod recipe;
pub mod settings;

pub use dependency::{ArtifactDirKind, DependencyArtifacts, DependencySet};
pub use layout::{resolve_output_dirs, OutputDirPair};
pub use recipe::{find_manifest, Recipe, MANIFEST_NAME};
pub use settings::{
    BuildConfig, BuildType, BuildVariant, CompilerFamily, CppStandard, TargetOs, VariantFlags,
};
