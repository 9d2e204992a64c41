//! Stevedore - build-configuration layout and artifact staging for C++
//! package recipes.
//!
//! This crate provides the core library functionality for Stevedore:
//! resolving a build configuration into its output-directory layout,
//! and staging dependency shared libraries into those directories so
//! linked binaries and test executables run in place.

pub mod core;
pub mod ops;
pub mod util;

pub use core::{
    dependency::DependencySet, layout::resolve_output_dirs, recipe::Recipe,
    settings::BuildConfig,
};

pub use util::context::GlobalContext;
