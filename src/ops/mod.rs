//! High-level operations.
//!
//! This module contains the implementation of Stevedore commands.

pub mod configure;
pub mod deploy;
pub mod init;
pub mod recipe_edit;
pub mod validate;

pub use configure::{configure, ConfigureOptions, ConfigureSummary};
pub use deploy::{
    deploy_artifacts, CopiedArtifact, DeployOptions, DeployReport, DeployRule, SkipReason,
    SkippedDependency,
};
pub use init::init_recipe;
pub use recipe_edit::{add_requirement, remove_requirement, AddOptions};
pub use validate::check_min_cppstd;
