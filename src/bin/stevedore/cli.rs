//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use stevedore::core::settings::{BuildType, CompilerFamily, CppStandard, TargetOs};

/// Stevedore - build-configuration layout and artifact staging for C++ projects
#[derive(Parser)]
#[command(name = "stevedore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter Stevedore.toml in the current directory
    Init(InitArgs),

    /// Validate, resolve the output layout, and stage dependency artifacts
    Configure(ConfigureArgs),

    /// Stage dependency shared libraries into the output tree
    Deploy(DeployArgs),

    /// Print the resolved output-directory layout
    Layout(LayoutArgs),

    /// Check the recipe against the configuration
    Validate(ValidateArgs),

    /// Add a requirement to Stevedore.toml
    Add(AddArgs),

    /// Remove a requirement from Stevedore.toml
    Remove(RemoveArgs),

    /// Remove the configured variant's output tree
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Build settings shared by every configuration-resolving command.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Settings profile: a name under the profiles directory, or a path
    /// to a TOML file
    #[arg(long)]
    pub profile: Option<String>,

    /// Target operating system (windows, linux, macos)
    #[arg(long)]
    pub os: Option<TargetOs>,

    /// Target architecture
    #[arg(long)]
    pub arch: Option<String>,

    /// Compiler family (msvc, gcc, clang, apple-clang)
    #[arg(long)]
    pub compiler: Option<CompilerFamily>,

    /// Build type hint (Debug, Release, RelWithDebInfo, MinSizeRel)
    #[arg(long)]
    pub build_type: Option<BuildType>,

    /// Configured C++ standard (11, 14, 17, 20, 23)
    #[arg(long)]
    pub cppstd: Option<CppStandard>,

    /// Developer build variant
    #[arg(long)]
    pub dev: bool,

    /// Coverage-instrumented build variant
    #[arg(long)]
    pub coverage: bool,

    /// Sanitizer-instrumented build variant
    #[arg(long)]
    pub sanitize: bool,
}

#[derive(Args)]
pub struct InitArgs {
    /// Project name (defaults to the directory name)
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct ConfigureArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Path to the dependency descriptor (defaults to .stevedore/deps.json)
    #[arg(long)]
    pub deps: Option<PathBuf>,

    /// Plan without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct DeployArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Path to the dependency descriptor (defaults to .stevedore/deps.json)
    #[arg(long)]
    pub deps: Option<PathBuf>,

    /// Plan without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Print the deployment report as JSON
    #[arg(long)]
    pub emit_report: bool,
}

#[derive(Args)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the layout as JSON
    #[arg(long)]
    pub emit_json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args)]
pub struct AddArgs {
    /// Package name
    pub name: String,

    /// Version string recorded in the recipe
    pub version: String,

    /// Add to [test_requirements] instead of [requirements]
    #[arg(long)]
    pub test: bool,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Package name
    pub name: String,
}

#[derive(Args)]
pub struct CleanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Remove every variant's output tree
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
