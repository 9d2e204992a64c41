//! User-friendly diagnostic messages.
//!
//! Every error surfaced to the user should carry the root cause, the
//! conflicting inputs, and a suggested fix.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::settings::CppStandard;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no recipe file is found.
    pub const NO_MANIFEST: &str = "help: Run `stevedore init` to create a recipe";

    /// Suggestion when the dependency descriptor is missing.
    pub const NO_DESCRIPTOR: &str =
        "help: Run your dependency resolution step to produce it, or pass `--deps <path>`";

    /// Suggestion when a dependency reports no usable artifact directories.
    pub const MISSING_ARTIFACTS: &str =
        "help: Re-run dependency resolution so the descriptor lists real artifact directories";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Help => write!(f, "help"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        // Severity prefix with optional color
        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m",
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
                Severity::Note => "\x1b[1;36mnote\x1b[0m",
                Severity::Help => "\x1b[1;32mhelp\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Note => "note",
                Severity::Help => "help",
            }
        };

        // Main message
        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        // Location if present
        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        // Context lines
        for ctx in &self.context {
            output.push_str(&format!("  - {}\n", ctx));
        }

        // Suggestions
        if !self.suggestions.is_empty() {
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            for suggestion in &self.suggestions {
                output.push_str(&format!(
                    "{}: {}\n",
                    help_prefix,
                    suggestion.trim_start_matches("help: ")
                ));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// More than one mutually exclusive variant switch was enabled.
#[derive(Debug, Clone, Error, MietteDiagnostic)]
#[error("conflicting build variants: {}", .enabled.join(", "))]
#[diagnostic(
    code(stevedore::settings::variant_conflict),
    help("Enable at most one of `dev`, `coverage`, `sanitize`")
)]
pub struct VariantConflictError {
    pub enabled: Vec<String>,
}

impl VariantConflictError {
    pub fn new(enabled: impl IntoIterator<Item = impl Into<String>>) -> Self {
        VariantConflictError {
            enabled: enabled.into_iter().map(Into::into).collect(),
        }
    }
}

/// The configured C++ standard does not satisfy the recipe's minimum.
#[derive(Debug, Clone, Error, MietteDiagnostic)]
#[error(
    "recipe requires at least {required}, but the configuration provides {}",
    configured_label(.configured)
)]
#[diagnostic(
    code(stevedore::validate::standard_too_old),
    help("Raise `cppstd` in the profile, or pass a newer `--cppstd`")
)]
pub struct StandardTooOldError {
    pub required: CppStandard,
    pub configured: Option<CppStandard>,
}

fn configured_label(configured: &Option<CppStandard>) -> String {
    match configured {
        Some(std) => std.to_string(),
        None => "no C++ standard".to_string(),
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
