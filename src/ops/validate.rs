//! Recipe validation against a configuration.
//!
//! Validation answers one question before any filesystem work starts:
//! can this configuration build this recipe at all?

use crate::core::recipe::Recipe;
use crate::core::settings::BuildConfig;
use crate::util::diagnostic::StandardTooOldError;

/// Check the configured C++ standard against the recipe's minimum.
///
/// A recipe with no declared minimum always passes. A configuration
/// with no standard cannot prove it satisfies a declared minimum, so
/// it fails the check rather than passing silently.
pub fn check_min_cppstd(recipe: &Recipe, config: &BuildConfig) -> Result<(), StandardTooOldError> {
    let required = match recipe.min_cppstd() {
        Some(required) => required,
        None => {
            tracing::debug!("recipe declares no minimum C++ standard");
            return Ok(());
        }
    };

    match config.cppstd() {
        Some(configured) if configured >= required => {
            tracing::debug!("configured {configured} satisfies recipe minimum {required}");
            Ok(())
        }
        configured => Err(StandardTooOldError {
            required,
            configured,
        }),
    }
}
