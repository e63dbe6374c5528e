//! Error types for configuration loading and validation.

use std::path::Path;

use thiserror::Error;

/// Errors raised at the load boundary.
///
/// Structurally invalid catalogs, requirement specs, and record snapshots
/// are rejected here; the evaluation engine assumes validated input and
/// never fails. Recoverable anomalies (dangling course ids, unknown
/// categories) are not errors at all and surface, if anywhere, as warnings
/// in the credit summary.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file itself failed.
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// The file is not the expected JSON shape.
    #[error("Malformed JSON in {path}: {message}")]
    Parse { path: String, message: String },

    /// Two catalog entries share one course id.
    #[error("Duplicate course id in catalog: {id}")]
    DuplicateCourseId { id: String },

    /// A course carries zero credits.
    #[error("Course {id} has non-positive credits")]
    NonPositiveCredits { id: String },

    /// A requirement entry carries both its own thresholds and subcategories.
    #[error("Requirement entry '{category}' mixes direct thresholds with subcategories")]
    MixedCategory { category: String },

    /// A requirement leaf has neither minCredits nor requiredCredits.
    #[error("Requirement entry '{category}' carries no credit threshold")]
    MissingThreshold { category: String },

    /// The overall graduation threshold is zero.
    #[error("Total required credits must be positive")]
    NonPositiveTotal,
}

impl ConfigError {
    pub(crate) fn io(path: &Path, err: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(path: &Path, err: serde_json::Error) -> Self {
        ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Returns true if the error is a semantic validation failure rather
    /// than an I/O or JSON-shape problem.
    pub fn is_validation(&self) -> bool {
        !matches!(self, ConfigError::Io { .. } | ConfigError::Parse { .. })
    }
}
