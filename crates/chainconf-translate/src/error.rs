//! Error types for translation
//!
//! Every precondition violation surfaces synchronously; the translator
//! recovers nothing internally and is safe to re-invoke after the caller
//! fixes its input.

use chainconf_store::StoreError;

/// Errors raised by the translation passes and the pipeline
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Declared stage counts are inconsistent or non-positive
    #[error("invalid chain topology: {detail}")]
    InvalidTopology {
        /// What was wrong with the declared counts
        detail: String,
    },

    /// A required configuration argument was absent
    #[error("configuration for {role} is required")]
    MissingConfig {
        /// Which argument was missing (e.g. `"source vertex"`)
        role: &'static str,
    },

    /// A job parameter did not parse as its expected type
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TranslateError {
    /// Create an [`TranslateError::InvalidTopology`] with a detail message
    #[must_use]
    pub fn invalid_topology(detail: impl Into<String>) -> Self {
        Self::InvalidTopology {
            detail: detail.into(),
        }
    }
}
