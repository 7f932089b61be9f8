//! Error types for catalog loading
//!
//! A corrupt or inconsistent catalog is a fatal configuration-loading
//! problem. Nothing here is retried; the translator never sees a catalog
//! that failed to build.

/// Errors raised while building or loading a [`DeprecationCatalog`](crate::DeprecationCatalog)
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog JSON did not parse
    #[error("catalog data did not parse: {0}")]
    Parse(#[from] serde_json::Error),

    /// The same deprecated key appears in more than one rule
    #[error("deprecated key '{key}' appears in more than one rule")]
    DuplicateKey {
        /// The conflicting deprecated key
        key: String,
    },

    /// A rule references an empty key name
    #[error("rule for '{old_key}' references an empty key name")]
    EmptyKey {
        /// Deprecated key of the offending rule (may itself be empty)
        old_key: String,
    },
}
