//! Write provenance tags
//!
//! Provides [`Provenance`], the informational tag recorded alongside a
//! configuration write. Translation logic never reads it back; it exists so
//! that a translated configuration can explain where each value came from.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Reason a configuration value was written
///
/// Purely informational. Preserved across [`Clone`](core::clone::Clone) so
/// copy-constructed stores keep the full history of their parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    /// Value relocated by a one-to-one deprecated-key rename
    DirectTranslation,

    /// Value split across an edge by a multi-stage deprecation rule
    MultiStage,

    /// Value pulled forward from the job-level base configuration
    Inherited,

    /// Caller-supplied reason
    Other(String),
}

impl Provenance {
    /// Stable label for logs and serialized output
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::DirectTranslation => "direct-translation",
            Self::MultiStage => "multi-stage",
            Self::Inherited => "inherited",
            Self::Other(reason) => reason.as_str(),
        }
    }
}

impl Display for Provenance {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
