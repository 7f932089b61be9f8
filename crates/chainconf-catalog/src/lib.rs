//! Deprecated-key rule catalogs
//!
//! # Core Concepts
//!
//! - [`DeprecationCatalog`]: immutable rule set consulted read-only by every
//!   translation pass
//! - *Direct* rules: one deprecated key renamed to one chain-native key on
//!   the same stage
//! - *Multi-stage* rules: one deprecated key split into an output-side key on
//!   the producing stage and an input-side key on the consuming stage
//! - [`CatalogBuilder`]: validated construction; [`CatalogError`] covers the
//!   fatal loading failures (duplicates, empty names, unparsable JSON)
//!
//! Catalogs are injected values, never global mutable state: the built-in
//! catalog is a `'static` reference obtained from
//! [`DeprecationCatalog::builtin`], and tests substitute synthetic catalogs
//! freely.
//!
//! # Example
//! ```
//! use chainconf_catalog::DeprecationCatalog;
//!
//! let catalog = DeprecationCatalog::builder()
//!     .direct("old.sort.mb", "new.sort.mb")
//!     .multi_stage("old.wire.codec", "new.output.codec", "new.input.codec")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(catalog.lookup_direct("old.sort.mb"), Some("new.sort.mb"));
//! ```

mod catalog;
mod error;
pub mod keys;

pub use catalog::{CatalogBuilder, DeprecationCatalog, EdgeKeys};
pub use error::CatalogError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
