//! Ordered configuration store with write provenance
//!
//! # Core Concepts
//!
//! - [`ConfigStore`]: ordered string-to-string map; insertion order is
//!   preserved and observable through iteration
//! - [`Provenance`]: optional per-entry tag recording why a value was
//!   written (e.g. which deprecation rule relocated it)
//! - [`StoreError`]: typed-getter failures
//!
//! Values are opaque strings. The store never interprets them beyond the
//! typed getters ([`ConfigStore::get_int`], [`ConfigStore::get_bool`]),
//! which exist for the handful of job parameters that drive topology.
//!
//! # Example
//! ```
//! use chainconf_store::{ConfigStore, Provenance};
//!
//! let mut conf = ConfigStore::new();
//! conf.set("job.num-reduces", "3");
//! conf.set_with_provenance("chain.runtime.io.sort.mb", "512", Provenance::DirectTranslation);
//!
//! assert_eq!(conf.get("chain.runtime.io.sort.mb"), Some("512"));
//! assert_eq!(
//!     conf.provenance("chain.runtime.io.sort.mb"),
//!     Some(&Provenance::DirectTranslation)
//! );
//! ```

mod error;
mod provenance;
mod store;

pub use error::StoreError;
pub use provenance::Provenance;
pub use store::ConfigStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
