//! Multi-stage configuration translation for linear chains
//!
//! Translates one flat job configuration, written in the legacy flat key
//! vocabulary, into per-stage configurations in the chain-native namespace.
//!
//! # Core Concepts
//!
//! - [`StageTopology`]: stage counts derived from declared job parameters
//! - [`extract_stage_confs`] / [`split_stage_confs`]: split the flat
//!   configuration into one [`ConfigStore`](chainconf_store::ConfigStore)
//!   per stage
//! - [`apply_direct_and_inherit`]: pull-through inheritance plus batched
//!   direct key renaming for a single stage
//! - [`propagate_chain`]: multi-stage key propagation across each edge, with
//!   terminal cleanup on the last stage
//! - [`translate_linear_chain`]: the full pipeline, producing a
//!   [`TranslatedChain`] keyed by vertex name
//!
//! # Example
//! ```
//! use chainconf_catalog::DeprecationCatalog;
//! use chainconf_store::ConfigStore;
//! use chainconf_translate::{translate_linear_chain, JobDefaultResolver};
//!
//! let flat = ConfigStore::new()
//!     .with("job.num-intermediate-stages", "1")
//!     .with("job.num-reduces", "2")
//!     .with("job.map.output.key.class", "long");
//!
//! let chain = translate_linear_chain(
//!     &flat,
//!     DeprecationCatalog::builtin(),
//!     &JobDefaultResolver::new(),
//! )
//! .unwrap();
//!
//! assert_eq!(chain.len(), 3);
//! assert!(chain.vertex("initialmap").is_some());
//! ```

mod convert;
mod edge;
mod error;
mod extract;
mod pipeline;
mod propagate;
mod topology;

pub use convert::{
    apply_direct_and_inherit, ApiPrecedence, JobDefaultResolver, LegacyValueResolver,
    PullThroughKey, PULL_THROUGH_KEYS,
};
pub use edge::{input_conf_on_edge, output_conf_on_edge};
pub use error::TranslateError;
pub use extract::{extract_stage_confs, split_stage_confs};
pub use pipeline::{translate_linear_chain, translate_vertex_conf, TranslatedChain};
pub use propagate::{propagate_chain, propagate_edge};
pub use topology::{
    vertex_name, vertex_prefix, StageTopology, FINAL_VERTEX_NAME, INITIAL_VERTEX_NAME,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
