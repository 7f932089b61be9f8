//! Testing utilities for the chainconf workspace
//!
//! Shared fixtures: synthetic rule catalogs and flat-configuration builders.

#![allow(missing_docs)]

use chainconf_catalog::{keys, DeprecationCatalog};
use chainconf_store::ConfigStore;

/// Small catalog with stable, test-friendly key names:
/// two direct rules and one multi-stage rule.
pub fn synthetic_catalog() -> DeprecationCatalog {
    DeprecationCatalog::builder()
        .direct("old.alpha", "new.alpha")
        .direct("old.beta", "new.beta")
        .multi_stage("old.cross", "new.cross.out", "new.cross.in")
        .build()
        .expect("synthetic catalog is valid")
}

/// Flat job configuration declaring the given chain shape, with the usual
/// record classes and one directly-deprecated key set at the job level.
pub fn flat_chain_conf(num_intermediate: usize, num_reduces: usize) -> ConfigStore {
    ConfigStore::new()
        .with(keys::NUM_INTERMEDIATE_STAGES, num_intermediate.to_string())
        .with(keys::NUM_REDUCES, num_reduces.to_string())
        .with(keys::MAP_OUTPUT_KEY_CLASS, "long-pair")
        .with(keys::MAP_OUTPUT_VALUE_CLASS, "text-block")
        .with("job.io.sort.mb", "256")
}
