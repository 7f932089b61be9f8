//! Key vocabulary shared by the legacy job namespace and the chain-native
//! runtime namespace
//!
//! Legacy keys describe a job the way the flat, single-configuration
//! execution model spells them. Chain-native keys are the stage-scoped
//! vocabulary the translated per-vertex configurations use.

/// Declared number of intermediate stages in the chain
pub const NUM_INTERMEDIATE_STAGES: &str = "job.num-intermediate-stages";

/// Declared reduce count; a value greater than zero implies a terminal stage
pub const NUM_REDUCES: &str = "job.num-reduces";

/// Switch selecting the new-style job API over the legacy spellings
pub const USE_NEW_API: &str = "job.mapper.new-api";

/// Record key class emitted between stages (new-style spelling)
pub const MAP_OUTPUT_KEY_CLASS: &str = "job.map.output.key.class";

/// Record value class emitted between stages (new-style spelling)
pub const MAP_OUTPUT_VALUE_CLASS: &str = "job.map.output.value.class";

/// Legacy spelling of [`MAP_OUTPUT_KEY_CLASS`]
pub const LEGACY_MAP_OUTPUT_KEY_CLASS: &str = "mapred.mapoutput.key.class";

/// Legacy spelling of [`MAP_OUTPUT_VALUE_CLASS`]
pub const LEGACY_MAP_OUTPUT_VALUE_CLASS: &str = "mapred.mapoutput.value.class";

/// Job-level output key class, the fallback when no map-output class is set
pub const OUTPUT_KEY_CLASS: &str = "job.output.key.class";

/// Job-level output value class, the fallback when no map-output class is set
pub const OUTPUT_VALUE_CLASS: &str = "job.output.value.class";

/// Legacy spelling of [`OUTPUT_KEY_CLASS`]
pub const LEGACY_OUTPUT_KEY_CLASS: &str = "mapred.output.key.class";

/// Legacy spelling of [`OUTPUT_VALUE_CLASS`]
pub const LEGACY_OUTPUT_VALUE_CLASS: &str = "mapred.output.value.class";

/// Combiner class (new-style spelling)
pub const COMBINE_CLASS: &str = "job.combine.class";

/// Legacy spelling of [`COMBINE_CLASS`]
pub const LEGACY_COMBINE_CLASS: &str = "mapred.combiner.class";

/// Prefix every chain-native runtime key lives under
pub const CHAIN_RUNTIME_PREFIX: &str = "chain.runtime.";

/// Chain-native key class on the output side of an edge
pub const CHAIN_INTERMEDIATE_OUTPUT_KEY_CLASS: &str =
    "chain.runtime.intermediate-output.key.class";

/// Chain-native key class on the input side of an edge
pub const CHAIN_INTERMEDIATE_INPUT_KEY_CLASS: &str = "chain.runtime.intermediate-input.key.class";

/// Chain-native value class on the output side of an edge
pub const CHAIN_INTERMEDIATE_OUTPUT_VALUE_CLASS: &str =
    "chain.runtime.intermediate-output.value.class";

/// Chain-native value class on the input side of an edge
pub const CHAIN_INTERMEDIATE_INPUT_VALUE_CLASS: &str =
    "chain.runtime.intermediate-input.value.class";

/// Chain-native combiner class
pub const CHAIN_COMBINER_CLASS: &str = "chain.runtime.combiner.class";

/// Chain-native partitioner class
pub const CHAIN_PARTITIONER_CLASS: &str = "chain.runtime.partitioner.class";

/// Marker telling a stage whether it runs the initial (producer-only)
/// processor
pub const CHAIN_STAGE_INITIAL_PROCESSOR: &str = "chain.stage.initial-processor";

/// Parent prefix of every intermediate-stage-scoped key
pub const INTERMEDIATE_STAGE_PREFIX_ROOT: &str = "job.intermediate-stage.";

/// Prefix of stage-scoped keys for intermediate stage `ordinal` in the flat
/// input configuration
#[must_use]
pub fn intermediate_stage_prefix(ordinal: usize) -> String {
    format!("{INTERMEDIATE_STAGE_PREFIX_ROOT}{ordinal}.")
}

/// Stage-scoped spelling of `key` for intermediate stage `ordinal`
#[must_use]
pub fn intermediate_stage_key(ordinal: usize, key: &str) -> String {
    format!("{}{key}", intermediate_stage_prefix(ordinal))
}
