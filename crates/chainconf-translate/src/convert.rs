//! Per-stage translation: pull-through inheritance and direct renaming
//!
//! The inheritance step copies a small fixed set of job-level defaults into
//! a stage that never set them itself, so stages relying on job-wide record
//! classes keep working after the split. The direct step relocates every
//! deprecated key the catalog renames within a single stage.
//!
//! Direct renaming is batched: all `(old, value, new)` triples are collected
//! before any unset runs. Some deprecated keys are aliases of one another,
//! and an eager unset could otherwise destroy a value an earlier rule had
//! already read.

use chainconf_catalog::{keys, DeprecationCatalog};
use chainconf_store::{ConfigStore, Provenance};
use tracing::debug;

/// One job-level default a stage may inherit
///
/// `translated_guard` is the chain-native spelling: when a stage already
/// carries it, the stage has been explicitly configured and inheritance must
/// not clobber it.
#[derive(Debug, Clone, Copy)]
pub struct PullThroughKey {
    /// Stage-level key the inherited value is written under
    pub stage_key: &'static str,

    /// Legacy spelling of [`PullThroughKey::stage_key`]
    pub legacy_stage_key: &'static str,

    /// Job-level fallback consulted when the stage key is unset on the base
    pub fallback_key: &'static str,

    /// Legacy spelling of [`PullThroughKey::fallback_key`]
    pub legacy_fallback_key: &'static str,

    /// Chain-native key that disables inheritance when already set
    pub translated_guard: &'static str,

    /// Built-in default when the base configuration is silent
    pub default_value: &'static str,
}

/// The fixed set of keys pulled forward from the base configuration
pub const PULL_THROUGH_KEYS: &[PullThroughKey] = &[
    PullThroughKey {
        stage_key: keys::MAP_OUTPUT_KEY_CLASS,
        legacy_stage_key: keys::LEGACY_MAP_OUTPUT_KEY_CLASS,
        fallback_key: keys::OUTPUT_KEY_CLASS,
        legacy_fallback_key: keys::LEGACY_OUTPUT_KEY_CLASS,
        translated_guard: keys::CHAIN_INTERMEDIATE_OUTPUT_KEY_CLASS,
        default_value: "long",
    },
    PullThroughKey {
        stage_key: keys::MAP_OUTPUT_VALUE_CLASS,
        legacy_stage_key: keys::LEGACY_MAP_OUTPUT_VALUE_CLASS,
        fallback_key: keys::OUTPUT_VALUE_CLASS,
        legacy_fallback_key: keys::LEGACY_OUTPUT_VALUE_CLASS,
        translated_guard: keys::CHAIN_INTERMEDIATE_OUTPUT_VALUE_CLASS,
        default_value: "text",
    },
];

/// Which API convention wins when both spellings of a key are present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiPrecedence {
    /// New-style `job.*` spellings shadow legacy ones (default)
    #[default]
    PreferNew,

    /// Legacy spellings shadow new-style ones
    PreferLegacy,
}

/// Resolver producing inherited default values from a base configuration
///
/// The precedence between new-style and legacy key spellings is a policy
/// decision, so it lives behind this seam instead of being hard-coded into
/// the translation passes.
pub trait LegacyValueResolver {
    /// Effective job-level value for a pull-through key, if any
    fn resolve(&self, base: &ConfigStore, key: &PullThroughKey) -> Option<String>;

    /// Combiner class declared on the base, under whichever API convention
    /// is in effect
    fn declared_combiner(&self, base: &ConfigStore) -> Option<String>;
}

/// Default resolver mirroring the legacy job API's getter chain
///
/// Looks up the stage-level spelling pair first, then the job-level
/// fallback pair, then the built-in default. Within each pair the configured
/// [`ApiPrecedence`] decides which spelling shadows the other.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobDefaultResolver {
    precedence: ApiPrecedence,
}

impl JobDefaultResolver {
    /// Resolver with the default precedence ([`ApiPrecedence::PreferNew`])
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with an explicit precedence policy
    #[inline]
    #[must_use]
    pub fn with_precedence(precedence: ApiPrecedence) -> Self {
        Self { precedence }
    }

    fn lookup<'a>(
        &self,
        base: &'a ConfigStore,
        new_key: &str,
        legacy_key: &str,
    ) -> Option<&'a str> {
        match self.precedence {
            ApiPrecedence::PreferNew => base.get(new_key).or_else(|| base.get(legacy_key)),
            ApiPrecedence::PreferLegacy => base.get(legacy_key).or_else(|| base.get(new_key)),
        }
    }
}

impl LegacyValueResolver for JobDefaultResolver {
    fn resolve(&self, base: &ConfigStore, key: &PullThroughKey) -> Option<String> {
        self.lookup(base, key.stage_key, key.legacy_stage_key)
            .or_else(|| self.lookup(base, key.fallback_key, key.legacy_fallback_key))
            .map(str::to_string)
            .or_else(|| Some(key.default_value.to_string()))
    }

    fn declared_combiner(&self, base: &ConfigStore) -> Option<String> {
        // An explicit new-API switch on the job overrides the resolver's
        // own precedence, matching the legacy submission path.
        let prefer_new = match base.get(keys::USE_NEW_API) {
            Some(raw) => raw.trim().eq_ignore_ascii_case("true"),
            None => self.precedence == ApiPrecedence::PreferNew,
        };
        let (first, second) = if prefer_new {
            (keys::COMBINE_CLASS, keys::LEGACY_COMBINE_CLASS)
        } else {
            (keys::LEGACY_COMBINE_CLASS, keys::COMBINE_CLASS)
        };
        base.get(first)
            .or_else(|| base.get(second))
            .map(str::to_string)
    }
}

/// Apply pull-through inheritance and direct renaming to one stage
///
/// Inheritance runs first, so an inherited legacy key is still visible to
/// the multi-stage propagation pass that follows. `stage_label` only feeds
/// the debug log.
pub fn apply_direct_and_inherit(
    stage: &mut ConfigStore,
    base: &ConfigStore,
    catalog: &DeprecationCatalog,
    resolver: &dyn LegacyValueResolver,
    stage_label: &str,
) {
    inherit_from_base(stage, base, resolver, stage_label);
    process_direct_conversion(stage, catalog);
}

fn inherit_from_base(
    stage: &mut ConfigStore,
    base: &ConfigStore,
    resolver: &dyn LegacyValueResolver,
    stage_label: &str,
) {
    for key in PULL_THROUGH_KEYS {
        if stage.contains_key(key.translated_guard) || stage.contains_key(key.stage_key) {
            continue;
        }
        if let Some(value) = resolver.resolve(base, key) {
            debug!(
                stage = stage_label,
                key = key.stage_key,
                value = %value,
                "pulling job-level default into stage"
            );
            stage.set_with_provenance(key.stage_key, value, Provenance::Inherited);
        }
    }
}

fn process_direct_conversion(stage: &mut ConfigStore, catalog: &DeprecationCatalog) {
    let relocations: Vec<(String, String, String)> = catalog
        .direct_rules()
        .filter_map(|(old, new)| {
            stage
                .get(old)
                .map(|value| (old.to_string(), new.to_string(), value.to_string()))
        })
        .collect();

    for (old, _, _) in &relocations {
        stage.unset(old);
    }
    for (_, new, value) in relocations {
        stage.set_with_provenance(new, value, Provenance::DirectTranslation);
    }
}
