//! The full linear-chain translation pipeline
//!
//! Orchestrates extraction, per-stage conversion, and edge propagation,
//! then names each vertex and assembles the output. The output is built
//! only after every pass has succeeded; a failed translation leaves nothing
//! partially populated behind.

use chainconf_catalog::{keys, DeprecationCatalog};
use chainconf_store::{ConfigStore, Provenance};
use indexmap::IndexMap;
use tracing::debug;

use crate::convert::{apply_direct_and_inherit, LegacyValueResolver};
use crate::error::TranslateError;
use crate::extract::extract_stage_confs;
use crate::propagate::propagate_chain;
use crate::topology::{vertex_name, vertex_prefix, StageTopology};

/// Partitioner installed on every translated chain
const DEFAULT_PARTITIONER: &str = "hash";

/// Result of translating a linear chain
///
/// Per-vertex configurations in chain order, plus a merged single-store view
/// for callers that expect one configuration with stage-namespaced keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedChain {
    vertices: IndexMap<String, ConfigStore>,
    merged: ConfigStore,
}

impl TranslatedChain {
    /// Configuration for a named vertex
    #[inline]
    #[must_use]
    pub fn vertex(&self, name: &str) -> Option<&ConfigStore> {
        self.vertices.get(name)
    }

    /// Vertex names in chain order
    pub fn vertex_names(&self) -> impl Iterator<Item = &str> {
        self.vertices.keys().map(String::as_str)
    }

    /// Iterate `(vertex name, configuration)` in chain order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigStore)> {
        self.vertices.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of vertices; never zero for a successful translation
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check whether the chain holds no vertices
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Merged view: remainder keys plus every vertex's entries under the
    /// `chain.{vertex}.` prefix
    #[inline]
    #[must_use]
    pub fn merged(&self) -> &ConfigStore {
        &self.merged
    }

    /// Consume the chain, keeping only the merged view
    #[inline]
    #[must_use]
    pub fn into_merged(self) -> ConfigStore {
        self.merged
    }
}

/// Translate one flat linear-chain job configuration
///
/// Derives the topology from the declared job parameters, splits the flat
/// configuration into stages, applies inheritance and direct renaming to
/// each stage, propagates multi-stage keys across every edge (plus terminal
/// cleanup), and names the vertices. The caller's `flat` is never mutated.
///
/// # Errors
/// [`TranslateError::InvalidTopology`] for inconsistent declared counts;
/// [`TranslateError::Store`] when a declared count fails to parse.
pub fn translate_linear_chain(
    flat: &ConfigStore,
    catalog: &DeprecationCatalog,
    resolver: &dyn LegacyValueResolver,
) -> Result<TranslatedChain, TranslateError> {
    let topology = StageTopology::from_config(flat)?;
    debug!(
        total_stages = topology.total_stages(),
        has_terminal = topology.has_terminal(),
        "translating linear chain"
    );

    let mut work = flat.clone();
    apply_runtime_defaults(&mut work, resolver);

    let mut stages = extract_stage_confs(&mut work, topology.edge_count(), catalog);

    for (ordinal, stage) in stages.iter_mut().enumerate() {
        apply_direct_and_inherit(stage, flat, catalog, resolver, &ordinal.to_string());
    }
    propagate_chain(&mut stages, catalog);

    for (ordinal, stage) in stages.iter_mut().enumerate() {
        let is_initial = ordinal == 0;
        stage.set(
            keys::CHAIN_STAGE_INITIAL_PROCESSOR,
            if is_initial { "true" } else { "false" },
        );
    }

    let total = stages.len();
    let mut vertices = IndexMap::with_capacity(total);
    let mut merged = work;
    for (ordinal, stage) in stages.into_iter().enumerate() {
        let name = vertex_name(ordinal, total);
        let prefix = vertex_prefix(&name);
        for (key, value) in stage.iter() {
            merged.set(format!("{prefix}{key}"), value);
        }
        vertices.insert(name, stage);
    }

    Ok(TranslatedChain { vertices, merged })
}

/// Translate a single vertex configuration in place
///
/// Entry point for callers that hold one stage's configuration rather than
/// the whole flat job. Applies inheritance (against the vertex itself as
/// base) and direct renaming, rewrites the vertex's own multi-stage keys to
/// their output side, and pulls input-side values from an already-translated
/// predecessor. Pass `None` for the first vertex of a chain.
pub fn translate_vertex_conf(
    conf: &mut ConfigStore,
    predecessor: Option<&ConfigStore>,
    catalog: &DeprecationCatalog,
    resolver: &dyn LegacyValueResolver,
) {
    let base = conf.clone();
    apply_direct_and_inherit(conf, &base, catalog, resolver, "standalone");

    for (old_key, edge) in catalog.multi_stage_rules() {
        if let Some(value) = conf.get(old_key).map(str::to_string) {
            conf.unset(old_key);
            conf.set_with_provenance(&edge.output, value, Provenance::MultiStage);
        }
        if let Some(pred) = predecessor {
            if let Some(value) = pred.get(&edge.output).map(str::to_string) {
                conf.set(&edge.input, value);
            }
        }
    }
}

/// Install chain-native runtime selections on the working copy before
/// extraction, so they land on the initial and terminal stages.
fn apply_runtime_defaults(work: &mut ConfigStore, resolver: &dyn LegacyValueResolver) {
    work.set(keys::CHAIN_PARTITIONER_CLASS, DEFAULT_PARTITIONER);
    if let Some(combiner) = resolver.declared_combiner(work) {
        debug!(combiner = %combiner, "installing declared combiner");
        work.set(keys::CHAIN_COMBINER_CLASS, combiner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::JobDefaultResolver;
    use chainconf_test_utils::{flat_chain_conf, synthetic_catalog};
    use pretty_assertions::assert_eq;

    #[test]
    fn vertex_names_are_assigned_in_chain_order() {
        let flat = flat_chain_conf(2, 1);
        let chain = translate_linear_chain(
            &flat,
            DeprecationCatalog::builtin(),
            &JobDefaultResolver::new(),
        )
        .unwrap();

        let names: Vec<&str> = chain.vertex_names().collect();
        assert_eq!(names, vec!["initialmap", "istage1", "istage2", "finalreduce"]);
    }

    #[test]
    fn caller_input_is_not_mutated() {
        let flat = flat_chain_conf(1, 1);
        let before = flat.clone();
        let _ = translate_linear_chain(
            &flat,
            DeprecationCatalog::builtin(),
            &JobDefaultResolver::new(),
        )
        .unwrap();
        assert_eq!(flat, before);
    }

    #[test]
    fn processor_kind_marks_only_the_initial_stage() {
        let flat = flat_chain_conf(0, 2);
        let chain = translate_linear_chain(
            &flat,
            DeprecationCatalog::builtin(),
            &JobDefaultResolver::new(),
        )
        .unwrap();

        let initial = chain.vertex("initialmap").unwrap();
        let terminal = chain.vertex("finalreduce").unwrap();
        assert_eq!(initial.get(keys::CHAIN_STAGE_INITIAL_PROCESSOR), Some("true"));
        assert_eq!(
            terminal.get(keys::CHAIN_STAGE_INITIAL_PROCESSOR),
            Some("false")
        );
    }

    #[test]
    fn partitioner_and_declared_combiner_are_installed() {
        let flat = flat_chain_conf(0, 1).with(keys::COMBINE_CLASS, "sum");
        let chain = translate_linear_chain(
            &flat,
            DeprecationCatalog::builtin(),
            &JobDefaultResolver::new(),
        )
        .unwrap();

        let initial = chain.vertex("initialmap").unwrap();
        assert_eq!(
            initial.get(keys::CHAIN_PARTITIONER_CLASS),
            Some(DEFAULT_PARTITIONER)
        );
        assert_eq!(initial.get(keys::CHAIN_COMBINER_CLASS), Some("sum"));
    }

    #[test]
    fn merged_view_namespaces_every_vertex_key() {
        let flat = flat_chain_conf(0, 1).with("unrelated.key", "u");
        let chain = translate_linear_chain(
            &flat,
            DeprecationCatalog::builtin(),
            &JobDefaultResolver::new(),
        )
        .unwrap();

        let merged = chain.merged();
        // Remainder keys survive unprefixed.
        assert_eq!(merged.get("unrelated.key"), Some("u"));
        // Vertex keys appear under their namespace.
        for (name, conf) in chain.iter() {
            let prefix = vertex_prefix(name);
            for (key, value) in conf.iter() {
                assert_eq!(merged.get(&format!("{prefix}{key}")), Some(value));
            }
        }
    }

    #[test]
    fn invalid_topology_produces_no_output() {
        let flat = ConfigStore::new().with(keys::NUM_INTERMEDIATE_STAGES, "-3");
        let result = translate_linear_chain(
            &flat,
            DeprecationCatalog::builtin(),
            &JobDefaultResolver::new(),
        );
        assert!(matches!(result, Err(TranslateError::InvalidTopology { .. })));
    }

    #[test]
    fn standalone_vertex_translation_emits_output_side() {
        let catalog = synthetic_catalog();
        let mut conf = ConfigStore::new().with("old.cross", "v");

        translate_vertex_conf(&mut conf, None, &catalog, &JobDefaultResolver::new());

        assert!(!conf.contains_key("old.cross"));
        assert_eq!(conf.get("new.cross.out"), Some("v"));
        assert!(!conf.contains_key("new.cross.in"));
    }

    #[test]
    fn standalone_vertex_pulls_inputs_from_predecessor() {
        let catalog = synthetic_catalog();
        let predecessor = ConfigStore::new().with("new.cross.out", "upstream");
        let mut conf = ConfigStore::new();

        translate_vertex_conf(
            &mut conf,
            Some(&predecessor),
            &catalog,
            &JobDefaultResolver::new(),
        );

        assert_eq!(conf.get("new.cross.in"), Some("upstream"));
    }
}
