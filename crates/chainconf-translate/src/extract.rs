//! Stage extraction
//!
//! Splits one flat configuration into per-stage configurations. Extraction
//! is destructive on the store it is given: a key moved into a stage is
//! removed from the source, so no key can be attributed to two stages. The
//! owned [`split_stage_confs`] variant keeps callers' inputs intact by
//! taking ownership and handing back the drained remainder.

use chainconf_catalog::{keys, DeprecationCatalog};
use chainconf_store::ConfigStore;

/// Split a flat configuration into one configuration per stage
///
/// `edge_count + 1` stages are produced. Stage 0 receives the
/// non-intermediate keys the catalog recognizes (plus any chain-native keys
/// already present); when more than one stage exists the terminal stage
/// starts as an independent clone of that same subset. Each intermediate
/// stage `i` receives the keys under its `job.intermediate-stage.{i}.`
/// prefix, with the prefix stripped.
///
/// Keys moved into a stage are removed from `flat`.
pub fn extract_stage_confs(
    flat: &mut ConfigStore,
    edge_count: usize,
    catalog: &DeprecationCatalog,
) -> Vec<ConfigStore> {
    let num_stages = edge_count + 1;
    let mut stages = Vec::with_capacity(num_stages);

    let non_intermediate = take_non_intermediate_conf(flat, catalog);
    if num_stages == 1 {
        stages.push(non_intermediate);
        return stages;
    }

    let terminal = non_intermediate.clone();
    stages.push(non_intermediate);
    for ordinal in 1..num_stages - 1 {
        stages.push(take_intermediate_stage_conf(flat, ordinal));
    }
    stages.push(terminal);
    stages
}

/// Non-destructive split: consume `flat`, return stage configurations plus
/// the remainder of keys no stage claimed
#[must_use]
pub fn split_stage_confs(
    mut flat: ConfigStore,
    edge_count: usize,
    catalog: &DeprecationCatalog,
) -> (Vec<ConfigStore>, ConfigStore) {
    let stages = extract_stage_confs(&mut flat, edge_count, catalog);
    (stages, flat)
}

/// A root-level key belongs to the initial/terminal stages when a
/// deprecation rule claims it or it is already spelled in the chain-native
/// runtime namespace.
fn is_stage_scoped(key: &str, catalog: &DeprecationCatalog) -> bool {
    catalog.recognizes(key) || key.starts_with(keys::CHAIN_RUNTIME_PREFIX)
}

fn take_non_intermediate_conf(
    flat: &mut ConfigStore,
    catalog: &DeprecationCatalog,
) -> ConfigStore {
    let moved: Vec<(String, String)> = flat
        .iter()
        .filter(|(key, _)| {
            !key.starts_with(keys::INTERMEDIATE_STAGE_PREFIX_ROOT) && is_stage_scoped(key, catalog)
        })
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    let mut stage = ConfigStore::new();
    for (key, value) in moved {
        flat.unset(&key);
        stage.set(key, value);
    }
    stage
}

fn take_intermediate_stage_conf(flat: &mut ConfigStore, ordinal: usize) -> ConfigStore {
    let prefix = keys::intermediate_stage_prefix(ordinal);
    let moved: Vec<(String, String)> = flat
        .iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    let mut stage = ConfigStore::new();
    for (key, value) in moved {
        flat.unset(&key);
        stage.set(key[prefix.len()..].to_string(), value);
    }
    stage
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainconf_test_utils::synthetic_catalog;
    use pretty_assertions::assert_eq;

    fn flat_fixture() -> ConfigStore {
        ConfigStore::new()
            .with("old.alpha", "a")
            .with("old.cross", "x")
            .with("unrelated.key", "u")
            .with(keys::intermediate_stage_key(1, "old.alpha"), "stage1-a")
            .with(keys::intermediate_stage_key(1, "custom"), "stage1-c")
    }

    #[test]
    fn single_stage_takes_the_recognized_subset() {
        let catalog = synthetic_catalog();
        let mut flat = ConfigStore::new()
            .with("old.alpha", "a")
            .with("unrelated.key", "u");

        let stages = extract_stage_confs(&mut flat, 0, &catalog);
        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].get("old.alpha"), Some("a"));
        assert!(!stages[0].contains_key("unrelated.key"));

        // Unrecognized keys stay behind; claimed keys are gone.
        assert!(flat.contains_key("unrelated.key"));
        assert!(!flat.contains_key("old.alpha"));
    }

    #[test]
    fn terminal_stage_is_an_independent_clone() {
        let catalog = synthetic_catalog();
        let mut flat = ConfigStore::new().with("old.alpha", "a");

        let mut stages = extract_stage_confs(&mut flat, 1, &catalog);
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].get("old.alpha"), Some("a"));
        assert_eq!(stages[1].get("old.alpha"), Some("a"));

        stages[1].set("old.alpha", "changed");
        assert_eq!(stages[0].get("old.alpha"), Some("a"));
    }

    #[test]
    fn intermediate_stages_get_their_prefix_stripped() {
        let catalog = synthetic_catalog();
        let mut flat = flat_fixture();

        let stages = extract_stage_confs(&mut flat, 2, &catalog);
        assert_eq!(stages.len(), 3);
        assert_eq!(stages[1].get("old.alpha"), Some("stage1-a"));
        assert_eq!(stages[1].get("custom"), Some("stage1-c"));
        assert!(!flat.contains_key(&keys::intermediate_stage_key(1, "old.alpha")));
    }

    #[test]
    fn no_source_key_is_claimed_by_two_stages() {
        let catalog = synthetic_catalog();
        let mut flat = flat_fixture();
        let stages = extract_stage_confs(&mut flat, 2, &catalog);

        // Stage 0 claims root-level keys, stage 1 claims prefixed keys; the
        // terminal stage is a clone and claims nothing of its own.
        for key in stages[0].keys() {
            assert!(!key.starts_with(keys::INTERMEDIATE_STAGE_PREFIX_ROOT));
            assert!(!flat.contains_key(key), "'{key}' left behind in source");
        }
        for key in stages[1].keys() {
            let source_key = keys::intermediate_stage_key(1, key);
            assert!(!flat.contains_key(&source_key));
            assert!(!stages[0].contains_key(&source_key));
        }
    }

    #[test]
    fn chain_native_keys_already_present_travel_to_stage_zero() {
        let catalog = synthetic_catalog();
        let mut flat = ConfigStore::new().with("chain.runtime.partitioner.class", "hash");

        let stages = extract_stage_confs(&mut flat, 0, &catalog);
        assert_eq!(
            stages[0].get("chain.runtime.partitioner.class"),
            Some("hash")
        );
    }

    #[test]
    fn split_returns_stages_and_remainder() {
        let catalog = synthetic_catalog();
        let (stages, remainder) = split_stage_confs(flat_fixture(), 2, &catalog);

        assert_eq!(stages.len(), 3);
        assert_eq!(remainder.get("unrelated.key"), Some("u"));
        assert!(!remainder.contains_key("old.alpha"));
    }
}
