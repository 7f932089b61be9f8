//! Multi-stage key propagation across edges
//!
//! A multi-stage deprecated key declared on a producing stage becomes two
//! chain-native keys: how that stage emits (output side) and how its
//! successor receives (input side). The last stage has no successor, so its
//! leftover multi-stage keys are simply dropped.
//!
//! The pass over a chain must stay strictly ordered: each edge mutates both
//! of its endpoints, and a stage must have finished being a destination
//! before it acts as a source.

use chainconf_catalog::DeprecationCatalog;
use chainconf_store::{ConfigStore, Provenance};

/// Propagate multi-stage keys across one edge
///
/// With a destination, every multi-stage key on `src` is unset and rewritten
/// as the rule's output key on `src` and input key on `dest`, both carrying
/// [`Provenance::MultiStage`]. Without one (terminal cleanup) the key is
/// only unset; nothing downstream could consume it.
pub fn propagate_edge(
    src: &mut ConfigStore,
    mut dest: Option<&mut ConfigStore>,
    catalog: &DeprecationCatalog,
) {
    for (old_key, edge) in catalog.multi_stage_rules() {
        let Some(value) = src.get(old_key).map(str::to_string) else {
            continue;
        };
        match dest.as_deref_mut() {
            Some(dest) => {
                src.unset(old_key);
                src.set_with_provenance(&edge.output, &value, Provenance::MultiStage);
                dest.set_with_provenance(&edge.input, &value, Provenance::MultiStage);
            }
            None => {
                src.unset(old_key);
            }
        }
    }
}

/// Run propagation over a whole chain
///
/// Visits adjacent pairs `(stage[i], stage[i + 1])` in ascending order, then
/// the last stage once more with no successor for terminal cleanup. Every
/// stage but the first is a destination exactly once; every stage but the
/// last is a source exactly once.
pub fn propagate_chain(stages: &mut [ConfigStore], catalog: &DeprecationCatalog) {
    for split in 1..stages.len() {
        let (head, tail) = stages.split_at_mut(split);
        // head ends with stage `split - 1`, tail starts with stage `split`
        propagate_edge(&mut head[split - 1], Some(&mut tail[0]), catalog);
    }
    if let Some(last) = stages.last_mut() {
        propagate_edge(last, None, catalog);
    }
}
