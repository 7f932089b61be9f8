//! Catalog construction and lookup
//!
//! Provides [`DeprecationCatalog`] and its validated [`CatalogBuilder`].
//! Catalogs are immutable once built; iteration order equals insertion
//! order, which makes rule application deterministic.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::keys;

/// The two chain-native keys a multi-stage rule splits into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeKeys {
    /// Key set on the producing (source) stage
    pub output: String,

    /// Key set on the consuming (destination) stage
    pub input: String,
}

impl EdgeKeys {
    /// Create an output/input key pair
    #[inline]
    #[must_use]
    pub fn new(output: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            input: input.into(),
        }
    }
}

/// Immutable deprecated-key rule catalog
///
/// Partitioned into *direct* rules (same-stage rename) and *multi-stage*
/// rules (split across an edge). Loaded once, consulted read-only by all
/// translation passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecationCatalog {
    direct: IndexMap<String, String>,
    multi_stage: IndexMap<String, EdgeKeys>,
}

impl DeprecationCatalog {
    /// Start building a catalog
    #[inline]
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The built-in legacy-to-chain catalog
    ///
    /// Static data; callers still pass it explicitly so tests can substitute
    /// synthetic catalogs.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static BUILTIN: Lazy<DeprecationCatalog> = Lazy::new(|| {
            DeprecationCatalog::builder()
                .direct("job.io.sort.factor", "chain.runtime.io.sort.factor")
                .direct("job.io.sort.mb", "chain.runtime.io.sort.mb")
                .direct(
                    "job.shuffle.merge.percent",
                    "chain.runtime.shuffle.merge.percent",
                )
                .direct(
                    "job.shuffle.input.buffer.percent",
                    "chain.runtime.shuffle.input.buffer.percent",
                )
                .direct(
                    "job.reduce.input.buffer.percent",
                    "chain.runtime.reduce.input.buffer.percent",
                )
                .direct("job.local.dirs", "chain.runtime.local.dirs")
                .direct("job.ifile.readahead", "chain.runtime.ifile.readahead")
                .multi_stage(
                    keys::MAP_OUTPUT_KEY_CLASS,
                    keys::CHAIN_INTERMEDIATE_OUTPUT_KEY_CLASS,
                    keys::CHAIN_INTERMEDIATE_INPUT_KEY_CLASS,
                )
                .multi_stage(
                    keys::MAP_OUTPUT_VALUE_CLASS,
                    keys::CHAIN_INTERMEDIATE_OUTPUT_VALUE_CLASS,
                    keys::CHAIN_INTERMEDIATE_INPUT_VALUE_CLASS,
                )
                .multi_stage(
                    "job.map.output.compress",
                    "chain.runtime.intermediate-output.should-compress",
                    "chain.runtime.intermediate-input.is-compressed",
                )
                .multi_stage(
                    "job.map.output.compress.codec",
                    "chain.runtime.intermediate-output.compress.codec",
                    "chain.runtime.intermediate-input.compress.codec",
                )
                .multi_stage(
                    "job.output.key.comparator.class",
                    "chain.runtime.intermediate-output.key.comparator.class",
                    "chain.runtime.intermediate-input.key.comparator.class",
                )
                .build()
                .expect("builtin catalog is statically valid")
        });
        &BUILTIN
    }

    /// Load a catalog from its JSON representation
    ///
    /// # Errors
    /// [`CatalogError::Parse`] for malformed JSON; [`CatalogError::EmptyKey`]
    /// when a rule references an empty key name. Duplicates within a map are
    /// collapsed by JSON itself and cannot survive parsing.
    pub fn from_json_str(data: &str) -> Result<Self, CatalogError> {
        let parsed: Self = serde_json::from_str(data)?;
        let mut builder = CatalogBuilder::default();
        for (old, new) in &parsed.direct {
            builder = builder.direct(old, new);
        }
        for (old, edge) in &parsed.multi_stage {
            builder = builder.multi_stage(old, &edge.output, &edge.input);
        }
        builder.build()
    }

    /// Serialize the catalog to JSON
    ///
    /// # Errors
    /// Propagates serializer failures (practically unreachable for string
    /// maps).
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Chain-native replacement for a directly deprecated key
    #[inline]
    #[must_use]
    pub fn lookup_direct(&self, old_key: &str) -> Option<&str> {
        self.direct.get(old_key).map(String::as_str)
    }

    /// Edge key pair for a multi-stage deprecated key
    #[inline]
    #[must_use]
    pub fn lookup_multi_stage(&self, old_key: &str) -> Option<&EdgeKeys> {
        self.multi_stage.get(old_key)
    }

    /// Check whether any rule claims this deprecated key
    #[inline]
    #[must_use]
    pub fn recognizes(&self, old_key: &str) -> bool {
        self.direct.contains_key(old_key) || self.multi_stage.contains_key(old_key)
    }

    /// Direct rules in catalog order as `(old_key, new_key)`
    pub fn direct_rules(&self) -> impl Iterator<Item = (&str, &str)> {
        self.direct.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Multi-stage rules in catalog order as `(old_key, edge_keys)`
    pub fn multi_stage_rules(&self) -> impl Iterator<Item = (&str, &EdgeKeys)> {
        self.multi_stage.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of direct rules
    #[inline]
    #[must_use]
    pub fn direct_len(&self) -> usize {
        self.direct.len()
    }

    /// Number of multi-stage rules
    #[inline]
    #[must_use]
    pub fn multi_stage_len(&self) -> usize {
        self.multi_stage.len()
    }

    /// Check whether the catalog holds no rules at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.multi_stage.is_empty()
    }
}

/// Validated builder for [`DeprecationCatalog`]
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    direct: Vec<(String, String)>,
    multi_stage: Vec<(String, EdgeKeys)>,
}

impl CatalogBuilder {
    /// Add a direct rename rule
    #[must_use]
    pub fn direct(mut self, old_key: impl Into<String>, new_key: impl Into<String>) -> Self {
        self.direct.push((old_key.into(), new_key.into()));
        self
    }

    /// Add a multi-stage split rule
    #[must_use]
    pub fn multi_stage(
        mut self,
        old_key: impl Into<String>,
        output_key: impl Into<String>,
        input_key: impl Into<String>,
    ) -> Self {
        self.multi_stage
            .push((old_key.into(), EdgeKeys::new(output_key, input_key)));
        self
    }

    /// Build the immutable catalog
    ///
    /// # Errors
    /// [`CatalogError::DuplicateKey`] when a deprecated key appears in more
    /// than one rule (across both kinds); [`CatalogError::EmptyKey`] when any
    /// referenced key name is empty.
    pub fn build(self) -> Result<DeprecationCatalog, CatalogError> {
        let mut direct = IndexMap::new();
        let mut multi_stage = IndexMap::new();

        for (old, new) in self.direct {
            if old.is_empty() || new.is_empty() {
                return Err(CatalogError::EmptyKey { old_key: old });
            }
            if direct.insert(old.clone(), new).is_some() {
                return Err(CatalogError::DuplicateKey { key: old });
            }
        }
        for (old, edge) in self.multi_stage {
            if old.is_empty() || edge.output.is_empty() || edge.input.is_empty() {
                return Err(CatalogError::EmptyKey { old_key: old });
            }
            if direct.contains_key(&old) {
                return Err(CatalogError::DuplicateKey { key: old });
            }
            if multi_stage.insert(old.clone(), edge).is_some() {
                return Err(CatalogError::DuplicateKey { key: old });
            }
        }

        Ok(DeprecationCatalog {
            direct,
            multi_stage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_catalog() -> DeprecationCatalog {
        DeprecationCatalog::builder()
            .direct("old.a", "new.a")
            .direct("old.b", "new.b")
            .multi_stage("old.edge", "new.out", "new.in")
            .build()
            .unwrap()
    }

    #[test]
    fn lookups_resolve_both_kinds() {
        let catalog = small_catalog();
        assert_eq!(catalog.lookup_direct("old.a"), Some("new.a"));
        assert_eq!(catalog.lookup_direct("old.edge"), None);

        let edge = catalog.lookup_multi_stage("old.edge").unwrap();
        assert_eq!(edge.output, "new.out");
        assert_eq!(edge.input, "new.in");

        assert!(catalog.recognizes("old.b"));
        assert!(catalog.recognizes("old.edge"));
        assert!(!catalog.recognizes("new.a"));
    }

    #[test]
    fn rule_order_is_insertion_order() {
        let catalog = small_catalog();
        let olds: Vec<&str> = catalog.direct_rules().map(|(old, _)| old).collect();
        assert_eq!(olds, vec!["old.a", "old.b"]);
    }

    #[test]
    fn duplicate_old_key_rejected_within_kind() {
        let result = DeprecationCatalog::builder()
            .direct("old.a", "new.a")
            .direct("old.a", "new.other")
            .build();
        assert!(matches!(result, Err(CatalogError::DuplicateKey { key }) if key == "old.a"));
    }

    #[test]
    fn duplicate_old_key_rejected_across_kinds() {
        let result = DeprecationCatalog::builder()
            .direct("old.a", "new.a")
            .multi_stage("old.a", "out", "in")
            .build();
        assert!(matches!(result, Err(CatalogError::DuplicateKey { .. })));
    }

    #[test]
    fn empty_key_names_rejected() {
        let result = DeprecationCatalog::builder().direct("old.a", "").build();
        assert!(matches!(result, Err(CatalogError::EmptyKey { .. })));

        let result = DeprecationCatalog::builder()
            .multi_stage("old.a", "", "in")
            .build();
        assert!(matches!(result, Err(CatalogError::EmptyKey { .. })));
    }

    #[test]
    fn builtin_catalog_knows_the_edge_classes() {
        let catalog = DeprecationCatalog::builtin();
        assert!(!catalog.is_empty());

        let edge = catalog
            .lookup_multi_stage(keys::MAP_OUTPUT_KEY_CLASS)
            .unwrap();
        assert_eq!(edge.output, keys::CHAIN_INTERMEDIATE_OUTPUT_KEY_CLASS);
        assert_eq!(edge.input, keys::CHAIN_INTERMEDIATE_INPUT_KEY_CLASS);

        assert_eq!(
            catalog.lookup_direct("job.io.sort.mb"),
            Some("chain.runtime.io.sort.mb")
        );
    }

    #[test]
    fn json_roundtrip_preserves_rules_and_order() {
        let catalog = small_catalog();
        let json = catalog.to_json_string().unwrap();
        let back = DeprecationCatalog::from_json_str(&json).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn corrupt_json_is_a_parse_error() {
        let result = DeprecationCatalog::from_json_str("{not json");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn json_with_empty_key_is_rejected() {
        let data = r#"{"direct": {"old.a": ""}, "multi_stage": {}}"#;
        let result = DeprecationCatalog::from_json_str(data);
        assert!(matches!(result, Err(CatalogError::EmptyKey { .. })));
    }
}
