//! Stage topology and vertex naming
//!
//! Provides [`StageTopology`], the stage-count view of a flat job
//! configuration, and the vertex naming scheme used to key translated
//! output.

use chainconf_catalog::keys;
use chainconf_store::ConfigStore;

use crate::error::TranslateError;

/// Name of the initial (producer-only) vertex
pub const INITIAL_VERTEX_NAME: &str = "initialmap";

/// Name of the terminal vertex, when one exists
pub const FINAL_VERTEX_NAME: &str = "finalreduce";

/// Stage counts of a linear chain
///
/// Stage 0 always exists and is the initial producer stage. A terminal stage
/// exists only when the declared reduce count is positive. Intermediate
/// stages sit strictly between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTopology {
    num_intermediate: usize,
    has_terminal: bool,
}

impl StageTopology {
    /// Build a topology from explicit counts
    #[inline]
    #[must_use]
    pub fn new(num_intermediate: usize, has_terminal: bool) -> Self {
        Self {
            num_intermediate,
            has_terminal,
        }
    }

    /// Derive the topology from declared job parameters
    ///
    /// Reads [`keys::NUM_INTERMEDIATE_STAGES`] and [`keys::NUM_REDUCES`].
    ///
    /// # Errors
    /// [`TranslateError::InvalidTopology`] for a negative intermediate-stage
    /// count; [`TranslateError::Store`] when either parameter fails to parse.
    pub fn from_config(conf: &ConfigStore) -> Result<Self, TranslateError> {
        let declared = conf.get_int(keys::NUM_INTERMEDIATE_STAGES, 0)?;
        let num_intermediate = usize::try_from(declared).map_err(|_| {
            TranslateError::invalid_topology(format!(
                "declared intermediate stage count is negative: {declared}"
            ))
        })?;
        let reduces = conf.get_int(keys::NUM_REDUCES, 0)?;
        Ok(Self {
            num_intermediate,
            has_terminal: reduces > 0,
        })
    }

    /// Number of intermediate stages
    #[inline]
    #[must_use]
    pub fn num_intermediate(&self) -> usize {
        self.num_intermediate
    }

    /// Whether a terminal stage exists
    #[inline]
    #[must_use]
    pub fn has_terminal(&self) -> bool {
        self.has_terminal
    }

    /// Total stage count; never zero
    #[inline]
    #[must_use]
    pub fn total_stages(&self) -> usize {
        self.num_intermediate + if self.has_terminal { 2 } else { 1 }
    }

    /// Number of edges in the chain
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.total_stages() - 1
    }
}

/// Vertex name for stage `ordinal` in a chain of `total` stages
///
/// Stage 0 is the initial vertex; the last stage of a multi-stage chain is
/// the terminal vertex; everything in between is an intermediate vertex
/// numbered from 1.
#[must_use]
pub fn vertex_name(ordinal: usize, total: usize) -> String {
    if ordinal == 0 {
        INITIAL_VERTEX_NAME.to_string()
    } else if ordinal == total - 1 {
        FINAL_VERTEX_NAME.to_string()
    } else {
        format!("istage{ordinal}")
    }
}

/// Key prefix namespacing a vertex's entries in a merged configuration
#[must_use]
pub fn vertex_prefix(vertex: &str) -> String {
    format!("chain.{vertex}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_follow_declared_parameters() {
        let conf = ConfigStore::new()
            .with(keys::NUM_INTERMEDIATE_STAGES, "2")
            .with(keys::NUM_REDUCES, "4");
        let topology = StageTopology::from_config(&conf).unwrap();

        assert_eq!(topology.num_intermediate(), 2);
        assert!(topology.has_terminal());
        assert_eq!(topology.total_stages(), 4);
        assert_eq!(topology.edge_count(), 3);
    }

    #[test]
    fn absent_parameters_mean_single_stage() {
        let topology = StageTopology::from_config(&ConfigStore::new()).unwrap();
        assert_eq!(topology.total_stages(), 1);
        assert_eq!(topology.edge_count(), 0);
        assert!(!topology.has_terminal());
    }

    #[test]
    fn zero_reduces_means_no_terminal_stage() {
        let conf = ConfigStore::new()
            .with(keys::NUM_INTERMEDIATE_STAGES, "1")
            .with(keys::NUM_REDUCES, "0");
        let topology = StageTopology::from_config(&conf).unwrap();
        assert!(!topology.has_terminal());
        assert_eq!(topology.total_stages(), 2);
    }

    #[test]
    fn negative_intermediate_count_is_invalid() {
        let conf = ConfigStore::new().with(keys::NUM_INTERMEDIATE_STAGES, "-1");
        let result = StageTopology::from_config(&conf);
        assert!(matches!(
            result,
            Err(TranslateError::InvalidTopology { .. })
        ));
    }

    #[test]
    fn unparsable_count_is_a_store_error() {
        let conf = ConfigStore::new().with(keys::NUM_REDUCES, "lots");
        let result = StageTopology::from_config(&conf);
        assert!(matches!(result, Err(TranslateError::Store(_))));
    }

    #[test]
    fn vertex_names_cover_the_chain() {
        assert_eq!(vertex_name(0, 4), "initialmap");
        assert_eq!(vertex_name(1, 4), "istage1");
        assert_eq!(vertex_name(2, 4), "istage2");
        assert_eq!(vertex_name(3, 4), "finalreduce");
    }

    #[test]
    fn single_stage_chain_is_the_initial_vertex() {
        assert_eq!(vertex_name(0, 1), "initialmap");
    }

    #[test]
    fn vertex_prefix_namespaces_under_chain() {
        assert_eq!(vertex_prefix("istage1"), "chain.istage1.");
    }
}
