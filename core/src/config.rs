#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Construction-time flags of a graph. Immutable once the store exists.
///
/// `directed` governs insertion symmetry: an undirected store mirrors every
/// edge. `weighted` is informational; unweighted graphs treat a missing weight
/// as [`DEFAULT_WEIGHT`](crate::DEFAULT_WEIGHT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphKind {
    pub directed: bool,
    pub weighted: bool,
}

impl GraphKind {
    /// Undirected, unweighted.
    pub const fn undirected() -> Self {
        Self {
            directed: false,
            weighted: false,
        }
    }

    /// Directed, unweighted.
    pub const fn directed() -> Self {
        Self {
            directed: true,
            weighted: false,
        }
    }

    #[must_use]
    pub const fn with_weights(mut self) -> Self {
        self.weighted = true;
        self
    }
}

/// How [`DenseStore`](crate::DenseStore) grows its matrix when a vertex is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GrowthPolicy {
    /// Reallocate to exactly V+1 rows and copy every cell: O(V²) per new vertex.
    ///
    /// This is the scalability cliff of the matrix representation. It is kept
    /// as the default so the cost model stays visible and measurable.
    #[default]
    Exact,
    /// Double the row capacity when full; logical size is tracked separately.
    Doubling,
}

/// Bounds applied to the recursive DFS reference walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraversalLimits {
    /// Deepest call chain `dfs_recursive` will build before giving up with
    /// [`GraphError::RecursionLimit`](crate::GraphError::RecursionLimit).
    pub max_recursion_depth: usize,
}

impl TraversalLimits {
    pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 1000;

    pub const fn new(max_recursion_depth: usize) -> Self {
        Self {
            max_recursion_depth,
        }
    }
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_RECURSION_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_builders() {
        assert!(!GraphKind::undirected().directed);
        assert!(GraphKind::directed().directed);
        assert!(!GraphKind::directed().weighted);
        assert!(GraphKind::undirected().with_weights().weighted);
        assert_eq!(GraphKind::default(), GraphKind::undirected());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(GrowthPolicy::default(), GrowthPolicy::Exact);
        assert_eq!(TraversalLimits::default().max_recursion_depth, 1000);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_kind_serde() {
        let kind = GraphKind::directed().with_weights();
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, r#"{"directed":true,"weighted":true}"#);
        let back: GraphKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}
