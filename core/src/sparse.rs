use std::fmt;

use indexmap::IndexMap;

use crate::config::GraphKind;
use crate::graph::{fmt_store, Edge, GraphStore, GraphView, VertexId, Weight};

/// Adjacency-list store.
///
/// Each vertex owns an insertion-ordered map from neighbor to weight, and
/// vertices themselves are kept in insertion order. `add_vertex`, `add_edge`,
/// `has_edge` and `weight` are O(1) amortized; a repeated pair overwrites its
/// weight in place. `remove_edge` shifts the tail of the source's map to keep
/// neighbor order and is O(degree).
#[derive(Debug, Clone)]
pub struct SparseStore {
    kind: GraphKind,
    adjacency: IndexMap<VertexId, Adjacency>,
    edge_count: usize,
}

type Adjacency = IndexMap<VertexId, Weight>;

impl SparseStore {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            adjacency: IndexMap::new(),
            edge_count: 0,
        }
    }

    pub fn with_capacity(kind: GraphKind, vertex_count: usize) -> Self {
        Self {
            kind,
            adjacency: IndexMap::with_capacity(vertex_count),
            edge_count: 0,
        }
    }

    pub fn from_edges<I>(kind: GraphKind, edges: I) -> Self
    where
        I: IntoIterator<Item = (VertexId, VertexId, Weight)>,
    {
        let mut store = Self::new(kind);
        store.load_edges(edges);
        store
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        // key, value and the cached hash per indexmap entry, plus one index slot
        let slot = |value: usize| size_of::<VertexId>() + value + 2 * size_of::<usize>();
        let lists: usize = self
            .adjacency
            .values()
            .map(|list| list.capacity() * slot(size_of::<Weight>()))
            .sum();

        self.adjacency.capacity() * slot(size_of::<Adjacency>()) + lists
    }

    fn list(&self, v: VertexId) -> Option<&Adjacency> {
        self.adjacency.get(&v)
    }
}

impl GraphView for SparseStore {
    fn kind(&self) -> GraphKind {
        self.kind
    }

    fn has_vertex(&self, v: VertexId) -> bool {
        self.adjacency.contains_key(&v)
    }

    fn weight(&self, u: VertexId, v: VertexId) -> Option<Weight> {
        self.list(u)?.get(&v).copied()
    }

    fn neighbors(&self, v: VertexId) -> Vec<(VertexId, Weight)> {
        self.list(v)
            .map(|list| list.iter().map(|(&n, &w)| (n, w)).collect())
            .unwrap_or_default()
    }

    fn degree(&self, v: VertexId) -> usize {
        self.list(v).map_or(0, IndexMap::len)
    }

    fn vertices(&self) -> Vec<VertexId> {
        self.adjacency.keys().copied().collect()
    }

    fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (pos, (&u, list)) in self.adjacency.iter().enumerate() {
            for (&v, &w) in list {
                // Undirected: emit each pair from the endpoint inserted first.
                let keep = self.kind.directed
                    || self.adjacency.get_index_of(&v).is_some_and(|other| other >= pos);
                if keep {
                    edges.push(Edge::new(u, v, w));
                }
            }
        }
        edges
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }
}

impl GraphStore for SparseStore {
    fn add_vertex(&mut self, v: VertexId) {
        self.adjacency.entry(v).or_default();
    }

    fn add_edge(&mut self, u: VertexId, v: VertexId, weight: Weight) {
        self.add_vertex(u);
        self.add_vertex(v);

        let inserted = self
            .adjacency
            .entry(u)
            .or_default()
            .insert(v, weight)
            .is_none();
        if !self.kind.directed && u != v {
            self.adjacency.entry(v).or_default().insert(u, weight);
        }
        if inserted {
            self.edge_count += 1;
        }
    }

    fn remove_edge(&mut self, u: VertexId, v: VertexId) {
        let removed = self
            .adjacency
            .get_mut(&u)
            .and_then(|list| list.shift_remove(&v))
            .is_some();
        if !removed {
            return;
        }
        if !self.kind.directed && u != v {
            if let Some(list) = self.adjacency.get_mut(&v) {
                list.shift_remove(&u);
            }
        }
        self.edge_count -= 1;
    }
}

impl fmt::Display for SparseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_store(f, "SparseStore", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undirected() -> SparseStore {
        SparseStore::new(GraphKind::undirected())
    }

    #[test]
    fn test_add_vertex_idempotent() {
        let mut g = undirected();
        g.add_vertex(1);
        g.add_vertex(2);
        g.add_vertex(1);
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.vertices(), vec![1, 2]);
    }

    #[test]
    fn test_add_edge_undirected_symmetric() {
        let mut g = undirected();
        g.add_edge(1, 2, 1.0);
        assert!(g.has_edge(1, 2));
        assert!(g.has_edge(2, 1));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_add_edge_directed_one_way() {
        let mut g = SparseStore::new(GraphKind::directed());
        g.add_edge(1, 2, 1.0);
        assert!(g.has_edge(1, 2));
        assert!(!g.has_edge(2, 1));
        // the target still becomes a vertex
        assert!(g.has_vertex(2));
        assert!(g.neighbors(2).is_empty());
    }

    #[test]
    fn test_weighted_edge() {
        let mut g = SparseStore::new(GraphKind::undirected().with_weights());
        g.add_edge(1, 2, 5.5);
        assert_eq!(g.weight(1, 2), Some(5.5));
        assert_eq!(g.weight(2, 1), Some(5.5));
        assert_eq!(g.weight(1, 3), None);
        assert_eq!(g.weight(7, 8), None);
    }

    #[test]
    fn test_overwrite_no_duplicate_entries() {
        let mut g = SparseStore::new(GraphKind::undirected().with_weights());
        g.add_edge(1, 2, 3.0);
        let count = g.edge_count();
        g.add_edge(1, 2, 7.0);
        assert_eq!(g.edge_count(), count);
        assert_eq!(g.neighbors(1), vec![(2, 7.0)]);
        assert_eq!(g.neighbors(2), vec![(1, 7.0)]);
        assert_eq!(g.edges(), vec![Edge::new(1, 2, 7.0)]);
    }

    #[test]
    fn test_overwrite_from_reverse_side() {
        let mut g = undirected();
        g.add_edge(1, 2, 3.0);
        g.add_edge(2, 1, 4.0);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.weight(1, 2), Some(4.0));
        assert_eq!(g.degree(1), 1);
    }

    #[test]
    fn test_remove_edge() {
        let mut g = undirected();
        g.add_edge(1, 2, 1.0);
        g.add_edge(1, 3, 1.0);
        g.remove_edge(2, 1);
        assert!(!g.has_edge(1, 2));
        assert!(!g.has_edge(2, 1));
        assert_eq!(g.neighbors(1), vec![(3, 1.0)]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.vertex_count(), 3);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut g = SparseStore::new(GraphKind::directed());
        g.add_edge(1, 2, 1.0);
        g.remove_edge(2, 1);
        g.remove_edge(5, 6);
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge(1, 2));
    }

    #[test]
    fn test_neighbors_in_edge_order() {
        let mut g = undirected();
        g.add_edge(1, 3, 1.0);
        g.add_edge(1, 2, 2.0);
        assert_eq!(g.neighbors(1), vec![(3, 1.0), (2, 2.0)]);
        assert_eq!(g.neighbors(1), g.neighbors(1));
    }

    #[test]
    fn test_self_loop_counted_once() {
        let mut g = undirected();
        g.add_edge(1, 1, 2.0);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(1), vec![(1, 2.0)]);
        assert_eq!(g.edges(), vec![Edge::new(1, 1, 2.0)]);
        g.remove_edge(1, 1);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_edges_undirected_listed_once() {
        let g = SparseStore::from_edges(
            GraphKind::undirected(),
            vec![(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0)],
        );
        assert_eq!(g.edges().len(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_display() {
        let g = SparseStore::from_edges(GraphKind::directed(), vec![(1, 2, 1.0)]);
        let text = g.to_string();
        assert!(text.starts_with("SparseStore(directed=true, weighted=false)"));
        assert!(text.contains("Vertices: [1, 2]"));
        assert!(text.contains("Edges: [(1, 2, 1.0)]"));
    }

    #[test]
    fn test_repeated_add_edge_keeps_single_entry() {
        let mut g = SparseStore::new(GraphKind::directed().with_weights());
        for i in 0..1000 {
            g.add_edge(1, 2, f64::from(i));
        }
        assert_eq!(g.degree(1), 1);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.weight(1, 2), Some(999.0));
    }

    #[test]
    fn test_hub_vertex_keeps_insertion_order() {
        let n = 50_000;
        let g = SparseStore::from_edges(GraphKind::directed(), (1..=n).rev().map(|i| (0, i, 1.0)));
        assert_eq!(g.degree(0), n as usize);
        assert_eq!(g.edge_count(), n as usize);
        let first: Vec<_> = g.neighbors(0).into_iter().take(3).map(|(v, _)| v).collect();
        assert_eq!(first, vec![n, n - 1, n - 2]);
    }

    #[test]
    fn test_remove_keeps_neighbor_order() {
        let mut g = undirected();
        for v in [4, 2, 9, 7] {
            g.add_edge(1, v, 1.0);
        }
        g.remove_edge(1, 2);
        assert_eq!(g.neighbors(1), vec![(4, 1.0), (9, 1.0), (7, 1.0)]);
        g.add_edge(1, 2, 1.0);
        assert_eq!(g.neighbors(1).last(), Some(&(2, 1.0)));
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = SparseStore::from_edges(GraphKind::undirected(), (0..100).map(|i| (0, i + 1, 1.0)));
        assert!(g.memory_usage() > 0);
        assert_eq!(g.degree(0), 100);
    }
}
