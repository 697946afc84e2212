use std::collections::{HashMap, HashSet};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::GraphKind;

/// Vertex key. Opaque to the engine; uniqueness is enforced by the store.
pub type VertexId = i64;

/// Edge weight.
pub type Weight = f64;

/// Weight given to edges added without one, and implied by unweighted graphs.
pub const DEFAULT_WEIGHT: Weight = 1.0;

/// An ordered (source, target) pair plus its weight.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
    pub weight: Weight,
}

impl Edge {
    pub const fn new(source: VertexId, target: VertexId, weight: Weight) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

/// Read-only query contract shared by every backend.
///
/// All algorithms in this crate are written against this trait and never
/// mutate the graph. Queries about vertices or edges that were never added
/// return `false`, `None` or an empty collection; they never panic.
pub trait GraphView {
    fn kind(&self) -> GraphKind;

    fn is_directed(&self) -> bool {
        self.kind().directed
    }

    fn is_weighted(&self) -> bool {
        self.kind().weighted
    }

    fn has_vertex(&self, v: VertexId) -> bool;

    fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.weight(u, v).is_some()
    }

    /// Weight of the edge u → v, or `None` if there is no such edge.
    fn weight(&self, u: VertexId, v: VertexId) -> Option<Weight>;

    /// `(neighbor, weight)` pairs reachable over one edge from `v`.
    ///
    /// Order is backend-defined but stable across calls while the store is
    /// not mutated. Traversal order depends on it.
    fn neighbors(&self, v: VertexId) -> Vec<(VertexId, Weight)>;

    fn degree(&self, v: VertexId) -> usize {
        self.neighbors(v).len()
    }

    /// All vertices in insertion order.
    fn vertices(&self) -> Vec<VertexId>;

    /// All edges. Undirected edges are listed once. No ordering is promised.
    fn edges(&self) -> Vec<Edge>;

    fn vertex_count(&self) -> usize;

    /// Number of edges; an undirected edge counts once.
    fn edge_count(&self) -> usize;
}

/// Mutation contract shared by every backend.
///
/// Vertices are never removed: once added, a vertex lives as long as the store.
pub trait GraphStore: GraphView {
    /// Add `v` if absent. Idempotent.
    fn add_vertex(&mut self, v: VertexId);

    /// Insert u → v (and v → u for undirected stores), adding both endpoints
    /// if needed. Re-inserting an existing pair overwrites its weight.
    fn add_edge(&mut self, u: VertexId, v: VertexId, weight: Weight);

    fn add_unweighted_edge(&mut self, u: VertexId, v: VertexId) {
        self.add_edge(u, v, DEFAULT_WEIGHT);
    }

    /// Remove u → v (both directions for undirected stores). No-op if absent.
    fn remove_edge(&mut self, u: VertexId, v: VertexId);

    /// Bulk insert from `(source, target, weight)` triples.
    fn load_edges<I>(&mut self, edges: I)
    where
        Self: Sized,
        I: IntoIterator<Item = (VertexId, VertexId, Weight)>,
    {
        for (u, v, weight) in edges {
            self.add_edge(u, v, weight);
        }
    }
}

/// Shared `Display` body for the backends.
pub(crate) fn fmt_store<G: GraphView + ?Sized>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    graph: &G,
) -> fmt::Result {
    let kind = graph.kind();
    writeln!(
        f,
        "{}(directed={}, weighted={})",
        name, kind.directed, kind.weighted
    )?;
    writeln!(f, "Vertices: {:?}", graph.vertices())?;
    let edges: Vec<(VertexId, VertexId, Weight)> = graph
        .edges()
        .into_iter()
        .map(|e| (e.source, e.target, e.weight))
        .collect();
    writeln!(f, "Edges: {:?}", edges)
}

/// Direction-blind view over a graph.
///
/// Neighbors of `v` are its outgoing edges followed by its incoming edges, so
/// reachability over the view is weak reachability in the underlying graph.
/// The incoming index and the edge count are computed once, in O(V + E),
/// when the view is created. For an undirected graph the view adds nothing
/// and simply forwards.
///
/// Antiparallel edges `u -> v` and `v -> u` collapse to one undirected edge.
/// `weight(u, v)` and `edges()` report the weight of the direction asked for
/// (or enumerated) first, so a differing weight on the reverse edge is not
/// visible through the view.
pub struct WeakView<'a, G: GraphView + ?Sized> {
    inner: &'a G,
    incoming: HashMap<VertexId, Vec<(VertexId, Weight)>>,
    edge_count: usize,
}

impl<'a, G: GraphView + ?Sized> WeakView<'a, G> {
    pub fn new(inner: &'a G) -> Self {
        let mut incoming: HashMap<VertexId, Vec<(VertexId, Weight)>> = HashMap::new();
        if !inner.is_directed() {
            return Self {
                inner,
                incoming,
                edge_count: inner.edge_count(),
            };
        }

        let mut pairs = HashSet::new();
        for u in inner.vertices() {
            for (v, weight) in inner.neighbors(u) {
                incoming.entry(v).or_default().push((u, weight));
                pairs.insert((u.min(v), u.max(v)));
            }
        }
        Self {
            inner,
            incoming,
            edge_count: pairs.len(),
        }
    }
}

impl<G: GraphView + ?Sized> GraphView for WeakView<'_, G> {
    fn kind(&self) -> GraphKind {
        GraphKind {
            directed: false,
            ..self.inner.kind()
        }
    }

    fn has_vertex(&self, v: VertexId) -> bool {
        self.inner.has_vertex(v)
    }

    fn weight(&self, u: VertexId, v: VertexId) -> Option<Weight> {
        self.inner.weight(u, v).or_else(|| self.inner.weight(v, u))
    }

    fn neighbors(&self, v: VertexId) -> Vec<(VertexId, Weight)> {
        let mut out = self.inner.neighbors(v);
        if let Some(sources) = self.incoming.get(&v) {
            let seen: HashSet<VertexId> = out.iter().map(|&(n, _)| n).collect();
            out.extend(sources.iter().filter(|(n, _)| !seen.contains(n)).copied());
        }
        out
    }

    fn vertices(&self) -> Vec<VertexId> {
        self.inner.vertices()
    }

    fn edges(&self) -> Vec<Edge> {
        let mut seen = HashSet::new();
        self.inner
            .edges()
            .into_iter()
            .filter(|e| seen.insert((e.source.min(e.target), e.source.max(e.target))))
            .collect()
    }

    fn vertex_count(&self) -> usize {
        self.inner.vertex_count()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SparseStore;

    #[test]
    fn test_weak_view_merges_directions() {
        let mut g = SparseStore::new(GraphKind::directed());
        g.add_edge(1, 2, 1.0);
        g.add_edge(3, 2, 4.0);

        let view = WeakView::new(&g);
        assert!(!view.is_directed());
        assert_eq!(view.neighbors(2), vec![(1, 1.0), (3, 4.0)]);
        assert_eq!(view.neighbors(1), vec![(2, 1.0)]);
        assert_eq!(view.weight(2, 3), Some(4.0));
        assert!(view.has_edge(2, 1));
    }

    #[test]
    fn test_weak_view_antiparallel_edges_once() {
        let mut g = SparseStore::new(GraphKind::directed());
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 1, 1.0);

        let view = WeakView::new(&g);
        assert_eq!(view.neighbors(1), vec![(2, 1.0)]);
        assert_eq!(view.edge_count(), 1);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_weak_view_antiparallel_weights_follow_query_direction() {
        let mut g = SparseStore::new(GraphKind::directed().with_weights());
        g.add_edge(1, 2, 3.0);
        g.add_edge(2, 1, 8.0);
        g.add_edge(3, 3, 1.0);
        g.add_edge(4, 3, 2.0);

        let view = WeakView::new(&g);
        assert_eq!(view.weight(1, 2), Some(3.0));
        assert_eq!(view.weight(2, 1), Some(8.0));
        assert_eq!(view.weight(3, 4), Some(2.0));
        assert_eq!(
            view.edges(),
            vec![
                Edge::new(1, 2, 3.0),
                Edge::new(3, 3, 1.0),
                Edge::new(4, 3, 2.0),
            ]
        );
        assert_eq!(view.edge_count(), view.edges().len());
    }

    #[test]
    fn test_weak_view_undirected_forwards() {
        let mut g = SparseStore::new(GraphKind::undirected());
        g.add_edge(1, 2, 1.0);
        let view = WeakView::new(&g);
        assert_eq!(view.neighbors(1), g.neighbors(1));
        assert_eq!(view.edge_count(), 1);
    }

    #[test]
    fn test_load_edges_default_method() {
        let mut g = SparseStore::new(GraphKind::directed());
        g.load_edges(vec![(1, 2, 1.0), (2, 3, 2.0)]);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
        g.add_unweighted_edge(3, 4);
        assert_eq!(g.weight(3, 4), Some(DEFAULT_WEIGHT));
    }
}
