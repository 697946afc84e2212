use std::collections::HashMap;
use std::fmt;

use tracing::{trace, warn};

use crate::config::{GraphKind, GrowthPolicy};
use crate::graph::{fmt_store, Edge, GraphStore, GraphView, VertexId, Weight};

/// Adjacency-matrix store.
///
/// Cells live in a flat row-major `Vec` whose row stride is `capacity`; only
/// the top-left `vertex_count × vertex_count` block is meaningful. A vertex's
/// row/column index is its insertion position, so neighbor enumeration
/// follows vertex insertion order.
///
/// Cost model: `add_edge`, `remove_edge`, `has_edge` and `weight` are O(1);
/// `neighbors` is O(V); `edges` is O(V²). Under [`GrowthPolicy::Exact`] every
/// new vertex reallocates and copies the whole matrix, which is O(V²) per
/// `add_vertex`. [`GrowthPolicy::Doubling`] amortises that to O(V).
#[derive(Debug, Clone)]
pub struct DenseStore {
    kind: GraphKind,
    growth: GrowthPolicy,
    index: HashMap<VertexId, usize>,
    vertices: Vec<VertexId>,
    matrix: Vec<Option<Weight>>,
    capacity: usize,
    edge_count: usize,
}

impl DenseStore {
    pub fn new(kind: GraphKind) -> Self {
        Self::with_growth(kind, GrowthPolicy::default())
    }

    pub fn with_growth(kind: GraphKind, growth: GrowthPolicy) -> Self {
        Self {
            kind,
            growth,
            index: HashMap::new(),
            vertices: Vec::new(),
            matrix: Vec::new(),
            capacity: 0,
            edge_count: 0,
        }
    }

    /// Pre-size the matrix for `vertex_count` vertices so the first
    /// `vertex_count` additions never reallocate.
    pub fn with_capacity(kind: GraphKind, vertex_count: usize) -> Self {
        Self::with_capacity_and_growth(kind, vertex_count, GrowthPolicy::default())
    }

    /// Like [`DenseStore::with_capacity`] with an explicit growth policy.
    ///
    /// If `vertex_count²` cells overflow `usize` or cannot be allocated, the
    /// store starts empty and grows on demand instead.
    pub fn with_capacity_and_growth(
        kind: GraphKind,
        vertex_count: usize,
        growth: GrowthPolicy,
    ) -> Self {
        let mut store = Self::with_growth(kind, growth);
        match vertex_count.checked_mul(vertex_count) {
            Some(cells) if store.matrix.try_reserve_exact(cells).is_ok() => {
                store.matrix.resize(cells, None);
                store.capacity = vertex_count;
                store.index.reserve(vertex_count);
                store.vertices.reserve(vertex_count);
            }
            _ => warn!(vertex_count, "dense matrix too large to pre-size, growing on demand"),
        }
        store
    }

    pub fn from_edges<I>(kind: GraphKind, edges: I) -> Self
    where
        I: IntoIterator<Item = (VertexId, VertexId, Weight)>,
    {
        let mut store = Self::new(kind);
        store.load_edges(edges);
        store
    }

    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    /// Number of rows (and columns) currently allocated.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let matrix_mem = self.matrix.len() * size_of::<Option<Weight>>();
        let vertex_mem = self.vertices.capacity() * size_of::<VertexId>();
        let index_mem = self.index.len() * (size_of::<VertexId>() + size_of::<usize>() + 8);

        matrix_mem + vertex_mem + index_mem
    }

    fn cell(&self, row: usize, col: usize) -> Option<Weight> {
        self.matrix[row * self.capacity + col]
    }

    fn set_cell(&mut self, row: usize, col: usize, value: Option<Weight>) {
        self.matrix[row * self.capacity + col] = value;
    }

    fn slots(&self, u: VertexId, v: VertexId) -> Option<(usize, usize)> {
        Some((*self.index.get(&u)?, *self.index.get(&v)?))
    }

    /// Reallocate the matrix and copy the live block into it.
    fn grow(&mut self) {
        let new_capacity = match self.growth {
            GrowthPolicy::Exact => self.capacity + 1,
            GrowthPolicy::Doubling => (self.capacity * 2).max(1),
        };
        let live = self.vertices.len();

        let mut matrix = vec![None; new_capacity * new_capacity];
        for row in 0..live {
            let old = row * self.capacity;
            let new = row * new_capacity;
            matrix[new..new + live].copy_from_slice(&self.matrix[old..old + live]);
        }

        trace!(
            from = self.capacity,
            to = new_capacity,
            copied = live * live,
            "dense matrix reallocated"
        );
        self.matrix = matrix;
        self.capacity = new_capacity;
    }
}

impl GraphView for DenseStore {
    fn kind(&self) -> GraphKind {
        self.kind
    }

    fn has_vertex(&self, v: VertexId) -> bool {
        self.index.contains_key(&v)
    }

    fn weight(&self, u: VertexId, v: VertexId) -> Option<Weight> {
        let (i, j) = self.slots(u, v)?;
        self.cell(i, j)
    }

    fn neighbors(&self, v: VertexId) -> Vec<(VertexId, Weight)> {
        let Some(&row) = self.index.get(&v) else {
            return Vec::new();
        };
        (0..self.vertices.len())
            .filter_map(|col| self.cell(row, col).map(|w| (self.vertices[col], w)))
            .collect()
    }

    fn vertices(&self) -> Vec<VertexId> {
        self.vertices.clone()
    }

    fn edges(&self) -> Vec<Edge> {
        let live = self.vertices.len();
        let mut edges = Vec::with_capacity(self.edge_count);
        for row in 0..live {
            // Undirected: the matrix is symmetric, read the upper triangle only.
            let first = if self.kind.directed { 0 } else { row };
            for col in first..live {
                if let Some(w) = self.cell(row, col) {
                    edges.push(Edge::new(self.vertices[row], self.vertices[col], w));
                }
            }
        }
        edges
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }
}

impl GraphStore for DenseStore {
    fn add_vertex(&mut self, v: VertexId) {
        if self.index.contains_key(&v) {
            return;
        }
        if self.vertices.len() == self.capacity {
            self.grow();
        }
        self.index.insert(v, self.vertices.len());
        self.vertices.push(v);
    }

    fn add_edge(&mut self, u: VertexId, v: VertexId, weight: Weight) {
        self.add_vertex(u);
        self.add_vertex(v);
        let i = self.index[&u];
        let j = self.index[&v];

        let is_new = self.cell(i, j).is_none();
        self.set_cell(i, j, Some(weight));
        if !self.kind.directed {
            self.set_cell(j, i, Some(weight));
        }
        if is_new {
            self.edge_count += 1;
        }
    }

    fn remove_edge(&mut self, u: VertexId, v: VertexId) {
        let Some((i, j)) = self.slots(u, v) else {
            return;
        };
        if self.cell(i, j).is_none() {
            return;
        }
        self.set_cell(i, j, None);
        if !self.kind.directed {
            self.set_cell(j, i, None);
        }
        self.edge_count -= 1;
    }
}

impl fmt::Display for DenseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_store(f, "DenseStore", self)
    }
}
