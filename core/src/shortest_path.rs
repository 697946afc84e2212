use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::graph::{GraphView, VertexId};
use crate::traversal::reconstruct_path;

/// Weighted distances and shortest-path-tree parents from a single start.
///
/// Every vertex of the graph has an entry. Unreachable vertices keep distance
/// `f64::INFINITY` and parent `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DijkstraResult {
    pub distances: HashMap<VertexId, f64>,
    pub parents: HashMap<VertexId, Option<VertexId>>,
}

impl DijkstraResult {
    pub fn is_reachable(&self, v: VertexId) -> bool {
        self.distances.get(&v).is_some_and(|d| d.is_finite())
    }

    /// Path from the start to `end` and its total weight, if `end` was reached.
    pub fn path_to(&self, end: VertexId) -> Option<(Vec<VertexId>, f64)> {
        let distance = *self.distances.get(&end)?;
        if !distance.is_finite() {
            return None;
        }
        Some((reconstruct_path(&self.parents, end), distance))
    }
}

/// Heap entry. `Ord` is reversed so `BinaryHeap` pops the smallest distance;
/// equal distances pop the smaller vertex id first.
#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    distance: f64,
    vertex: VertexId,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's single-source shortest paths.
///
/// Weights must be non-negative. That precondition is not enforced: a negative
/// weight is logged once and the results are unspecified. A vertex is final
/// once popped from the queue; stale queue entries are skipped on pop rather
/// than removed. Complexity O((V + E) log V).
pub fn dijkstra<G: GraphView + ?Sized>(graph: &G, start: VertexId) -> DijkstraResult {
    let vertices = graph.vertices();
    let mut result = DijkstraResult {
        distances: vertices.iter().map(|&v| (v, f64::INFINITY)).collect(),
        parents: vertices.iter().map(|&v| (v, None)).collect(),
    };
    if !graph.has_vertex(start) {
        return result;
    }

    let mut finalized: HashSet<VertexId> = HashSet::with_capacity(vertices.len());
    let mut heap = BinaryHeap::new();
    let mut warned = false;

    result.distances.insert(start, 0.0);
    heap.push(QueueEntry {
        distance: 0.0,
        vertex: start,
    });

    while let Some(QueueEntry { distance, vertex }) = heap.pop() {
        if !finalized.insert(vertex) {
            continue;
        }

        for (next, weight) in graph.neighbors(vertex) {
            if weight < 0.0 && !warned {
                warn!(from = vertex, to = next, weight, "negative edge weight passed to dijkstra");
                warned = true;
            }
            if finalized.contains(&next) {
                continue;
            }

            let candidate = distance + weight;
            let best = result.distances.get(&next).copied().unwrap_or(f64::INFINITY);
            if candidate < best {
                result.distances.insert(next, candidate);
                result.parents.insert(next, Some(vertex));
                heap.push(QueueEntry {
                    distance: candidate,
                    vertex: next,
                });
            }
        }
    }

    debug!(start, reached = finalized.len(), "dijkstra complete");
    result
}

/// Lowest-weight path from `start` to `end` and its total weight.
///
/// Returns `None` if `end` is unknown or unreachable.
pub fn dijkstra_path<G: GraphView + ?Sized>(
    graph: &G,
    start: VertexId,
    end: VertexId,
) -> Option<(Vec<VertexId>, f64)> {
    dijkstra(graph, start).path_to(end)
}
