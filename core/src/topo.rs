use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{GraphView, VertexId};

fn require_directed<G: GraphView + ?Sized>(graph: &G, operation: &'static str) -> Result<()> {
    if graph.is_directed() {
        Ok(())
    } else {
        Err(GraphError::InvalidOperation {
            operation,
            reason: "topological order is only defined for directed graphs",
        })
    }
}

/// Topological order by Kahn's algorithm.
///
/// In-degrees come from one scan over every adjacency list; the queue is
/// seeded with zero in-degree vertices in `vertices()` order. Returns
/// `Ok(None)` if the graph has a cycle (no partial order is returned) and
/// `Err(InvalidOperation)` for an undirected graph.
pub fn topological_sort<G: GraphView + ?Sized>(graph: &G) -> Result<Option<Vec<VertexId>>> {
    require_directed(graph, "topological_sort")?;

    let vertices = graph.vertices();
    let mut in_degree: HashMap<VertexId, usize> = vertices.iter().map(|&v| (v, 0)).collect();
    for &u in &vertices {
        for (v, _) in graph.neighbors(u) {
            *in_degree.entry(v).or_insert(0) += 1;
        }
    }

    let mut queue: VecDeque<VertexId> = vertices
        .iter()
        .copied()
        .filter(|v| in_degree.get(v) == Some(&0))
        .collect();
    let mut order = Vec::with_capacity(vertices.len());

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for (next, _) in graph.neighbors(current) {
            if let Some(degree) = in_degree.get_mut(&next) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(next);
                }
            }
        }
    }

    if order.len() < vertices.len() {
        debug!(
            ordered = order.len(),
            vertices = vertices.len(),
            "cycle detected, no topological order"
        );
        return Ok(None);
    }
    Ok(Some(order))
}

/// One vertex on the explicit DFS stack and how far through its neighbors
/// the walk has got.
struct Frame {
    vertex: VertexId,
    neighbors: Vec<VertexId>,
    next: usize,
}

impl Frame {
    fn new<G: GraphView + ?Sized>(graph: &G, vertex: VertexId) -> Self {
        Self {
            vertex,
            neighbors: graph.neighbors(vertex).into_iter().map(|(n, _)| n).collect(),
            next: 0,
        }
    }
}

/// Topological order by depth-first post-order, reversed.
///
/// Keeps a visited set plus an on-path set so a back edge (a cycle) is
/// detected in O(1); the walk then stops and returns `Ok(None)`. Frames live
/// on a heap-allocated stack, so path length is not bounded by the thread
/// stack. Undirected graphs yield `Err(InvalidOperation)`.
pub fn topological_sort_dfs<G: GraphView + ?Sized>(graph: &G) -> Result<Option<Vec<VertexId>>> {
    require_directed(graph, "topological_sort_dfs")?;

    let vertices = graph.vertices();
    let mut visited: HashSet<VertexId> = HashSet::with_capacity(vertices.len());
    let mut on_path: HashSet<VertexId> = HashSet::new();
    let mut finished = Vec::with_capacity(vertices.len());
    let mut stack: Vec<Frame> = Vec::new();

    for root in vertices {
        if !visited.insert(root) {
            continue;
        }
        on_path.insert(root);
        stack.push(Frame::new(graph, root));

        while let Some(frame) = stack.last_mut() {
            let next = frame.neighbors.get(frame.next).copied();
            match next {
                Some(next) => {
                    frame.next += 1;
                    if on_path.contains(&next) {
                        debug!(at = next, "back edge found, no topological order");
                        return Ok(None);
                    }
                    if visited.insert(next) {
                        on_path.insert(next);
                        stack.push(Frame::new(graph, next));
                    }
                }
                None => {
                    let done = frame.vertex;
                    stack.pop();
                    on_path.remove(&done);
                    finished.push(done);
                }
            }
        }
    }

    finished.reverse();
    Ok(Some(finished))
}
