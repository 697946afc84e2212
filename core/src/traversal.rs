use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::config::TraversalLimits;
use crate::error::{GraphError, Result};
use crate::graph::{GraphView, VertexId};

/// Hop distances and BFS-tree parents from a single start vertex.
///
/// Vertices the search never reached are absent from both maps; absence means
/// "unreachable". The start vertex maps to distance 0 and parent `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BfsResult {
    pub distances: HashMap<VertexId, usize>,
    pub parents: HashMap<VertexId, Option<VertexId>>,
}

impl BfsResult {
    /// Number of vertices reached, start included.
    pub fn visited(&self) -> usize {
        self.distances.len()
    }

    /// Path from the start to `end`, both inclusive, if `end` was reached.
    pub fn path_to(&self, end: VertexId) -> Option<Vec<VertexId>> {
        if !self.distances.contains_key(&end) {
            return None;
        }
        Some(reconstruct_path(&self.parents, end))
    }
}

/// Walk parent pointers back from `end` and reverse.
///
/// `end` must have been reached; the walk stops at the first vertex whose
/// parent is `None` (the start).
pub(crate) fn reconstruct_path(
    parents: &HashMap<VertexId, Option<VertexId>>,
    end: VertexId,
) -> Vec<VertexId> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&Some(parent)) = parents.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

/// Breadth-first search from `start`.
///
/// Level-order over `neighbors`; each vertex is recorded once, at its minimum
/// hop distance. A `start` that is not in the graph yields empty maps.
pub fn bfs<G: GraphView + ?Sized>(graph: &G, start: VertexId) -> BfsResult {
    let mut result = BfsResult::default();
    if !graph.has_vertex(start) {
        return result;
    }

    let mut queue = VecDeque::new();
    result.distances.insert(start, 0);
    result.parents.insert(start, None);
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        for (next, _) in graph.neighbors(current) {
            if !result.distances.contains_key(&next) {
                result.distances.insert(next, depth + 1);
                result.parents.insert(next, Some(current));
                queue.push_back((next, depth + 1));
            }
        }
    }

    debug!(start, visited = result.visited(), "bfs complete");
    result
}

/// Fewest-hop path from `start` to `end`, both inclusive.
///
/// Returns `None` if `end` is unreachable or either vertex is unknown.
pub fn bfs_path<G: GraphView + ?Sized>(
    graph: &G,
    start: VertexId,
    end: VertexId,
) -> Option<Vec<VertexId>> {
    bfs(graph, start).path_to(end)
}

/// State threaded through the recursive walk.
struct DfsContext<'g, G: ?Sized> {
    graph: &'g G,
    visited: HashSet<VertexId>,
    order: Vec<VertexId>,
    limit: usize,
}

impl<G: GraphView + ?Sized> DfsContext<'_, G> {
    fn visit(&mut self, vertex: VertexId, depth: usize) -> Result<()> {
        if depth > self.limit {
            return Err(GraphError::RecursionLimit { limit: self.limit });
        }
        self.visited.insert(vertex);
        self.order.push(vertex);
        for (next, _) in self.graph.neighbors(vertex) {
            if !self.visited.contains(&next) {
                self.visit(next, depth + 1)?;
            }
        }
        Ok(())
    }
}

/// Depth-first preorder from `start` using call-stack recursion.
///
/// This is the reference walk that [`dfs_iterative`] is checked against. One
/// stack frame is used per vertex on the current path, so depth is capped by
/// [`TraversalLimits::default`]; a longer path fails with
/// [`GraphError::RecursionLimit`] instead of overflowing the thread stack.
pub fn dfs_recursive<G: GraphView + ?Sized>(graph: &G, start: VertexId) -> Result<Vec<VertexId>> {
    dfs_recursive_with_limits(graph, start, TraversalLimits::default())
}

/// [`dfs_recursive`] with an explicit depth bound.
pub fn dfs_recursive_with_limits<G: GraphView + ?Sized>(
    graph: &G,
    start: VertexId,
    limits: TraversalLimits,
) -> Result<Vec<VertexId>> {
    if !graph.has_vertex(start) {
        return Ok(Vec::new());
    }
    let mut ctx = DfsContext {
        graph,
        visited: HashSet::new(),
        order: Vec::new(),
        limit: limits.max_recursion_depth,
    };
    ctx.visit(start, 1)?;
    Ok(ctx.order)
}

/// Depth-first preorder from `start` using an explicit stack.
///
/// Neighbors are pushed in reverse enumeration order, so the visitation order
/// is identical to [`dfs_recursive`]. Safe on arbitrarily deep graphs.
pub fn dfs_iterative<G: GraphView + ?Sized>(graph: &G, start: VertexId) -> Vec<VertexId> {
    if !graph.has_vertex(start) {
        return Vec::new();
    }
    let mut visited = HashSet::new();
    walk_from(graph, start, &mut visited)
}

/// Iterative DFS from `start`, skipping anything already in `visited`.
fn walk_from<G: GraphView + ?Sized>(
    graph: &G,
    start: VertexId,
    visited: &mut HashSet<VertexId>,
) -> Vec<VertexId> {
    let mut order = Vec::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        order.push(current);
        for (next, _) in graph.neighbors(current).into_iter().rev() {
            if !visited.contains(&next) {
                stack.push(next);
            }
        }
    }

    order
}

/// Partition every vertex into DFS-reachable groups.
///
/// Starts a fresh iterative DFS at each vertex, in `vertices()` order, that no
/// earlier walk reached. Every vertex appears in exactly one group. Reachability
/// follows `neighbors` only; see [`find_connected_components`] for weak
/// components of directed graphs.
///
/// [`find_connected_components`]: crate::find_connected_components
pub fn dfs_all_components<G: GraphView + ?Sized>(graph: &G) -> Vec<Vec<VertexId>> {
    let mut visited = HashSet::with_capacity(graph.vertex_count());
    let mut components = Vec::new();

    for vertex in graph.vertices() {
        if !visited.contains(&vertex) {
            components.push(walk_from(graph, vertex, &mut visited));
        }
    }

    debug!(components = components.len(), "component scan complete");
    components
}
