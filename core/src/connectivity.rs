use crate::graph::{GraphView, VertexId, WeakView};
use crate::traversal::dfs_all_components;

/// Connected components, each listed in DFS visitation order.
///
/// For directed graphs these are *weakly* connected components: edge direction
/// is ignored. Strongly connected components are not computed here.
pub fn find_connected_components<G: GraphView + ?Sized>(graph: &G) -> Vec<Vec<VertexId>> {
    if graph.is_directed() {
        dfs_all_components(&WeakView::new(graph))
    } else {
        dfs_all_components(graph)
    }
}

/// True if every vertex lies in a single (weak) component.
///
/// The empty graph is vacuously connected.
pub fn is_connected<G: GraphView + ?Sized>(graph: &G) -> bool {
    graph.vertex_count() == 0 || find_connected_components(graph).len() == 1
}
