//! graph-engine-core: dense and sparse graph stores plus classical algorithms.
//!
//! Two interchangeable backends, [`DenseStore`] (adjacency matrix) and
//! [`SparseStore`] (adjacency list), implement the same [`GraphStore`]
//! contract. Every algorithm is written against the read-only [`GraphView`]
//! trait, borrows the graph for the duration of one call, and returns owned
//! results, so the same call gives the same answer on either backend.
//!
//! ```
//! use graph_engine_core::{dijkstra_path, GraphKind, GraphStore, SparseStore};
//!
//! let mut g = SparseStore::new(GraphKind::undirected().with_weights());
//! g.add_edge(1, 2, 2.0);
//! g.add_edge(1, 4, 1.0);
//! g.add_edge(4, 5, 1.0);
//! g.add_edge(2, 5, 4.0);
//!
//! assert_eq!(dijkstra_path(&g, 1, 5), Some((vec![1, 4, 5], 2.0)));
//! ```
//!
//! Single-threaded: stores need `&mut` to change and carry no
//! internal locking. Wrap one in a lock if it must be shared while mutated.

mod config;
mod connectivity;
mod dense;
mod error;
mod graph;
mod shortest_path;
mod sparse;
mod topo;
mod traversal;

pub use config::{GraphKind, GrowthPolicy, TraversalLimits};
pub use connectivity::{find_connected_components, is_connected};
pub use dense::DenseStore;
pub use error::{GraphError, Result};
pub use graph::{Edge, GraphStore, GraphView, VertexId, WeakView, Weight, DEFAULT_WEIGHT};
pub use shortest_path::{dijkstra, dijkstra_path, DijkstraResult};
pub use sparse::SparseStore;
pub use topo::{topological_sort, topological_sort_dfs};
pub use traversal::{
    bfs, bfs_path, dfs_all_components, dfs_iterative, dfs_recursive, dfs_recursive_with_limits,
    BfsResult,
};
