use thiserror::Error;

/// Errors raised for caller misuse.
///
/// Missing vertices, missing edges and unreachable targets are not errors:
/// those surface as `None` or as absent map entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The operation is not defined for this kind of graph.
    #[error("invalid operation `{operation}`: {reason}")]
    InvalidOperation {
        operation: &'static str,
        reason: &'static str,
    },

    /// The recursive DFS reference walk went deeper than its configured bound.
    #[error("recursion depth exceeded the limit of {limit} frames")]
    RecursionLimit { limit: usize },
}

pub type Result<T> = std::result::Result<T, GraphError>;
