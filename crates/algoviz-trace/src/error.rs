//! Error types for algoviz-trace.

use thiserror::Error;

use crate::algorithm::Algorithm;
use crate::graph::NodeId;

/// Result type for trace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing input or generating traces.
///
/// "Target not found" and "graph is empty" are not errors; they end a trace
/// with a terminal step instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A value token could not be parsed as a finite number.
    #[error("invalid input: {token:?} is not a number")]
    InvalidNumber { token: String },

    /// An edge specification did not follow `source-target[:weight]`.
    #[error("invalid edge {spec:?}: {reason}")]
    InvalidEdge { spec: String, reason: &'static str },

    /// An edge refers to a label that is not in the node list.
    #[error("unknown node label {0:?}")]
    UnknownLabel(String),

    /// Two nodes share the same id.
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    /// An edge references a node id that does not exist.
    #[error("edge {from}->{to} references a missing node")]
    DanglingEdge { from: NodeId, to: NodeId },

    /// The start node of a graph algorithm is not part of the graph.
    #[error("start node {0} is not in the graph")]
    UnknownStartNode(NodeId),

    /// A trace must contain at least one step.
    #[error("a step trace cannot be empty")]
    EmptyTrace,

    /// The input shape does not match what the algorithm consumes.
    #[error("{algorithm} expects {expected} input")]
    InputMismatch {
        algorithm: Algorithm,
        expected: &'static str,
    },

    /// Export encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
