//! Algorithm Step Traces
//!
//! Runs a classic algorithm on a small input and records every meaningful
//! operation as a [`Step`]: a full snapshot of the data plus a description of
//! what just happened. The resulting [`StepTrace`] is immutable and
//! self-contained, so a player can jump to any position without replaying.
//!
//! # Families
//!
//! - **Search**: linear and binary search over an array
//! - **Sort**: bubble, heap, quick and merge sort
//! - **Traversal**: BFS over an array-encoded binary tree, DFS over a graph
//! - **Shortest path**: Dijkstra over directed weighted edges
//! - **Spanning tree**: Prim over undirected weighted edges
//!
//! # Usage
//!
//! ```
//! use algoviz_trace::{parse_values, Algorithm, TraceInput};
//!
//! let values = parse_values("8, 3, 1, 7").unwrap();
//! let trace = Algorithm::BubbleSort.generate(&TraceInput::Array(values)).unwrap();
//! assert_eq!(trace.last().array(), Some(&[1.0, 3.0, 7.0, 8.0][..]));
//! ```
//!
//! Generators are pure. No-result outcomes such as "target not found" end
//! the trace with a terminal step; only malformed input is an error.

mod algorithm;
mod error;
mod export;
mod graph;
mod input;
mod searching;
mod shortest_path;
mod sorting;
mod spanning_tree;
mod step;
mod traversal;

pub use algorithm::{Algorithm, Family, TraceGenerator, TraceInput};
pub use error::{Error, Result};
pub use export::{ExportDocument, ExportResult};
pub use graph::{Edge, Graph, Node, NodeId, Position};
pub use input::{
    parse_edges, parse_graph, parse_target, parse_values, random_graph, random_values,
    DEFAULT_EDGE_WEIGHT, RANDOM_EDGE_WEIGHT, RANDOM_GRAPH_NODES,
};
pub use searching::{binary_search, linear_search, BinarySearch, LinearSearch, SearchQuery};
pub use shortest_path::{dijkstra, Dijkstra};
pub use sorting::{bubble_sort, heap_sort, merge_sort, quick_sort, BubbleSort, HeapSort, MergeSort, QuickSort};
pub use spanning_tree::{prim, Prim};
pub use step::{
    NodeDistance, SearchRange, SearchStep, ShortestPathStep, Snapshot, SortStep, SpanningTreeStep,
    Step, StepDetail, StepKind, StepTrace, TraversalStep,
};
pub use traversal::{bfs, dfs, Bfs, Dfs, GraphQuery};
