//! Breadth-first and depth-first traversal trace generators.

use std::collections::{HashSet, VecDeque};

use crate::algorithm::{Algorithm, TraceGenerator};
use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::step::{fmt_value, Snapshot, StepDetail, StepKind, StepTrace, TraceRecorder, TraversalStep};

/// A graph plus the node a graph algorithm starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQuery {
    pub graph: Graph,
    pub start: NodeId,
}

impl GraphQuery {
    pub fn new(graph: Graph, start: NodeId) -> Self {
        Self { graph, start }
    }
}

fn detail(current: Option<NodeId>, visited: &[NodeId], frontier: Vec<NodeId>) -> StepDetail {
    StepDetail::Traversal(TraversalStep {
        current,
        visited: visited.to_vec(),
        frontier,
    })
}

/// Level-order traversal of the complete binary tree encoded by `values`.
///
/// Node `i` has children `2i + 1` and `2i + 2`; node ids are array indices.
pub fn bfs(values: &[f64]) -> Result<StepTrace> {
    let mut recorder = TraceRecorder::new(Algorithm::Bfs);
    let snapshot = || Snapshot::Array(values.to_vec());
    let n = values.len();

    if n == 0 {
        return recorder.finish(
            StepKind::Completed,
            "Tree is empty, nothing to traverse",
            snapshot(),
            detail(None, &[], Vec::new()),
        );
    }

    let mut seen = vec![false; n];
    let mut visited = vec![NodeId(0)];
    let mut queue = VecDeque::from([0usize]);
    seen[0] = true;

    let frontier = |queue: &VecDeque<usize>| queue.iter().copied().map(NodeId).collect();
    recorder.push(
        StepKind::Start,
        "Starting BFS at root node",
        snapshot(),
        detail(Some(NodeId(0)), &visited, frontier(&queue)),
    );

    while let Some(current) = queue.pop_front() {
        recorder.push(
            StepKind::Visit,
            format!("Visiting node {}", fmt_value(values[current])),
            snapshot(),
            detail(Some(NodeId(current)), &visited, frontier(&queue)),
        );

        for (child, side) in [(2 * current + 1, "left"), (2 * current + 2, "right")] {
            if child < n && !seen[child] {
                seen[child] = true;
                visited.push(NodeId(child));
                queue.push_back(child);
                recorder.push(
                    StepKind::Discover,
                    format!("Discovered {side} child: {}", fmt_value(values[child])),
                    snapshot(),
                    detail(Some(NodeId(child)), &visited, frontier(&queue)),
                );
            }
        }
    }

    recorder.finish(
        StepKind::Completed,
        "BFS traversal completed",
        snapshot(),
        detail(None, &visited, Vec::new()),
    )
}

/// Iterative, stack-driven depth-first traversal from `start`.
///
/// Out-edge targets are pushed in edge-list order, so the last listed
/// neighbour is explored first. This is not recursive preorder.
pub fn dfs(graph: &Graph, start: NodeId) -> Result<StepTrace> {
    let mut recorder = TraceRecorder::new(Algorithm::Dfs);
    let snapshot = || Snapshot::Graph(graph.clone());

    if !graph.check_start(start)? {
        return recorder.finish(
            StepKind::Completed,
            "Graph is empty, nothing to traverse",
            snapshot(),
            detail(None, &[], Vec::new()),
        );
    }

    let mut seen = HashSet::new();
    let mut visited = Vec::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if !seen.insert(current) {
            continue;
        }
        visited.push(current);
        recorder.push(
            StepKind::Visit,
            format!("Visited node {}", graph.label(current)),
            snapshot(),
            detail(Some(current), &visited, stack.clone()),
        );

        for edge in graph.out_edges(current) {
            if !seen.contains(&edge.target) {
                stack.push(edge.target);
            }
        }
    }

    recorder.finish(
        StepKind::Completed,
        "DFS traversal completed",
        snapshot(),
        detail(None, &visited, Vec::new()),
    )
}

/// [`bfs`] as a [`TraceGenerator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Bfs;

impl TraceGenerator for Bfs {
    type Input = [f64];
    const ALGORITHM: Algorithm = Algorithm::Bfs;

    fn generate(&self, input: &[f64]) -> Result<StepTrace> {
        bfs(input)
    }
}

/// [`dfs`] as a [`TraceGenerator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Dfs;

impl TraceGenerator for Dfs {
    type Input = GraphQuery;
    const ALGORITHM: Algorithm = Algorithm::Dfs;

    fn generate(&self, input: &GraphQuery) -> Result<StepTrace> {
        dfs(&input.graph, input.start)
    }
}
