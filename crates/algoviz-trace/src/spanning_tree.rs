//! Prim minimum spanning tree trace generator.

use std::collections::HashSet;

use crate::algorithm::{Algorithm, TraceGenerator};
use crate::error::Result;
use crate::graph::{Edge, Graph, NodeId};
use crate::step::{Snapshot, SpanningTreeStep, StepDetail, StepKind, StepTrace, TraceRecorder};
use crate::traversal::GraphQuery;

fn detail(visited: &[NodeId], mst_edges: &[Edge]) -> StepDetail {
    StepDetail::SpanningTree(SpanningTreeStep {
        visited: visited.to_vec(),
        mst_edges: mst_edges.to_vec(),
    })
}

/// Lightest edge with exactly one visited endpoint.
///
/// Scans the whole edge list; on equal weights the first edge listed wins.
fn lightest_crossing_edge<'g>(graph: &'g Graph, visited: &HashSet<NodeId>) -> Option<&'g Edge> {
    let mut lightest: Option<&Edge> = None;
    for edge in &graph.edges {
        let crosses = visited.contains(&edge.source) != visited.contains(&edge.target);
        if crosses && lightest.map_or(true, |best| edge.weight < best.weight) {
            lightest = Some(edge);
        }
    }
    lightest
}

/// Grow a spanning tree from `start`, treating edges as undirected.
///
/// Stops when every node is in the tree or no edge crosses the cut, so a
/// disconnected graph yields the spanning tree of `start`'s component.
pub fn prim(graph: &Graph, start: NodeId) -> Result<StepTrace> {
    let mut recorder = TraceRecorder::new(Algorithm::Prim);
    let snapshot = || Snapshot::Graph(graph.clone());

    if !graph.check_start(start)? {
        return recorder.finish(
            StepKind::Completed,
            "Graph is empty, nothing to do",
            snapshot(),
            detail(&[], &[]),
        );
    }

    let mut in_tree = HashSet::from([start]);
    let mut visited = vec![start];
    let mut mst_edges: Vec<Edge> = Vec::new();

    recorder.push(
        StepKind::Start,
        format!("Starting at node {}", graph.label(start)),
        snapshot(),
        detail(&visited, &mst_edges),
    );

    while in_tree.len() < graph.node_count() {
        let Some(&edge) = lightest_crossing_edge(graph, &in_tree) else {
            break;
        };

        mst_edges.push(edge);
        for endpoint in [edge.source, edge.target] {
            if in_tree.insert(endpoint) {
                visited.push(endpoint);
            }
        }

        recorder.push(
            StepKind::AddEdge,
            format!(
                "Adding edge {}-{} to MST",
                graph.label(edge.source),
                graph.label(edge.target)
            ),
            snapshot(),
            detail(&visited, &mst_edges),
        );
    }

    recorder.finish(
        StepKind::Completed,
        "Prim's algorithm completed",
        snapshot(),
        detail(&visited, &mst_edges),
    )
}

/// [`prim`] as a [`TraceGenerator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Prim;

impl TraceGenerator for Prim {
    type Input = GraphQuery;
    const ALGORITHM: Algorithm = Algorithm::Prim;

    fn generate(&self, input: &GraphQuery) -> Result<StepTrace> {
        prim(&input.graph, input.start)
    }
}
