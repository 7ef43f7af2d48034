//! Dijkstra shortest-path trace generator.

use crate::algorithm::{Algorithm, TraceGenerator};
use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::step::{
    NodeDistance, ShortestPathStep, Snapshot, StepDetail, StepKind, StepTrace, TraceRecorder,
};
use crate::traversal::GraphQuery;

/// Tentative distances indexed like `graph.nodes`.
struct Distances<'g> {
    graph: &'g Graph,
    best: Vec<Option<u64>>,
    visited: Vec<NodeId>,
}

impl<'g> Distances<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            best: vec![None; graph.node_count()],
            visited: Vec::new(),
        }
    }

    fn get(&self, node: NodeId) -> Option<u64> {
        self.graph.index_of(node).and_then(|i| self.best[i])
    }

    fn set(&mut self, node: NodeId, distance: u64) {
        if let Some(i) = self.graph.index_of(node) {
            self.best[i] = Some(distance);
        }
    }

    fn is_visited(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }

    /// Closest reached, unvisited node. Ties go to the earliest in node order.
    fn closest_unvisited(&self) -> Option<(NodeId, u64)> {
        let mut closest: Option<(NodeId, u64)> = None;
        for (node, best) in self.graph.nodes.iter().zip(&self.best) {
            let Some(distance) = *best else { continue };
            if self.is_visited(node.id) {
                continue;
            }
            if closest.map_or(true, |(_, d)| distance < d) {
                closest = Some((node.id, distance));
            }
        }
        closest
    }

    fn detail(&self, current: Option<NodeId>) -> StepDetail {
        let distances = self
            .graph
            .nodes
            .iter()
            .zip(&self.best)
            .map(|(node, &distance)| NodeDistance {
                node: node.id,
                distance,
            })
            .collect();
        StepDetail::ShortestPath(ShortestPathStep {
            current,
            visited: self.visited.clone(),
            distances,
        })
    }
}

/// Single-source shortest distances over directed `source -> target` edges.
///
/// Each round visits the closest unvisited node and relaxes its edges to
/// unvisited neighbours, recording a step for every strict improvement. The
/// run stops when every node is visited or nothing reachable remains.
pub fn dijkstra(graph: &Graph, start: NodeId) -> Result<StepTrace> {
    let mut recorder = TraceRecorder::new(Algorithm::Dijkstra);
    let snapshot = || Snapshot::Graph(graph.clone());

    if !graph.check_start(start)? {
        return recorder.finish(
            StepKind::Completed,
            "Graph is empty, nothing to do",
            snapshot(),
            Distances::new(graph).detail(None),
        );
    }

    let mut distances = Distances::new(graph);
    distances.set(start, 0);
    recorder.push(
        StepKind::Start,
        format!("Starting at node {}", graph.label(start)),
        snapshot(),
        distances.detail(Some(start)),
    );

    while distances.visited.len() < graph.node_count() {
        let Some((current, base)) = distances.closest_unvisited() else {
            break;
        };

        distances.visited.push(current);
        recorder.push(
            StepKind::Visit,
            format!("Visiting node {}", graph.label(current)),
            snapshot(),
            distances.detail(Some(current)),
        );

        for edge in graph.out_edges(current) {
            if distances.is_visited(edge.target) {
                continue;
            }
            let candidate = base.saturating_add(edge.weight);
            if distances.get(edge.target).map_or(true, |known| candidate < known) {
                distances.set(edge.target, candidate);
                recorder.push(
                    StepKind::UpdateDistance,
                    format!(
                        "Updating distance to node {} to {}",
                        graph.label(edge.target),
                        candidate
                    ),
                    snapshot(),
                    distances.detail(Some(current)),
                );
            }
        }
    }

    recorder.finish(
        StepKind::Completed,
        "Dijkstra's algorithm completed",
        snapshot(),
        distances.detail(None),
    )
}

/// [`dijkstra`] as a [`TraceGenerator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl TraceGenerator for Dijkstra {
    type Input = GraphQuery;
    const ALGORITHM: Algorithm = Algorithm::Dijkstra;

    fn generate(&self, input: &GraphQuery) -> Result<StepTrace> {
        dijkstra(&input.graph, input.start)
    }
}
