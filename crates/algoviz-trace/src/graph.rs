//! Graph model consumed by the traversal, shortest-path and spanning-tree
//! generators.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A unique node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Layout hint for drawing a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    /// Where the renderer should place the node, if the input said so.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// An edge between two nodes.
///
/// Traversal and Dijkstra follow edges from `source` to `target`; Prim treats
/// them as undirected. `weight` is ignored by the unweighted traversals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub weight: u64,
}

impl Edge {
    /// Create a weighted edge.
    pub const fn new(source: NodeId, target: NodeId, weight: u64) -> Self {
        Self { source, target, weight }
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// Node and edge collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with one node per label, ids assigned `0..n` in order.
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let nodes = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| Node {
                id: NodeId(i),
                label: label.into(),
                position: None,
            })
            .collect();
        Self { nodes, edges: Vec::new() }
    }

    /// Append an edge. Endpoints are checked by [`Graph::validate`].
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: u64) -> &mut Self {
        self.edges.push(Edge::new(source, target, weight));
        self
    }

    /// Builder form of [`Graph::add_edge`].
    pub fn with_edge(mut self, source: usize, target: usize, weight: u64) -> Self {
        self.add_edge(NodeId(source), NodeId(target), weight);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Position of `id` in the node list.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    /// Display label for a node, falling back to its numeric id.
    pub fn label(&self, id: NodeId) -> String {
        self.node(id)
            .map(|n| n.label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Find a node by its label.
    pub fn find_label(&self, label: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.label == label)
    }

    /// Edges leaving `id`, in edge-list order.
    pub fn out_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.source == id)
    }

    /// Check that node ids are unique and every edge endpoint exists.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id) {
                return Err(Error::DuplicateNode(node.id));
            }
        }

        for edge in &self.edges {
            if !ids.contains(&edge.source) || !ids.contains(&edge.target) {
                return Err(Error::DanglingEdge {
                    from: edge.source,
                    to: edge.target,
                });
            }
        }

        Ok(())
    }

    /// Check that `start` can seed a traversal of this graph.
    ///
    /// Returns `Ok(false)` for an empty graph, which generators turn into a
    /// trivial trace.
    pub(crate) fn check_start(&self, start: NodeId) -> Result<bool> {
        self.validate()?;
        if self.is_empty() {
            return Ok(false);
        }
        if !self.contains(start) {
            return Err(Error::UnknownStartNode(start));
        }
        Ok(true)
    }

    /// The five-node weighted graph used by the Dijkstra and Prim pages.
    ///
    /// Edges: A-B:4, A-C:2, B-D:5, C-E:3, D-E:1.
    pub fn sample_weighted() -> Self {
        Self::with_labels(["A", "B", "C", "D", "E"])
            .with_edge(0, 1, 4)
            .with_edge(0, 2, 2)
            .with_edge(1, 3, 5)
            .with_edge(2, 4, 3)
            .with_edge(3, 4, 1)
    }

    /// The four-node directed cycle used by the DFS page.
    pub fn sample_cycle() -> Self {
        let mut graph = Self::with_labels(["0", "1", "2", "3"])
            .with_edge(0, 1, 1)
            .with_edge(1, 2, 1)
            .with_edge(2, 3, 1)
            .with_edge(3, 0, 1);
        let layout = [(100.0, 100.0), (200.0, 200.0), (300.0, 100.0), (400.0, 200.0)];
        for (node, (x, y)) in graph.nodes.iter_mut().zip(layout) {
            node.position = Some(Position { x, y });
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_get_sequential_ids() {
        let graph = Graph::with_labels(["A", "B", "C"]);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.nodes[2].id, NodeId(2));
        assert_eq!(graph.label(NodeId(1)), "B");
        assert_eq!(graph.label(NodeId(9)), "9");
    }

    #[test]
    fn out_edges_keep_list_order() {
        let graph = Graph::with_labels(["A", "B", "C"])
            .with_edge(0, 2, 1)
            .with_edge(1, 0, 1)
            .with_edge(0, 1, 1);

        let targets: Vec<_> = graph.out_edges(NodeId(0)).map(|e| e.target).collect();
        assert_eq!(targets, vec![NodeId(2), NodeId(1)]);
    }

    #[test]
    fn validate_rejects_dangling_edge() {
        let graph = Graph::with_labels(["A"]).with_edge(0, 7, 1);
        assert!(matches!(
            graph.validate(),
            Err(Error::DanglingEdge { from: NodeId(0), to: NodeId(7) })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let mut graph = Graph::with_labels(["A", "B"]);
        graph.nodes[1].id = NodeId(0);
        assert!(matches!(graph.validate(), Err(Error::DuplicateNode(NodeId(0)))));
    }

    #[test]
    fn check_start_on_empty_graph() {
        assert!(!Graph::new().check_start(NodeId(3)).unwrap());
        assert!(matches!(
            Graph::sample_weighted().check_start(NodeId(9)),
            Err(Error::UnknownStartNode(NodeId(9)))
        ));
    }

    #[test]
    fn samples_are_valid() {
        Graph::sample_weighted().validate().unwrap();
        Graph::sample_cycle().validate().unwrap();
        assert!(Graph::sample_cycle().nodes.iter().all(|n| n.position.is_some()));
    }
}
