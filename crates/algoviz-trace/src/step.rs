//! Step trace model.
//!
//! A [`StepTrace`] is the complete, ordered record of one algorithm run. Each
//! [`Step`] carries the full state of the structure at that instant, so a
//! player can jump to any position without replaying earlier steps.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, NodeId};

/// What happened at a step, in machine-readable form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Start,
    Compare,
    Swap,
    PlacePivot,
    Merge,
    AdjustRange,
    Found,
    NotFound,
    Visit,
    Discover,
    UpdateDistance,
    AddEdge,
    Completed,
}

/// Full state of the structure being operated on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Snapshot {
    Array(Vec<f64>),
    Graph(Graph),
}

/// Highlights for sorting steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortStep {
    /// Pair of indices being compared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparing: Option<[usize; 2]>,
    /// Pair of indices that were just exchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swapped: Option<[usize; 2]>,
    /// Index written during a merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed: Option<usize>,
}

/// Inclusive index bounds of a binary search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRange {
    pub low: usize,
    pub high: usize,
}

impl SearchRange {
    pub fn contains(&self, index: usize) -> bool {
        self.low <= index && index <= self.high
    }
}

/// Highlights for searching steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStep {
    /// Index under inspection (the midpoint for binary search).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_index: Option<usize>,
    /// Remaining candidate range; `None` for linear search or an exhausted range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SearchRange>,
}

/// State of a BFS or DFS traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<NodeId>,
    /// Visited nodes in discovery order.
    pub visited: Vec<NodeId>,
    /// Queue contents for BFS (front first), stack contents for DFS (top last).
    pub frontier: Vec<NodeId>,
}

/// Best known distance to a node; `None` means unreached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDistance {
    pub node: NodeId,
    pub distance: Option<u64>,
}

/// State of a Dijkstra run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<NodeId>,
    pub visited: Vec<NodeId>,
    /// One entry per node, in node-list order.
    pub distances: Vec<NodeDistance>,
}

impl ShortestPathStep {
    pub fn distance_to(&self, node: NodeId) -> Option<u64> {
        self.distances
            .iter()
            .find(|d| d.node == node)
            .and_then(|d| d.distance)
    }
}

/// State of a Prim run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanningTreeStep {
    pub visited: Vec<NodeId>,
    /// Edges accepted so far, in acceptance order.
    pub mst_edges: Vec<Edge>,
}

impl SpanningTreeStep {
    pub fn total_weight(&self) -> u64 {
        self.mst_edges.iter().map(|e| e.weight).sum()
    }
}

/// Algorithm-family specific part of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum StepDetail {
    Sort(SortStep),
    Search(SearchStep),
    Traversal(TraversalStep),
    ShortestPath(ShortestPathStep),
    SpanningTree(SpanningTreeStep),
}

/// One unit of algorithm progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    /// Human-readable description, shown and spoken to the user.
    pub action: String,
    pub snapshot: Snapshot,
    pub detail: StepDetail,
    /// Set on the final step only.
    #[serde(default)]
    pub terminal: bool,
}

impl Step {
    /// The array snapshot, if this step operates on an array.
    pub fn array(&self) -> Option<&[f64]> {
        match &self.snapshot {
            Snapshot::Array(values) => Some(values),
            Snapshot::Graph(_) => None,
        }
    }

    /// The graph snapshot, if this step operates on a graph.
    pub fn graph(&self) -> Option<&Graph> {
        match &self.snapshot {
            Snapshot::Graph(graph) => Some(graph),
            Snapshot::Array(_) => None,
        }
    }

    pub fn sort(&self) -> Option<&SortStep> {
        match &self.detail {
            StepDetail::Sort(s) => Some(s),
            _ => None,
        }
    }

    pub fn search(&self) -> Option<&SearchStep> {
        match &self.detail {
            StepDetail::Search(s) => Some(s),
            _ => None,
        }
    }

    pub fn traversal(&self) -> Option<&TraversalStep> {
        match &self.detail {
            StepDetail::Traversal(s) => Some(s),
            _ => None,
        }
    }

    pub fn shortest_path(&self) -> Option<&ShortestPathStep> {
        match &self.detail {
            StepDetail::ShortestPath(s) => Some(s),
            _ => None,
        }
    }

    pub fn spanning_tree(&self) -> Option<&SpanningTreeStep> {
        match &self.detail {
            StepDetail::SpanningTree(s) => Some(s),
            _ => None,
        }
    }

    /// Nodes visited so far, for the families that track them.
    pub fn visited_nodes(&self) -> &[NodeId] {
        match &self.detail {
            StepDetail::Traversal(s) => &s.visited,
            StepDetail::ShortestPath(s) => &s.visited,
            StepDetail::SpanningTree(s) => &s.visited,
            StepDetail::Sort(_) | StepDetail::Search(_) => &[],
        }
    }
}

/// Ordered, immutable, non-empty sequence of steps from one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrace")]
pub struct StepTrace {
    algorithm: Algorithm,
    steps: Vec<Step>,
}

#[derive(Deserialize)]
struct RawTrace {
    algorithm: Algorithm,
    steps: Vec<Step>,
}

impl TryFrom<RawTrace> for StepTrace {
    type Error = Error;

    fn try_from(raw: RawTrace) -> Result<Self> {
        Self::new(raw.algorithm, raw.steps)
    }
}

impl StepTrace {
    /// Wrap a recorded step list. Fails if `steps` is empty.
    pub fn new(algorithm: Algorithm, steps: Vec<Step>) -> Result<Self> {
        if steps.is_empty() {
            return Err(Error::EmptyTrace);
        }
        Ok(Self { algorithm, steps })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the final step.
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn first(&self) -> &Step {
        &self.steps[0]
    }

    pub fn last(&self) -> &Step {
        &self.steps[self.steps.len() - 1]
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Number of steps of the given kind.
    pub fn count(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind == kind).count()
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Accumulates steps in emission order while a generator runs.
pub(crate) struct TraceRecorder {
    algorithm: Algorithm,
    steps: Vec<Step>,
}

impl TraceRecorder {
    pub(crate) fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            steps: Vec::new(),
        }
    }

    pub(crate) fn push(
        &mut self,
        kind: StepKind,
        action: impl Into<String>,
        snapshot: Snapshot,
        detail: StepDetail,
    ) {
        self.steps.push(Step {
            kind,
            action: action.into(),
            snapshot,
            detail,
            terminal: false,
        });
    }

    /// Record the final step and seal the trace.
    pub(crate) fn finish(
        mut self,
        kind: StepKind,
        action: impl Into<String>,
        snapshot: Snapshot,
        detail: StepDetail,
    ) -> Result<StepTrace> {
        self.steps.push(Step {
            kind,
            action: action.into(),
            snapshot,
            detail,
            terminal: true,
        });
        debug!(
            algorithm = %self.algorithm,
            steps = self.steps.len(),
            "generated step trace"
        );
        StepTrace::new(self.algorithm, self.steps)
    }
}

/// Render a value the way the user typed it (`8` rather than `8.0`).
pub(crate) fn fmt_value(value: f64) -> String {
    format!("{value}")
}
