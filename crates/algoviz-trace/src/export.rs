//! JSON export of an input together with its generated trace.

use serde::{Deserialize, Serialize};

use crate::algorithm::{Algorithm, TraceInput};
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, NodeId};
use crate::step::{NodeDistance, Step, StepDetail, StepKind, StepTrace};

/// Outcome of a run, taken from the terminal step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportResult {
    Sorted {
        data: Vec<f64>,
    },
    Search {
        found_index: Option<usize>,
    },
    Traversal {
        order: Vec<NodeId>,
    },
    Distances {
        distances: Vec<NodeDistance>,
    },
    SpanningTree {
        edges: Vec<Edge>,
        total_weight: u64,
    },
}

impl ExportResult {
    fn from_terminal(step: &Step) -> Self {
        match &step.detail {
            StepDetail::Sort(_) => ExportResult::Sorted {
                data: step.array().map(<[f64]>::to_vec).unwrap_or_default(),
            },
            StepDetail::Search(search) => ExportResult::Search {
                found_index: match step.kind {
                    StepKind::Found => search.current_index,
                    _ => None,
                },
            },
            StepDetail::Traversal(traversal) => ExportResult::Traversal {
                order: traversal.visited.clone(),
            },
            StepDetail::ShortestPath(path) => ExportResult::Distances {
                distances: path.distances.clone(),
            },
            StepDetail::SpanningTree(tree) => ExportResult::SpanningTree {
                edges: tree.mst_edges.clone(),
                total_weight: tree.total_weight(),
            },
        }
    }
}

/// The document written by "export".
///
/// Keys are stable: `algorithm`, then `data` or `graph` depending on the
/// input shape, `target` for searches, `start_node` for graph algorithms,
/// `result` and `steps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub algorithm: Algorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<Graph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_node: Option<NodeId>,
    pub result: ExportResult,
    pub steps: Vec<Step>,
}

impl ExportDocument {
    /// Pair `input` with the trace generated from it.
    ///
    /// Fails with [`Error::InputMismatch`] if `input` is not the shape the
    /// trace's algorithm consumes.
    pub fn new(input: &TraceInput, trace: &StepTrace) -> Result<Self> {
        let algorithm = trace.algorithm();
        if !algorithm.accepts(input) {
            return Err(Error::InputMismatch {
                algorithm,
                expected: algorithm.expected_input(),
            });
        }

        let mut doc = Self {
            algorithm,
            data: None,
            graph: None,
            target: None,
            start_node: None,
            result: ExportResult::from_terminal(trace.last()),
            steps: trace.steps().to_vec(),
        };
        match input {
            TraceInput::Array(values) => doc.data = Some(values.clone()),
            TraceInput::Search(query) => {
                doc.data = Some(query.data.clone());
                doc.target = Some(query.target);
            }
            TraceInput::Graph(query) => {
                doc.graph = Some(query.graph.clone());
                doc.start_node = Some(query.start);
            }
        }
        Ok(doc)
    }

    /// Rebuild the trace from the exported steps.
    pub fn trace(&self) -> Result<StepTrace> {
        StepTrace::new(self.algorithm, self.steps.clone())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse an exported document. A document without steps is rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json)?;
        if doc.steps.is_empty() {
            return Err(Error::EmptyTrace);
        }
        Ok(doc)
    }
}
