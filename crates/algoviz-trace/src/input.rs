//! Text input parsing and random sample data.
//!
//! Values are entered as `8, 3, 1` and edges as `A-B:4, A-C:2`, with node
//! labels resolved against an existing graph. Bad tokens are errors,
//! never silently dropped.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, NodeId};

/// Weight given to an edge written without `:weight`.
pub const DEFAULT_EDGE_WEIGHT: u64 = 1;

/// Largest value produced by [`random_values`].
pub const RANDOM_VALUE_MAX: u32 = 15;

/// Node count range for [`random_graph`].
pub const RANDOM_GRAPH_NODES: RangeInclusive<usize> = 5..=8;

/// Edge weight range for [`random_graph`].
pub const RANDOM_EDGE_WEIGHT: RangeInclusive<u64> = 1..=10;

/// Parse a comma separated list of numbers.
///
/// Surrounding whitespace is trimmed and blank input yields an empty list.
/// A token that is not a finite number fails the whole parse.
pub fn parse_values(input: &str) -> Result<Vec<f64>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input.split(',').map(parse_number).collect()
}

/// Parse a single search target.
pub fn parse_target(input: &str) -> Result<f64> {
    parse_number(input)
}

fn parse_number(token: &str) -> Result<f64> {
    let trimmed = token.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::InvalidNumber {
            token: trimmed.to_string(),
        }),
    }
}

/// Parse `source-target[:weight]` edges, resolving labels against `graph`.
pub fn parse_edges(input: &str, graph: &Graph) -> Result<Vec<Edge>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .map(|spec| parse_edge(spec, graph))
        .collect()
}

fn parse_edge(spec: &str, graph: &Graph) -> Result<Edge> {
    let invalid = |reason| Error::InvalidEdge {
        spec: spec.to_string(),
        reason,
    };

    let (endpoints, weight) = match spec.split_once(':') {
        Some((endpoints, weight)) => {
            let weight = weight
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("weight must be a non-negative integer"))?;
            (endpoints, weight)
        }
        None => (spec, DEFAULT_EDGE_WEIGHT),
    };

    let (from, to) = endpoints
        .split_once('-')
        .ok_or_else(|| invalid("expected source-target"))?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(invalid("missing node label"));
    }

    let resolve = |label: &str| {
        graph
            .find_label(label)
            .map(|node| node.id)
            .ok_or_else(|| Error::UnknownLabel(label.to_string()))
    };
    Ok(Edge::new(resolve(from)?, resolve(to)?, weight))
}

/// Build a graph from node labels and an edge list in text form.
pub fn parse_graph<I, S>(labels: I, edges: &str) -> Result<Graph>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut graph = Graph::with_labels(labels);
    graph.edges = parse_edges(edges, &graph)?;
    graph.validate()?;
    Ok(graph)
}

/// `len` random integers in `1..=15`.
pub fn random_values<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    (0..len)
        .map(|_| f64::from(rng.gen_range(1..=RANDOM_VALUE_MAX)))
        .collect()
}

/// A small connected graph for the Dijkstra and Prim pages.
///
/// Nodes `A`, `B`, ... are joined by a random spanning tree, then a few extra
/// links are tried. Every link is stored in both directions with one weight,
/// and a pair is never linked twice. Traversals start from node `0`.
pub fn random_graph<R: Rng + ?Sized>(rng: &mut R) -> Graph {
    let count = rng.gen_range(RANDOM_GRAPH_NODES);
    let mut graph = Graph::with_labels((0..count).map(node_label));

    for node in 1..count {
        let existing = rng.gen_range(0..node);
        let weight = rng.gen_range(RANDOM_EDGE_WEIGHT);
        link(&mut graph, NodeId(node), NodeId(existing), weight);
    }

    for _ in 0..rng.gen_range(2..=4) {
        let a = NodeId(rng.gen_range(0..count));
        let b = loop {
            let b = NodeId(rng.gen_range(0..count));
            if b != a {
                break b;
            }
        };
        let linked = graph.edges.iter().any(|e| e.touches(a) && e.touches(b));
        if !linked {
            let weight = rng.gen_range(RANDOM_EDGE_WEIGHT);
            link(&mut graph, a, b, weight);
        }
    }

    graph
}

fn node_label(index: usize) -> String {
    char::from(b'A' + index as u8).to_string()
}

fn link(graph: &mut Graph, a: NodeId, b: NodeId, weight: u64) {
    graph.add_edge(a, b, weight).add_edge(b, a, weight);
}
