//! Chart geometry for a single step.
//!
//! A [`Scene`] is what a drawing backend needs to paint one step from
//! scratch: positioned marks, each tagged with the role it plays in the step.

use std::f64::consts::{PI, TAU};

use algoviz_trace::{Graph, NodeId, Snapshot, Step, StepDetail};
use serde::{Deserialize, Serialize};

use crate::render::VizKind;

/// Radius of a graph node circle.
pub const NODE_RADIUS: f64 = 20.0;

/// Gap left between adjacent bars.
pub const BAR_GAP: f64 = 2.0;

/// Drawing surface size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
        }
    }
}

/// Role a mark plays in the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Normal,
    Comparing,
    Swapped,
    Current,
    Visited,
    InRange,
    TreeEdge,
}

/// One bar of a bar chart. `y` is the top edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub index: usize,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub highlight: Highlight,
}

/// A vertex of the line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub index: usize,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub highlight: Highlight,
}

/// Pie slice; angles in radians, clockwise from twelve o'clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub index: usize,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub highlight: Highlight,
}

/// A graph node circle centred on `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMark {
    pub id: NodeId,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub highlight: Highlight,
    /// Extra text drawn next to the node, such as a tentative distance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// A line between two node centres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeMark {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: u64,
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub highlight: Highlight,
}

/// Geometry for one step in one visualization kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scene {
    Bars { bars: Vec<Bar> },
    Line { points: Vec<Point> },
    Pie { center: (f64, f64), radius: f64, slices: Vec<Slice> },
    Graph { nodes: Vec<NodeMark>, edges: Vec<EdgeMark> },
}

impl Scene {
    /// Lay out `step` for `kind`.
    ///
    /// Graph snapshots are always drawn as graphs. Array snapshots drawn as
    /// [`VizKind::Graph`] become the implicit binary tree the array encodes.
    pub fn build(step: &Step, kind: VizKind, viewport: Viewport) -> Scene {
        match &step.snapshot {
            Snapshot::Graph(graph) => graph_scene(step, graph, viewport),
            Snapshot::Array(values) => match kind {
                VizKind::Bars => bars(step, values, viewport),
                VizKind::Line => line(step, values, viewport),
                VizKind::Pie => pie(step, values, viewport),
                VizKind::Graph => tree_scene(step, values, viewport),
            },
        }
    }

    /// Number of value or node marks.
    pub fn len(&self) -> usize {
        match self {
            Scene::Bars { bars } => bars.len(),
            Scene::Line { points } => points.len(),
            Scene::Pie { slices, .. } => slices.len(),
            Scene::Graph { nodes, .. } => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn array_highlight(step: &Step, index: usize) -> Highlight {
    match &step.detail {
        StepDetail::Sort(sort) => {
            if sort.swapped.is_some_and(|pair| pair.contains(&index)) || sort.placed == Some(index) {
                Highlight::Swapped
            } else if sort.comparing.is_some_and(|pair| pair.contains(&index)) {
                Highlight::Comparing
            } else {
                Highlight::Normal
            }
        }
        StepDetail::Search(search) => {
            if search.current_index == Some(index) {
                Highlight::Current
            } else if search.range.is_some_and(|range| range.contains(index)) {
                Highlight::InRange
            } else {
                Highlight::Normal
            }
        }
        _ => node_highlight(step, NodeId(index)),
    }
}

fn node_highlight(step: &Step, node: NodeId) -> Highlight {
    let current = match &step.detail {
        StepDetail::Traversal(t) => t.current,
        StepDetail::ShortestPath(p) => p.current,
        _ => None,
    };
    if current == Some(node) {
        Highlight::Current
    } else if step.visited_nodes().contains(&node) {
        Highlight::Visited
    } else {
        Highlight::Normal
    }
}

/// Largest positive value, used as the top of the value axis.
fn value_ceiling(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

fn scaled(value: f64, ceiling: f64, extent: f64) -> f64 {
    if ceiling > 0.0 {
        value.max(0.0) / ceiling * extent
    } else {
        0.0
    }
}

fn bars(step: &Step, values: &[f64], viewport: Viewport) -> Scene {
    if values.is_empty() {
        return Scene::Bars { bars: Vec::new() };
    }
    let ceiling = value_ceiling(values);
    let slot = viewport.width / values.len() as f64;
    let bars = values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let height = scaled(value, ceiling, viewport.height);
            Bar {
                index,
                value,
                x: index as f64 * slot,
                y: viewport.height - height,
                width: (slot - BAR_GAP).max(0.0),
                height,
                highlight: array_highlight(step, index),
            }
        })
        .collect();
    Scene::Bars { bars }
}

fn line(step: &Step, values: &[f64], viewport: Viewport) -> Scene {
    let ceiling = value_ceiling(values);
    let spacing = if values.len() > 1 {
        viewport.width / (values.len() - 1) as f64
    } else {
        0.0
    };
    let points = values
        .iter()
        .enumerate()
        .map(|(index, &value)| Point {
            index,
            value,
            x: index as f64 * spacing,
            y: viewport.height - scaled(value, ceiling, viewport.height),
            highlight: array_highlight(step, index),
        })
        .collect();
    Scene::Line { points }
}

fn pie(step: &Step, values: &[f64], viewport: Viewport) -> Scene {
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    let mut angle = 0.0;
    let slices = values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let sweep = if total > 0.0 {
                value.max(0.0) / total * TAU
            } else {
                0.0
            };
            let slice = Slice {
                index,
                value,
                start_angle: angle,
                end_angle: angle + sweep,
                highlight: array_highlight(step, index),
            };
            angle += sweep;
            slice
        })
        .collect();
    Scene::Pie {
        center: (viewport.width / 2.0, viewport.height / 2.0),
        radius: viewport.width.min(viewport.height) / 2.0,
        slices,
    }
}

/// Evenly spaced points on a circle, first one at twelve o'clock.
fn circular_layout(count: usize, viewport: Viewport) -> impl Fn(usize) -> (f64, f64) {
    let (cx, cy) = (viewport.width / 2.0, viewport.height / 2.0);
    let radius = (viewport.width.min(viewport.height) / 2.0 - NODE_RADIUS * 1.5).max(0.0);
    move |i| {
        let angle = TAU * i as f64 / count.max(1) as f64 - PI / 2.0;
        (cx + radius * angle.cos(), cy + radius * angle.sin())
    }
}

fn graph_scene(step: &Step, graph: &Graph, viewport: Viewport) -> Scene {
    let layout = circular_layout(graph.node_count(), viewport);
    let positions: Vec<(f64, f64)> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| node.position.map_or_else(|| layout(i), |p| (p.x, p.y)))
        .collect();

    let distances = step.shortest_path();
    let nodes = graph
        .nodes
        .iter()
        .zip(&positions)
        .map(|(node, &(x, y))| NodeMark {
            id: node.id,
            label: node.label.clone(),
            x,
            y,
            highlight: node_highlight(step, node.id),
            annotation: distances.map(|d| match d.distance_to(node.id) {
                Some(distance) => distance.to_string(),
                None => "∞".to_string(),
            }),
        })
        .collect();

    let tree_edges = step.spanning_tree().map(|t| t.mst_edges.as_slice()).unwrap_or(&[]);
    let position_of = |id: NodeId| graph.index_of(id).map(|i| positions[i]);
    let edges = graph
        .edges
        .iter()
        .filter_map(|edge| {
            Some(EdgeMark {
                source: edge.source,
                target: edge.target,
                weight: edge.weight,
                from: position_of(edge.source)?,
                to: position_of(edge.target)?,
                highlight: if tree_edges.contains(edge) {
                    Highlight::TreeEdge
                } else {
                    Highlight::Normal
                },
            })
        })
        .collect();

    Scene::Graph { nodes, edges }
}

/// Level-by-level layout of the complete binary tree encoded by `values`.
fn tree_scene(step: &Step, values: &[f64], viewport: Viewport) -> Scene {
    let depth = |i: usize| (usize::BITS - (i + 1).leading_zeros() - 1) as usize;
    let levels = values.len().checked_sub(1).map_or(0, |last| depth(last) + 1);
    let level_height = viewport.height / (levels + 1) as f64;

    let position = |i: usize| {
        let level = depth(i);
        let first = (1usize << level) - 1;
        let width = (1usize << level) as f64;
        let x = viewport.width * ((i - first) as f64 + 0.5) / width;
        let y = level_height * (level + 1) as f64;
        (x, y)
    };

    let nodes = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let (x, y) = position(i);
            NodeMark {
                id: NodeId(i),
                label: value.to_string(),
                x,
                y,
                highlight: array_highlight(step, i),
                annotation: None,
            }
        })
        .collect();

    let edges = (1..values.len())
        .map(|child| {
            let parent = (child - 1) / 2;
            EdgeMark {
                source: NodeId(parent),
                target: NodeId(child),
                weight: 0,
                from: position(parent),
                to: position(child),
                highlight: Highlight::Normal,
            }
        })
        .collect();

    Scene::Graph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_trace::{bfs, binary_search, bubble_sort, prim, dijkstra};

    fn highlights(scene: &Scene) -> Vec<Highlight> {
        match scene {
            Scene::Bars { bars } => bars.iter().map(|b| b.highlight).collect(),
            Scene::Line { points } => points.iter().map(|p| p.highlight).collect(),
            Scene::Pie { slices, .. } => slices.iter().map(|s| s.highlight).collect(),
            Scene::Graph { nodes, .. } => nodes.iter().map(|n| n.highlight).collect(),
        }
    }

    #[test]
    fn bars_scale_to_max_value() {
        let trace = bubble_sort(&[2.0, 4.0]).unwrap();
        let Scene::Bars { bars } = Scene::build(trace.first(), VizKind::Bars, Viewport::default()) else {
            panic!("expected bars");
        };
        assert_eq!(bars[1].height, 400.0);
        assert_eq!(bars[0].height, 200.0);
        assert_eq!(bars[0].y, 200.0);
        assert_eq!(bars[1].x, 300.0);
        assert_eq!(bars[0].width, 300.0 - BAR_GAP);
    }

    #[test]
    fn compare_step_highlights_pair() {
        let trace = bubble_sort(&[3.0, 1.0, 2.0]).unwrap();
        let scene = Scene::build(trace.first(), VizKind::Bars, Viewport::default());
        assert_eq!(
            highlights(&scene),
            vec![Highlight::Comparing, Highlight::Comparing, Highlight::Normal]
        );

        let swap = trace.get(1).unwrap();
        let scene = Scene::build(swap, VizKind::Line, Viewport::default());
        assert_eq!(highlights(&scene)[..2], [Highlight::Swapped, Highlight::Swapped]);
    }

    #[test]
    fn pie_angles_are_proportional() {
        let trace = bubble_sort(&[1.0, 3.0]).unwrap();
        let Scene::Pie { slices, radius, .. } = Scene::build(trace.first(), VizKind::Pie, Viewport::default()) else {
            panic!("expected pie");
        };
        assert_eq!(radius, 200.0);
        assert!((slices[0].end_angle - TAU / 4.0).abs() < 1e-9);
        assert!((slices[1].end_angle - TAU).abs() < 1e-9);
    }

    #[test]
    fn binary_search_marks_range() {
        let trace = binary_search(&[1.0, 2.0, 3.0, 4.0, 5.0], 5.0).unwrap();
        let scene = Scene::build(trace.first(), VizKind::Bars, Viewport::default());
        let marks = highlights(&scene);
        assert_eq!(marks[2], Highlight::Current);
        assert!(marks.iter().all(|h| matches!(h, Highlight::Current | Highlight::InRange)));
    }

    #[test]
    fn empty_array_gives_empty_scene() {
        let trace = bfs(&[]).unwrap();
        for kind in [VizKind::Bars, VizKind::Line, VizKind::Pie, VizKind::Graph] {
            assert!(Scene::build(trace.first(), kind, Viewport::default()).is_empty());
        }
    }

    #[test]
    fn bfs_array_draws_as_tree() {
        let trace = bfs(&[8.0, 3.0, 1.0]).unwrap();
        let Scene::Graph { nodes, edges } = Scene::build(trace.last(), VizKind::Graph, Viewport::default()) else {
            panic!("expected graph");
        };
        assert_eq!(edges.len(), 2);
        assert!(nodes[1].y > nodes[0].y);
        assert_eq!(nodes[0].x, 300.0);
        assert!(nodes.iter().all(|n| n.highlight == Highlight::Visited));
    }

    #[test]
    fn mst_edges_are_tagged() {
        let trace = prim(&Graph::sample_weighted(), NodeId(0)).unwrap();
        let Scene::Graph { edges, .. } = Scene::build(trace.last(), VizKind::Bars, Viewport::default()) else {
            panic!("graph snapshots always draw as graphs");
        };
        let tree = edges.iter().filter(|e| e.highlight == Highlight::TreeEdge).count();
        assert_eq!(tree, 4);
    }

    #[test]
    fn dijkstra_nodes_show_distances() {
        let trace = dijkstra(&Graph::sample_weighted(), NodeId(0)).unwrap();
        let Scene::Graph { nodes, .. } = Scene::build(trace.first(), VizKind::Graph, Viewport::default()) else {
            panic!("expected graph");
        };
        assert_eq!(nodes[0].annotation.as_deref(), Some("0"));
        assert_eq!(nodes[1].annotation.as_deref(), Some("∞"));
        assert_eq!(nodes[0].highlight, Highlight::Current);
    }

    #[test]
    fn layout_hints_are_respected() {
        let graph = Graph::sample_cycle();
        let trace = algoviz_trace::dfs(&graph, NodeId(0)).unwrap();
        let Scene::Graph { nodes, .. } = Scene::build(trace.first(), VizKind::Graph, Viewport::default()) else {
            panic!("expected graph");
        };
        assert_eq!((nodes[2].x, nodes[2].y), (300.0, 100.0));
    }
}
