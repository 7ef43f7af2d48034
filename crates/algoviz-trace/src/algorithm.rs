//! Algorithm catalogue and the generic generator interface.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::searching::{binary_search, linear_search, SearchQuery};
use crate::shortest_path::dijkstra;
use crate::sorting::{bubble_sort, heap_sort, merge_sort, quick_sort};
use crate::spanning_tree::prim;
use crate::step::StepTrace;
use crate::traversal::{bfs, dfs, GraphQuery};

/// Runs one algorithm to completion and returns its full trace.
///
/// Implementations are pure and deterministic: the same input always yields
/// the same trace, and the caller's input is never modified.
pub trait TraceGenerator {
    /// What the algorithm consumes.
    type Input: ?Sized;

    /// The algorithm recorded in generated traces.
    const ALGORITHM: Algorithm;

    fn generate(&self, input: &Self::Input) -> Result<StepTrace>;
}

/// Algorithm family; decides which [`crate::StepDetail`] variant steps carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Search,
    Sort,
    Traversal,
    ShortestPath,
    SpanningTree,
}

/// Every algorithm with a trace generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    LinearSearch,
    BinarySearch,
    BubbleSort,
    HeapSort,
    QuickSort,
    MergeSort,
    Bfs,
    Dfs,
    Dijkstra,
    Prim,
}

impl Algorithm {
    /// All algorithms, in menu order.
    pub const ALL: [Algorithm; 10] = [
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::BubbleSort,
        Algorithm::HeapSort,
        Algorithm::MergeSort,
        Algorithm::QuickSort,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::Prim,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::LinearSearch => "Linear Search",
            Algorithm::BinarySearch => "Binary Search",
            Algorithm::BubbleSort => "Bubble Sort",
            Algorithm::HeapSort => "Heap Sort",
            Algorithm::QuickSort => "Quick Sort",
            Algorithm::MergeSort => "Merge Sort",
            Algorithm::Bfs => "Breadth-First Search (BFS)",
            Algorithm::Dfs => "Depth-First Search (DFS)",
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::Prim => "Prim's Algorithm",
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Algorithm::LinearSearch | Algorithm::BinarySearch => Family::Search,
            Algorithm::BubbleSort
            | Algorithm::HeapSort
            | Algorithm::QuickSort
            | Algorithm::MergeSort => Family::Sort,
            Algorithm::Bfs | Algorithm::Dfs => Family::Traversal,
            Algorithm::Dijkstra => Family::ShortestPath,
            Algorithm::Prim => Family::SpanningTree,
        }
    }

    /// One-line summary for menus.
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::LinearSearch => {
                "A simple algorithm that checks each element in a list sequentially until the target is found."
            }
            Algorithm::BinarySearch => {
                "An efficient algorithm that repeatedly divides the search interval in half, requiring a sorted array."
            }
            Algorithm::BubbleSort => {
                "A simple comparison-based algorithm that repeatedly swaps adjacent elements if they are in the wrong order."
            }
            Algorithm::HeapSort => {
                "A comparison-based algorithm that uses a binary heap data structure to sort elements efficiently."
            }
            Algorithm::QuickSort => {
                "A divide-and-conquer algorithm that selects a pivot element and partitions the array around it."
            }
            Algorithm::MergeSort => {
                "A divide-and-conquer algorithm that splits the array into halves, sorts them, and merges them back together."
            }
            Algorithm::Bfs => {
                "A graph traversal algorithm that explores all neighbors at the current depth before moving deeper."
            }
            Algorithm::Dfs => {
                "A graph traversal algorithm that explores as far as possible along each branch before backtracking."
            }
            Algorithm::Dijkstra => {
                "An algorithm for finding the shortest paths between nodes in a graph with non-negative edge weights."
            }
            Algorithm::Prim => {
                "A greedy algorithm that finds a minimum spanning tree for a weighted undirected graph."
            }
        }
    }

    /// Spoken walkthrough: key steps, then time and space complexity.
    pub fn explanation(&self) -> &'static str {
        match self {
            Algorithm::LinearSearch => concat!(
                "Linear Search. Check each element from left to right and stop at the first match. ",
                "If the end is reached, the target is not present. ",
                "Time complexity: O(n). Space complexity: O(1)."
            ),
            Algorithm::BinarySearch => concat!(
                "Binary Search. Sort the array, then compare the target with the middle element. ",
                "If the target is larger, continue in the upper half, otherwise in the lower half. ",
                "Stop when the middle element matches or the range is empty. ",
                "Time complexity: O(log n). Space complexity: O(1)."
            ),
            Algorithm::BubbleSort => concat!(
                "Bubble Sort. Compare adjacent elements and swap them if they are out of order. ",
                "Each pass pushes the largest remaining value to the right. ",
                "Stop as soon as a pass makes no swaps. ",
                "Time complexity: O(n squared) in the worst case. Space complexity: O(1)."
            ),
            Algorithm::HeapSort => concat!(
                "Heap Sort. Build a max heap so every parent is larger than its children. ",
                "Swap the root with the last element of the heap, shrink the heap, and restore the heap property. ",
                "Repeat until the array is sorted. ",
                "Time complexity: O(n log n) in all cases. Space complexity: O(1)."
            ),
            Algorithm::QuickSort => concat!(
                "Quick Sort. Choose the last element as the pivot. ",
                "Move smaller elements to its left, then place the pivot between the two parts. ",
                "Sort each part the same way. ",
                "Time complexity: O(n log n) on average, O(n squared) in the worst case. ",
                "Space complexity: O(log n) for recursion."
            ),
            Algorithm::MergeSort => concat!(
                "Merge Sort. Split the array into halves and sort each half. ",
                "Merge the sorted halves by repeatedly taking the smaller front element. ",
                "Time complexity: O(n log n). Space complexity: O(n) for the merge buffer."
            ),
            Algorithm::Bfs => concat!(
                "Breadth-First Search. Start at the root node and visit all nodes at the current level ",
                "before moving to the next level, using a queue. ",
                "Time complexity: O(n). Space complexity: O(n) for the queue."
            ),
            Algorithm::Dfs => concat!(
                "Depth-First Search. Start from the selected node and follow unvisited neighbours as far as possible, ",
                "keeping pending nodes on a stack and backtracking when a branch is exhausted. ",
                "Time complexity: O(V plus E). Space complexity: O(V) for the stack."
            ),
            Algorithm::Dijkstra => concat!(
                "Dijkstra's Algorithm. Set every distance to infinity except the start, which is zero. ",
                "Repeatedly visit the closest unvisited node and shorten the distances to its neighbours. ",
                "Time complexity: O(V squared) with a linear scan. Space complexity: O(V)."
            ),
            Algorithm::Prim => concat!(
                "Prim's Algorithm. Start from one node and repeatedly add the lightest edge ",
                "that connects the tree to a node outside it, until every reachable node is included. ",
                "Time complexity: O(V times E) with a linear scan. Space complexity: O(V)."
            ),
        }
    }

    /// The input each page starts with.
    pub fn sample_input(&self) -> TraceInput {
        match self.family() {
            Family::Search => TraceInput::Search(SearchQuery::new(
                vec![1.0, 3.0, 5.0, 7.0, 9.0, 11.0, 13.0],
                7.0,
            )),
            Family::Sort => TraceInput::Array(vec![8.0, 3.0, 1.0, 7.0, 0.0, 10.0, 2.0]),
            Family::Traversal if *self == Algorithm::Bfs => {
                TraceInput::Array(vec![8.0, 3.0, 1.0, 7.0, 0.0, 10.0, 2.0])
            }
            Family::Traversal => TraceInput::Graph(GraphQuery::new(Graph::sample_cycle(), NodeId(0))),
            Family::ShortestPath | Family::SpanningTree => {
                TraceInput::Graph(GraphQuery::new(Graph::sample_weighted(), NodeId(0)))
            }
        }
    }

    /// Run this algorithm on `input`.
    pub fn generate(&self, input: &TraceInput) -> Result<StepTrace> {
        match (self, input) {
            (Algorithm::LinearSearch, TraceInput::Search(q)) => linear_search(&q.data, q.target),
            (Algorithm::BinarySearch, TraceInput::Search(q)) => binary_search(&q.data, q.target),
            (Algorithm::BubbleSort, TraceInput::Array(values)) => bubble_sort(values),
            (Algorithm::HeapSort, TraceInput::Array(values)) => heap_sort(values),
            (Algorithm::QuickSort, TraceInput::Array(values)) => quick_sort(values),
            (Algorithm::MergeSort, TraceInput::Array(values)) => merge_sort(values),
            (Algorithm::Bfs, TraceInput::Array(values)) => bfs(values),
            (Algorithm::Dfs, TraceInput::Graph(q)) => dfs(&q.graph, q.start),
            (Algorithm::Dijkstra, TraceInput::Graph(q)) => dijkstra(&q.graph, q.start),
            (Algorithm::Prim, TraceInput::Graph(q)) => prim(&q.graph, q.start),
            (algorithm, _) => Err(Error::InputMismatch {
                algorithm: *algorithm,
                expected: algorithm.expected_input(),
            }),
        }
    }

    /// Whether `input` has the shape this algorithm consumes.
    pub fn accepts(&self, input: &TraceInput) -> bool {
        matches!(
            (self.family(), input),
            (Family::Search, TraceInput::Search(_))
                | (Family::Sort, TraceInput::Array(_))
                | (Family::ShortestPath | Family::SpanningTree, TraceInput::Graph(_))
        ) || matches!(
            (self, input),
            (Algorithm::Bfs, TraceInput::Array(_)) | (Algorithm::Dfs, TraceInput::Graph(_))
        )
    }

    pub(crate) fn expected_input(&self) -> &'static str {
        match self {
            Algorithm::LinearSearch | Algorithm::BinarySearch => "array and target",
            Algorithm::BubbleSort
            | Algorithm::HeapSort
            | Algorithm::QuickSort
            | Algorithm::MergeSort
            | Algorithm::Bfs => "array",
            Algorithm::Dfs | Algorithm::Dijkstra | Algorithm::Prim => "graph and start node",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Input for [`Algorithm::generate`].
#[derive(Debug, Clone, PartialEq)]
pub enum TraceInput {
    Array(Vec<f64>),
    Search(SearchQuery),
    Graph(GraphQuery),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    #[test]
    fn every_algorithm_runs_on_its_sample() {
        for algorithm in Algorithm::ALL {
            let trace = algorithm.generate(&algorithm.sample_input()).unwrap();
            assert_eq!(trace.algorithm(), algorithm);
            assert!(trace.last().terminal, "{algorithm} must end with a terminal step");
        }
    }

    #[test]
    fn mismatched_input_is_rejected() {
        let err = Algorithm::Prim
            .generate(&TraceInput::Array(vec![1.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InputMismatch { algorithm: Algorithm::Prim, expected: "graph and start node" }
        ));
        assert_eq!(err.to_string(), "Prim's Algorithm expects graph and start node input");
    }

    #[test]
    fn accepts_matches_dispatch() {
        for algorithm in Algorithm::ALL {
            assert!(algorithm.accepts(&algorithm.sample_input()), "{algorithm}");
        }
        assert!(Algorithm::Bfs.accepts(&TraceInput::Array(vec![])));
        assert!(!Algorithm::Dfs.accepts(&TraceInput::Array(vec![])));
    }

    #[test]
    fn families() {
        assert_eq!(Algorithm::HeapSort.family(), Family::Sort);
        assert_eq!(Algorithm::Bfs.family(), Family::Traversal);
        assert_eq!(Algorithm::Dijkstra.family(), Family::ShortestPath);
        assert_eq!(Algorithm::Prim.family(), Family::SpanningTree);
    }

    #[test]
    fn samples_match_the_pages() {
        let trace = Algorithm::LinearSearch
            .generate(&Algorithm::LinearSearch.sample_input())
            .unwrap();
        assert_eq!(trace.last().kind, StepKind::Found);

        match Algorithm::Bfs.sample_input() {
            TraceInput::Array(values) => assert_eq!(values.len(), 7),
            other => panic!("unexpected BFS sample {other:?}"),
        }
    }

    #[test]
    fn explanations_mention_complexity() {
        for algorithm in Algorithm::ALL {
            assert!(algorithm.explanation().contains("Time complexity"), "{algorithm}");
            assert!(!algorithm.description().is_empty());
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Algorithm::BinarySearch).unwrap();
        assert_eq!(json, "\"binary_search\"");
    }
}
