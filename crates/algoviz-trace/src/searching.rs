//! Linear and binary search trace generators.

use crate::algorithm::{Algorithm, TraceGenerator};
use crate::error::Result;
use crate::step::{
    fmt_value, SearchRange, SearchStep, Snapshot, StepDetail, StepKind, StepTrace, TraceRecorder,
};

/// Values to search plus the value to look for.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub data: Vec<f64>,
    pub target: f64,
}

impl SearchQuery {
    pub fn new(data: Vec<f64>, target: f64) -> Self {
        Self { data, target }
    }
}

fn detail(current_index: Option<usize>, range: Option<SearchRange>) -> StepDetail {
    StepDetail::Search(SearchStep {
        current_index,
        range,
    })
}

/// Scan left to right, one comparison step per index.
pub fn linear_search(values: &[f64], target: f64) -> Result<StepTrace> {
    let mut recorder = TraceRecorder::new(Algorithm::LinearSearch);
    let snapshot = || Snapshot::Array(values.to_vec());

    for (i, &value) in values.iter().enumerate() {
        recorder.push(
            StepKind::Compare,
            format!("Comparing {} with target {}", fmt_value(value), fmt_value(target)),
            snapshot(),
            detail(Some(i), None),
        );

        if value == target {
            return recorder.finish(
                StepKind::Found,
                format!("Target found at index {i}"),
                snapshot(),
                detail(Some(i), None),
            );
        }
    }

    recorder.finish(
        StepKind::NotFound,
        "Target not found",
        snapshot(),
        detail(None, None),
    )
}

/// Binary search over an ascending copy of `values`.
///
/// Sorting the copy is not traced; every step shows the sorted array.
pub fn binary_search(values: &[f64], target: f64) -> Result<StepTrace> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut recorder = TraceRecorder::new(Algorithm::BinarySearch);
    let snapshot = || Snapshot::Array(sorted.clone());

    // `end` is one past `high`, so an empty range needs no signed arithmetic.
    let mut low = 0;
    let mut end = sorted.len();

    while low < end {
        let high = end - 1;
        let mid = (low + high) / 2;
        let range = SearchRange { low, high };
        recorder.push(
            StepKind::Compare,
            format!(
                "Comparing {} with target {}",
                fmt_value(sorted[mid]),
                fmt_value(target)
            ),
            snapshot(),
            detail(Some(mid), Some(range)),
        );

        if sorted[mid] == target {
            return recorder.finish(
                StepKind::Found,
                format!("Target found at index {mid}"),
                snapshot(),
                detail(Some(mid), Some(range)),
            );
        }

        let direction = if sorted[mid] < target {
            low = mid + 1;
            "higher"
        } else {
            end = mid;
            "lower"
        };
        let remaining = (low < end).then(|| SearchRange { low, high: end - 1 });
        recorder.push(
            StepKind::AdjustRange,
            format!("Target is {direction}, adjusting search range"),
            snapshot(),
            detail(Some(mid), remaining),
        );
    }

    recorder.finish(
        StepKind::NotFound,
        "Target not found",
        snapshot(),
        detail(None, None),
    )
}

/// [`linear_search`] as a [`TraceGenerator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSearch;

impl TraceGenerator for LinearSearch {
    type Input = SearchQuery;
    const ALGORITHM: Algorithm = Algorithm::LinearSearch;

    fn generate(&self, input: &SearchQuery) -> Result<StepTrace> {
        linear_search(&input.data, input.target)
    }
}

/// [`binary_search`] as a [`TraceGenerator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl TraceGenerator for BinarySearch {
    type Input = SearchQuery;
    const ALGORITHM: Algorithm = Algorithm::BinarySearch;

    fn generate(&self, input: &SearchQuery) -> Result<StepTrace> {
        binary_search(&input.data, input.target)
    }
}
