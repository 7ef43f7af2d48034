//! Comparison sort trace generators.
//!
//! Each generator sorts a private copy of its input and records a step for
//! every comparison and every write. The recursive sorts (heap, quick, merge)
//! thread one [`SortRun`] through the recursion, so steps land in exactly the
//! order the recursive calls make them.

use crate::algorithm::{Algorithm, TraceGenerator};
use crate::error::Result;
use crate::step::{fmt_value, Snapshot, SortStep, StepDetail, StepKind, StepTrace, TraceRecorder};

/// A sort in progress: the working copy plus the steps recorded so far.
struct SortRun {
    values: Vec<f64>,
    recorder: TraceRecorder,
}

impl SortRun {
    fn new(algorithm: Algorithm, values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            recorder: TraceRecorder::new(algorithm),
        }
    }

    fn value(&self, index: usize) -> String {
        fmt_value(self.values[index])
    }

    fn record(&mut self, kind: StepKind, action: String, detail: SortStep) {
        let snapshot = Snapshot::Array(self.values.clone());
        self.recorder.push(kind, action, snapshot, StepDetail::Sort(detail));
    }

    fn compare(&mut self, a: usize, b: usize, action: String) {
        self.record(
            StepKind::Compare,
            action,
            SortStep {
                comparing: Some([a, b]),
                ..Default::default()
            },
        );
    }

    /// Exchange two slots and record the result.
    fn swap(&mut self, kind: StepKind, a: usize, b: usize, action: String) {
        self.values.swap(a, b);
        self.record(
            kind,
            action,
            SortStep {
                swapped: Some([a, b]),
                ..Default::default()
            },
        );
    }

    fn finish(self) -> Result<StepTrace> {
        let snapshot = Snapshot::Array(self.values);
        self.recorder.finish(
            StepKind::Completed,
            "Sorting completed",
            snapshot,
            StepDetail::Sort(SortStep::default()),
        )
    }
}

/// Bubble sort with early exit once a pass makes no swaps.
pub fn bubble_sort(values: &[f64]) -> Result<StepTrace> {
    let mut run = SortRun::new(Algorithm::BubbleSort, values);
    let n = run.values.len();

    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - pass - 1 {
            let action = format!("Comparing {} and {}", run.value(j), run.value(j + 1));
            run.compare(j, j + 1, action);

            if run.values[j] > run.values[j + 1] {
                let action = format!("Swapping {} and {}", run.value(j), run.value(j + 1));
                run.swap(StepKind::Swap, j, j + 1, action);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }

    run.finish()
}

/// Heap sort: build a max-heap, then repeatedly move the root behind the heap.
pub fn heap_sort(values: &[f64]) -> Result<StepTrace> {
    let mut run = SortRun::new(Algorithm::HeapSort, values);
    let n = run.values.len();

    for root in (0..n / 2).rev() {
        heapify(&mut run, n, root);
    }

    for end in (1..n).rev() {
        let action = format!(
            "Swapping root {} with last element {}",
            run.value(0),
            run.value(end)
        );
        run.swap(StepKind::Swap, 0, end, action);
        heapify(&mut run, end, 0);
    }

    run.finish()
}

/// Sift `root` down within the first `size` elements.
///
/// Order: compare left, compare right, swap if needed, recurse.
fn heapify(run: &mut SortRun, size: usize, root: usize) {
    let mut largest = root;
    let left = 2 * root + 1;
    let right = 2 * root + 2;

    if left < size {
        let action = format!("Comparing {} and {}", run.value(largest), run.value(left));
        run.compare(largest, left, action);
        if run.values[left] > run.values[largest] {
            largest = left;
        }
    }

    if right < size {
        let action = format!("Comparing {} and {}", run.value(largest), run.value(right));
        run.compare(largest, right, action);
        if run.values[right] > run.values[largest] {
            largest = right;
        }
    }

    if largest != root {
        let action = format!("Swapping {} and {}", run.value(root), run.value(largest));
        run.swap(StepKind::Swap, root, largest, action);
        heapify(run, size, largest);
    }
}

/// Quick sort with Lomuto partitioning, pivot = last element of the range.
pub fn quick_sort(values: &[f64]) -> Result<StepTrace> {
    let mut run = SortRun::new(Algorithm::QuickSort, values);
    if run.values.len() > 1 {
        let high = run.values.len() - 1;
        quick_sort_range(&mut run, 0, high);
    }
    run.finish()
}

fn quick_sort_range(run: &mut SortRun, low: usize, high: usize) {
    if low >= high {
        return;
    }
    let pivot = partition(run, low, high);
    if pivot > low {
        quick_sort_range(run, low, pivot - 1);
    }
    quick_sort_range(run, pivot + 1, high);
}

/// Partition `low..=high` around `values[high]`; returns the pivot's final slot.
fn partition(run: &mut SortRun, low: usize, high: usize) -> usize {
    let pivot = run.values[high];
    // Next slot for an element smaller than the pivot.
    let mut store = low;

    for j in low..high {
        let action = format!("Comparing {} and pivot {}", run.value(j), fmt_value(pivot));
        run.compare(j, high, action);

        if run.values[j] < pivot {
            let action = format!("Swapping {} and {}", run.value(store), run.value(j));
            run.swap(StepKind::Swap, store, j, action);
            store += 1;
        }
    }

    let action = format!("Placing pivot {} in correct position", fmt_value(pivot));
    run.swap(StepKind::PlacePivot, store, high, action);
    store
}

/// Top-down merge sort. Steps are post-order: left half, right half, merge.
pub fn merge_sort(values: &[f64]) -> Result<StepTrace> {
    let mut run = SortRun::new(Algorithm::MergeSort, values);
    if run.values.len() > 1 {
        let right = run.values.len() - 1;
        merge_sort_range(&mut run, 0, right);
    }
    run.finish()
}

fn merge_sort_range(run: &mut SortRun, left: usize, right: usize) {
    if left >= right {
        return;
    }
    let mid = (left + right) / 2;
    merge_sort_range(run, left, mid);
    merge_sort_range(run, mid + 1, right);
    merge(run, left, mid, right);
}

fn merge(run: &mut SortRun, left: usize, mid: usize, right: usize) {
    let mut merged = Vec::with_capacity(right - left + 1);
    let (mut i, mut j) = (left, mid + 1);

    while i <= mid && j <= right {
        let action = format!("Comparing {} and {}", run.value(i), run.value(j));
        run.compare(i, j, action);

        if run.values[i] < run.values[j] {
            merged.push(run.values[i]);
            i += 1;
        } else {
            merged.push(run.values[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&run.values[i..=mid]);
    merged.extend_from_slice(&run.values[j..=right]);

    for (k, value) in (left..=right).zip(merged) {
        run.values[k] = value;
        run.record(
            StepKind::Merge,
            "Merging sorted subarrays".to_string(),
            SortStep {
                placed: Some(k),
                ..Default::default()
            },
        );
    }
}

macro_rules! sort_generator {
    ($(#[$doc:meta])* $name:ident, $algorithm:ident, $func:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl TraceGenerator for $name {
            type Input = [f64];
            const ALGORITHM: Algorithm = Algorithm::$algorithm;

            fn generate(&self, input: &[f64]) -> Result<StepTrace> {
                $func(input)
            }
        }
    };
}

sort_generator!(
    /// [`bubble_sort`] as a [`TraceGenerator`].
    BubbleSort, BubbleSort, bubble_sort
);
sort_generator!(
    /// [`heap_sort`] as a [`TraceGenerator`].
    HeapSort, HeapSort, heap_sort
);
sort_generator!(
    /// [`quick_sort`] as a [`TraceGenerator`].
    QuickSort, QuickSort, quick_sort
);
sort_generator!(
    /// [`merge_sort`] as a [`TraceGenerator`].
    MergeSort, MergeSort, merge_sort
);
