// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Sorting engine.
//!
//! Each algorithm is an async state machine over a private copy of the
//! input. After every visible mutation it publishes the whole array to a
//! [`SortObserver`] and then pauses through the shared [`Pacer`], so the
//! observer always sees a mutation before the next comparison starts.
//!
//! Published arrays are always permutations of the input. The distribution
//! sorts show placed values where they have landed and fill the remaining
//! slots with the values still waiting to be placed.
//!
//! # Organization
//!
//! - One file per algorithm, each exposing `sort(&mut SortRun)`
//! - `generate`: input generators (random, nearly sorted, reversed, ...)
//! - `race`: several algorithms on copies of one array, ranked by time
//!
//! # Example
//!
//! ```
//! use algo_stepper::control::{CancellationToken, Pacer, RunOutcome};
//! use algo_stepper::sorting::{run_sort, NullObserver, SortAlgorithm};
//!
//! let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
//! let report = rt.block_on(async {
//!     let pacer = Pacer::from_millis(0, CancellationToken::new());
//!     run_sort(SortAlgorithm::HeapSort, &[5, 3, 9, 1], &pacer, &mut NullObserver).await
//! });
//! let report = report.unwrap();
//! assert_eq!(report.outcome, RunOutcome::Completed);
//! assert_eq!(report.array, vec![1, 3, 5, 9]);
//! ```

mod bubble;
mod bucket;
mod counting;
pub mod generate;
mod heap;
mod insertion;
mod merge;
mod quick;
pub mod race;
mod radix;
mod selection;

pub use generate::{generate_array, ArrayKind};
pub use race::{Race, RaceOutcome, RaceResult, RaceTaskState};

use crate::control::{percent, Cancelled, Pacer, RunOutcome};
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString};
use tokio::time::Instant;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    AsRefStr,
    EnumCount,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum SortAlgorithm {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    QuickSort,
    MergeSort,
    HeapSort,
    CountingSort,
    RadixSort,
    BucketSort,
}

/// Catalog entry shown next to an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub complexity: &'static str,
    pub description: &'static str,
}

impl SortAlgorithm {
    pub fn info(self) -> AlgorithmInfo {
        let (name, complexity, description) = match self {
            SortAlgorithm::BubbleSort => (
                "Bubble Sort",
                "O(n²)",
                "Simple comparison-based algorithm that repeatedly steps through the list.",
            ),
            SortAlgorithm::SelectionSort => (
                "Selection Sort",
                "O(n²)",
                "Repeatedly selects the smallest element of the unsorted region and moves it to the front.",
            ),
            SortAlgorithm::InsertionSort => (
                "Insertion Sort",
                "O(n²)",
                "Builds the sorted array one item at a time, efficient for small or nearly sorted data.",
            ),
            SortAlgorithm::QuickSort => (
                "Quick Sort",
                "O(n log n)",
                "Divide-and-conquer sort that partitions around a pivot and sorts each side.",
            ),
            SortAlgorithm::MergeSort => (
                "Merge Sort",
                "O(n log n)",
                "Stable divide-and-conquer sort that splits the array in half and merges the sorted halves.",
            ),
            SortAlgorithm::HeapSort => (
                "Heap Sort",
                "O(n log n)",
                "Builds a max-heap and repeatedly moves the maximum to the end.",
            ),
            SortAlgorithm::CountingSort => (
                "Counting Sort",
                "O(n + k)",
                "Counts occurrences of each value and uses the counts to place elements.",
            ),
            SortAlgorithm::RadixSort => (
                "Radix Sort",
                "O(nk)",
                "Sorts by individual decimal digits from least to most significant.",
            ),
            SortAlgorithm::BucketSort => (
                "Bucket Sort",
                "O(n + k)",
                "Distributes elements into buckets, sorts each bucket and concatenates them.",
            ),
        };
        AlgorithmInfo {
            name,
            complexity,
            description,
        }
    }

    fn completion_message(self) -> &'static str {
        match self {
            SortAlgorithm::BubbleSort => "Bubble Sort completed!",
            _ => "Sorting complete!",
        }
    }
}

/// Receives every published change of a sort run.
///
/// All methods default to doing nothing, so an observer only implements
/// what it renders.
pub trait SortObserver: Send {
    fn on_array_change(&mut self, _array: &[u32]) {}
    fn on_active_indices(&mut self, _indices: &[usize]) {}
    fn on_comparisons(&mut self, _count: u64) {}
    fn on_swaps(&mut self, _count: u64) {}
    fn on_progress(&mut self, _percent: u8) {}
    fn on_narration(&mut self, _text: &str) {}
    fn on_running_change(&mut self, _running: bool) {}
    /// Per-index access tally, for heatmap rendering.
    fn on_access_pattern(&mut self, _pattern: &[u32]) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SortObserver for NullObserver {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSettings {
    pub speed_ms: u64,
    pub array_size: usize,
}

impl Default for SortSettings {
    fn default() -> Self {
        SortSettings {
            speed_ms: 10,
            array_size: 50,
        }
    }
}

impl SortSettings {
    pub fn validate(&self) -> Result<()> {
        if self.array_size == 0 {
            return Err(ConfigError::EmptyArray);
        }
        Ok(())
    }
}

/// Terminal figures of one sort run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortReport {
    pub algorithm: SortAlgorithm,
    pub outcome: RunOutcome,
    /// The array as last published. Partially sorted when cancelled.
    pub array: Vec<u32>,
    pub comparisons: u64,
    pub swaps: u64,
    pub elapsed: Duration,
}

type SortStep<'r> = Pin<Box<dyn Future<Output = std::result::Result<(), Cancelled>> + Send + 'r>>;

/// Working state shared by the algorithm files.
struct SortRun<'a> {
    array: Vec<u32>,
    access: Vec<u32>,
    comparisons: u64,
    swaps: u64,
    step: usize,
    total_steps: f64,
    pacer: &'a Pacer,
    observer: &'a mut dyn SortObserver,
}

impl<'a> SortRun<'a> {
    fn new(input: &[u32], pacer: &'a Pacer, observer: &'a mut dyn SortObserver) -> Self {
        SortRun {
            array: input.to_vec(),
            access: vec![0; input.len()],
            comparisons: 0,
            swaps: 0,
            step: 0,
            total_steps: 0.0,
            pacer,
            observer,
        }
    }

    fn len(&self) -> usize {
        self.array.len()
    }

    fn check(&self) -> std::result::Result<(), Cancelled> {
        self.pacer.token().check()
    }

    /// Borrows only the pacer, so the run itself need not be `Sync`.
    fn pause(&self, fraction: f64) -> impl Future<Output = std::result::Result<(), Cancelled>> + 'a {
        let pacer: &'a Pacer = self.pacer;
        pacer.pause(fraction)
    }

    fn narrate(&mut self, text: &str) {
        self.observer.on_narration(text);
    }

    fn highlight(&mut self, indices: &[usize]) {
        self.observer.on_active_indices(indices);
    }

    fn touch(&mut self, indices: &[usize]) {
        for &index in indices {
            if let Some(count) = self.access.get_mut(index) {
                *count += 1;
            }
        }
        self.observer.on_access_pattern(&self.access);
    }

    fn compare(&mut self) {
        self.compare_by(1);
    }

    fn compare_by(&mut self, count: u64) {
        self.comparisons += count;
        self.observer.on_comparisons(self.comparisons);
    }

    fn count_swap(&mut self) {
        self.swaps += 1;
        self.observer.on_swaps(self.swaps);
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.array.swap(i, j);
        self.count_swap();
        self.publish();
    }

    fn publish(&mut self) {
        self.observer.on_array_change(&self.array);
    }

    fn set_total_steps(&mut self, total: f64) {
        self.total_steps = total;
    }

    fn advance(&mut self) {
        self.advance_by(1);
    }

    fn advance_by(&mut self, steps: usize) {
        self.step += steps;
        self.observer.on_progress(percent(self.step, self.total_steps));
    }

    fn set_progress(&mut self, value: u8) {
        self.observer.on_progress(value);
    }
}

/// `n * log2(n) * 2`, the estimate used by the n log n sorts.
fn n_log_n_steps(n: usize) -> f64 {
    let n = n as f64;
    n * n.log2() * 2.0
}

/// Placed values where they have landed, pending values in order in the
/// remaining slots.
fn overlay(placed: &[Option<u32>], pending: &[u32]) -> Vec<u32> {
    let mut pending = pending.iter().copied();
    placed
        .iter()
        .map(|slot| slot.or_else(|| pending.next()).unwrap_or_default())
        .collect()
}

/// Run `algorithm` over a copy of `input`, publishing to `observer`.
///
/// Returns when the array is sorted or when the pacer's token is seen
/// cancelled; a cancelled run leaves the array as last published. The
/// active highlight is cleared in both cases.
#[tracing::instrument(skip_all, fields(algorithm = %algorithm, len = input.len()))]
pub async fn run_sort(
    algorithm: SortAlgorithm,
    input: &[u32],
    pacer: &Pacer,
    observer: &mut dyn SortObserver,
) -> Result<SortReport> {
    if input.is_empty() {
        return Err(ConfigError::EmptyArray);
    }
    let started = Instant::now();
    let mut run = SortRun::new(input, pacer, observer);
    run.observer.on_running_change(true);
    run.observer.on_comparisons(0);
    run.observer.on_swaps(0);
    run.set_progress(0);
    run.observer.on_access_pattern(&run.access);

    let result = match algorithm {
        SortAlgorithm::BubbleSort => bubble::sort(&mut run).await,
        SortAlgorithm::SelectionSort => selection::sort(&mut run).await,
        SortAlgorithm::InsertionSort => insertion::sort(&mut run).await,
        SortAlgorithm::QuickSort => quick::sort(&mut run).await,
        SortAlgorithm::MergeSort => merge::sort(&mut run).await,
        SortAlgorithm::HeapSort => heap::sort(&mut run).await,
        SortAlgorithm::CountingSort => counting::sort(&mut run).await,
        SortAlgorithm::RadixSort => radix::sort(&mut run).await,
        SortAlgorithm::BucketSort => bucket::sort(&mut run).await,
    };

    run.highlight(&[]);
    let outcome = RunOutcome::from(result);
    match outcome {
        RunOutcome::Completed => {
            run.narrate(algorithm.completion_message());
            run.set_progress(100);
        }
        RunOutcome::Cancelled => tracing::debug!("sort cancelled"),
    }
    run.observer.on_running_change(false);

    Ok(SortReport {
        algorithm,
        outcome,
        comparisons: run.comparisons,
        swaps: run.swaps,
        array: run.array,
        elapsed: started.elapsed(),
    })
}
