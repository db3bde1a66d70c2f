// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Sorting engine properties over arbitrary inputs.

mod common;

use algo_stepper::control::{CancellationToken, Pacer, RunOutcome};
use algo_stepper::sorting::{run_sort, SortAlgorithm, SortObserver};
use common::{is_permutation, sorted};
use proptest::prelude::*;
use std::time::Duration;
use strum::IntoEnumIterator;

#[derive(Default)]
struct Snapshots {
    arrays: Vec<Vec<u32>>,
}

impl SortObserver for Snapshots {
    fn on_array_change(&mut self, array: &[u32]) {
        self.arrays.push(array.to_vec());
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_algorithm_sorts_and_only_permutes(input in prop::collection::vec(0u32..500, 1..40)) {
        let rt = runtime();
        for algorithm in SortAlgorithm::iter() {
            let mut snapshots = Snapshots::default();
            let report = rt.block_on(async {
                let pacer = Pacer::from_millis(0, CancellationToken::new());
                run_sort(algorithm, &input, &pacer, &mut snapshots).await
            }).unwrap();
            prop_assert_eq!(report.outcome, RunOutcome::Completed);
            prop_assert_eq!(&report.array, &sorted(&input), "{}", algorithm);
            for array in &snapshots.arrays {
                prop_assert!(is_permutation(array, &input), "{} published {:?}", algorithm, array);
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn cancelled_runs_leave_a_permutation() {
    let input: Vec<u32> = (1..=40).rev().collect();
    for algorithm in SortAlgorithm::iter() {
        let token = CancellationToken::new();
        let pacer = Pacer::from_millis(10, token.clone());
        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(55)).await;
            token.cancel();
        });
        let mut snapshots = Snapshots::default();
        let report = run_sort(algorithm, &input, &pacer, &mut snapshots).await.unwrap();
        stopper.await.unwrap();

        assert_eq!(report.outcome, RunOutcome::Cancelled, "{algorithm}");
        assert!(is_permutation(&report.array, &input), "{algorithm}");
        if let Some(last) = snapshots.arrays.last() {
            assert_eq!(last, &report.array, "{algorithm} mutated after its last publish");
        }
    }
}
