// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Lomuto-partition quicksort with the last element as pivot.
//!
//! Bounds are signed so that an empty left range `low..=pivot-1` can be
//! narrated the way it is entered.

use super::{n_log_n_steps, SortRun, SortStep};
use crate::control::Cancelled;

pub(super) async fn sort(run: &mut SortRun<'_>) -> Result<(), Cancelled> {
    let n = run.len();
    run.set_total_steps(n_log_n_steps(n));
    quick_sort(run, 0, n as isize - 1).await
}

fn quick_sort<'r, 'a: 'r>(run: &'r mut SortRun<'a>, low: isize, high: isize) -> SortStep<'r> {
    Box::pin(async move {
        if low >= high {
            return Ok(());
        }
        run.narrate(&format!("Sorting subarray from index {low} to {high}"));
        let pivot = partition(run, low as usize, high as usize).await? as isize;

        run.narrate(&format!(
            "Recursively sorting left subarray from index {low} to {}",
            pivot - 1
        ));
        quick_sort(run, low, pivot - 1).await?;

        run.narrate(&format!(
            "Recursively sorting right subarray from index {} to {high}",
            pivot + 1
        ));
        quick_sort(run, pivot + 1, high).await
    })
}

/// Returns the pivot's final index.
async fn partition(run: &mut SortRun<'_>, low: usize, high: usize) -> Result<usize, Cancelled> {
    let pivot = run.array[high];
    run.touch(&[high]);
    run.narrate(&format!(
        "Partitioning array from index {low} to {high} with pivot {pivot}"
    ));
    run.highlight(&[high]);
    run.pause(1.0).await?;

    // Next slot for an element <= pivot.
    let mut store = low;
    for j in low..high {
        run.check()?;
        run.compare();
        run.touch(&[j, high]);
        run.highlight(&[j, high]);
        run.narrate(&format!("Comparing element at position {j} with pivot {pivot}"));
        run.advance();
        run.pause(0.5).await?;

        if run.array[j] <= pivot {
            run.highlight(&[store, j]);
            run.narrate(&format!("Swapping elements at positions {store} and {j}"));
            run.touch(&[store, j]);
            run.swap(store, j);
            store += 1;
            run.pause(1.0).await?;
        }
    }

    run.check()?;
    run.highlight(&[store, high]);
    run.narrate(&format!("Placing pivot at its correct position {store}"));
    run.touch(&[store, high]);
    run.swap(store, high);
    run.pause(1.0).await?;
    Ok(store)
}
