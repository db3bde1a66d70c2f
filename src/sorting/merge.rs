// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Top-down merge sort.
//!
//! While merging, the window `left..=right` shows the merged prefix
//! followed by the unmerged rest of the left run and then of the right run.

use super::{n_log_n_steps, SortRun, SortStep};
use crate::control::Cancelled;

pub(super) async fn sort(run: &mut SortRun<'_>) -> Result<(), Cancelled> {
    let n = run.len();
    run.set_total_steps(n_log_n_steps(n));
    merge_sort(run, 0, n - 1).await
}

fn merge_sort<'r, 'a: 'r>(run: &'r mut SortRun<'a>, left: usize, right: usize) -> SortStep<'r> {
    Box::pin(async move {
        if left >= right {
            return Ok(());
        }
        let mid = (left + right) / 2;
        run.narrate(&format!("Dividing array at index {mid}"));
        run.highlight(&[mid]);
        run.pause(0.5).await?;

        merge_sort(run, left, mid).await?;
        merge_sort(run, mid + 1, right).await?;
        merge(run, left, mid, right).await
    })
}

/// Rewrite `left..` as merged ++ lower[i..] ++ upper[j..].
fn lay_out(run: &mut SortRun<'_>, left: usize, merged: &[u32], lower: &[u32], upper: &[u32]) {
    let window = merged.iter().chain(lower).chain(upper).copied();
    for (slot, value) in run.array[left..].iter_mut().zip(window) {
        *slot = value;
    }
}

async fn merge(run: &mut SortRun<'_>, left: usize, mid: usize, right: usize) -> Result<(), Cancelled> {
    run.narrate(&format!(
        "Merging subarrays from index {left} to {mid} and {} to {right}",
        mid + 1
    ));
    let lower = run.array[left..=mid].to_vec();
    let upper = run.array[mid + 1..=right].to_vec();
    let touched: Vec<usize> = (left..=right).collect();
    run.touch(&touched);

    let mut merged = Vec::with_capacity(right - left + 1);
    let (mut i, mut j) = (0, 0);
    while i < lower.len() && j < upper.len() {
        run.check()?;
        run.compare();
        run.narrate(&format!("Comparing elements {} and {}", lower[i], upper[j]));
        run.highlight(&[left + i, mid + 1 + j]);
        run.advance();
        run.pause(0.5).await?;

        if lower[i] <= upper[j] {
            merged.push(lower[i]);
            i += 1;
        } else {
            merged.push(upper[j]);
            j += 1;
        }
        run.touch(&[left + merged.len() - 1]);
        run.count_swap();
        lay_out(run, left, &merged, &lower[i..], &upper[j..]);
        run.publish();
        run.pause(1.0).await?;
    }

    while i < lower.len() {
        run.check()?;
        run.narrate("Copying remaining elements from left subarray");
        run.highlight(&[left + i]);
        merged.push(lower[i]);
        i += 1;
        run.touch(&[left + merged.len() - 1]);
        run.count_swap();
        lay_out(run, left, &merged, &lower[i..], &upper[j..]);
        run.publish();
        run.pause(1.0).await?;
    }

    while j < upper.len() {
        run.check()?;
        run.narrate("Copying remaining elements from right subarray");
        run.highlight(&[mid + 1 + j]);
        merged.push(upper[j]);
        j += 1;
        run.touch(&[left + merged.len() - 1]);
        run.count_swap();
        lay_out(run, left, &merged, &lower[i..], &upper[j..]);
        run.publish();
        run.pause(1.0).await?;
    }
    Ok(())
}
