// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use super::{n_log_n_steps, SortRun};
use crate::control::Cancelled;

pub(super) async fn sort(run: &mut SortRun<'_>) -> Result<(), Cancelled> {
    let n = run.len();
    run.set_total_steps(n_log_n_steps(n));

    run.narrate("Building max heap");
    for i in (0..n / 2).rev() {
        run.check()?;
        heapify(run, n, i).await?;
    }

    for end in (1..n).rev() {
        run.check()?;
        run.narrate(&format!("Moving largest element to position {end}"));
        run.highlight(&[0, end]);
        run.touch(&[0, end]);
        run.swap(0, end);
        run.pause(1.0).await?;
        heapify(run, end, 0).await?;
    }
    Ok(())
}

/// Sift `root` down within the first `size` elements.
async fn heapify(run: &mut SortRun<'_>, size: usize, root: usize) -> Result<(), Cancelled> {
    let mut root = root;
    loop {
        let mut largest = root;
        let left = 2 * root + 1;
        let right = 2 * root + 2;
        run.narrate(&format!("Heapifying at index {root}"));
        run.highlight(&[root]);
        run.touch(&[root]);
        run.pause(0.5).await?;

        if left < size {
            run.check()?;
            run.compare();
            run.touch(&[largest, left]);
            run.narrate(&format!("Comparing elements at positions {largest} and {left}"));
            run.highlight(&[largest, left]);
            run.advance();
            run.pause(0.5).await?;
            if run.array[left] > run.array[largest] {
                largest = left;
                run.narrate(&format!("New largest element at position {largest}"));
                run.highlight(&[largest]);
                run.pause(0.5).await?;
            }
        }

        if right < size {
            run.check()?;
            run.compare();
            run.touch(&[largest, right]);
            run.narrate(&format!("Comparing elements at positions {largest} and {right}"));
            run.highlight(&[largest, right]);
            run.advance();
            run.pause(0.5).await?;
            if run.array[right] > run.array[largest] {
                largest = right;
                run.narrate(&format!("New largest element at position {largest}"));
                run.highlight(&[largest]);
                run.pause(0.5).await?;
            }
        }

        if largest == root {
            return Ok(());
        }
        run.check()?;
        run.narrate(&format!("Swapping elements at positions {root} and {largest}"));
        run.highlight(&[root, largest]);
        run.touch(&[root, largest]);
        run.swap(root, largest);
        run.pause(1.0).await?;
        root = largest;
    }
}
