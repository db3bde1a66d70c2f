// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use super::SortRun;
use crate::control::Cancelled;

/// Insertion by adjacent swaps, so every published array is a
/// permutation of the input.
pub(super) async fn sort(run: &mut SortRun<'_>) -> Result<(), Cancelled> {
    let n = run.len();
    run.set_total_steps((n * n) as f64);

    for i in 1..n {
        run.check()?;
        let current = run.array[i];
        run.touch(&[i]);
        run.highlight(&[i]);
        run.narrate(&format!("Inserting element at position {i} into the sorted portion"));

        let mut j = i;
        while j > 0 && run.array[j - 1] > current {
            run.check()?;
            run.compare();
            run.touch(&[j - 1, j]);
            run.highlight(&[j - 1, j]);
            run.narrate(&format!("Moving element at position {} to position {j}", j - 1));
            run.advance();
            run.swap(j - 1, j);
            j -= 1;
            run.pause(1.0).await?;
        }

        run.highlight(&[j]);
        run.narrate(&format!("Placed element {current} at position {j}"));
        run.pause(1.0).await?;
    }
    Ok(())
}
