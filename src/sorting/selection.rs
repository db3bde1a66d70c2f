// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use super::SortRun;
use crate::control::Cancelled;

pub(super) async fn sort(run: &mut SortRun<'_>) -> Result<(), Cancelled> {
    let n = run.len();
    run.set_total_steps((n * n) as f64);

    for i in 0..n {
        run.check()?;
        let mut min_index = i;
        run.narrate(&format!("Finding minimum element starting from position {i}"));
        run.highlight(&[i]);
        run.touch(&[i]);

        for j in i + 1..n {
            run.check()?;
            run.compare();
            run.touch(&[j, min_index]);
            run.highlight(&[min_index, j]);
            run.narrate(&format!("Comparing elements at positions {min_index} and {j}"));
            run.advance();
            run.pause(0.5).await?;

            if run.array[j] < run.array[min_index] {
                min_index = j;
                run.highlight(&[min_index]);
                run.narrate(&format!("Found new minimum at position {min_index}"));
            }
            run.pause(0.5).await?;
        }

        if min_index != i {
            run.highlight(&[i, min_index]);
            run.narrate(&format!("Swapping elements at positions {i} and {min_index}"));
            run.touch(&[i, min_index]);
            run.swap(i, min_index);
            run.pause(1.0).await?;
        }

        run.highlight(&[i]);
        run.narrate(&format!("Element at position {i} is now in its correct position"));
        run.pause(0.5).await?;
    }
    Ok(())
}
