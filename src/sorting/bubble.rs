// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use super::SortRun;
use crate::control::{percent, Cancelled};

/// Adjacent compare-and-swap passes, stopping after a pass with no swap.
pub(super) async fn sort(run: &mut SortRun<'_>) -> Result<(), Cancelled> {
    let n = run.len();
    for pass in 0..n.saturating_sub(1) {
        run.check()?;
        let mut swapped = false;
        run.narrate(&format!(
            "Pass {}: Comparing adjacent elements and swapping if needed",
            pass + 1
        ));
        run.set_progress(percent(pass, (n - 1) as f64));

        for j in 0..n - pass - 1 {
            run.check()?;
            run.highlight(&[j, j + 1]);
            run.touch(&[j, j + 1]);
            run.compare();
            run.pause(1.0).await?;

            if run.array[j] > run.array[j + 1] {
                run.swap(j, j + 1);
                swapped = true;
                run.pause(1.0).await?;
            }
        }

        if !swapped {
            break;
        }
    }
    Ok(())
}
