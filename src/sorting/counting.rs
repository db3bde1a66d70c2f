// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Counting sort over the value range `min..=max` of the input.

use super::{overlay, SortRun};
use crate::control::Cancelled;

pub(super) async fn sort(run: &mut SortRun<'_>) -> Result<(), Cancelled> {
    let n = run.len();
    run.set_total_steps((n * 3) as f64);

    let mut max = run.array[0];
    let mut min = run.array[0];
    for i in 1..n {
        run.check()?;
        run.touch(&[i]);
        run.highlight(&[i]);
        let value = run.array[i];
        run.narrate(&format!("Finding maximum value: comparing {value} with current max {max}"));
        run.compare();
        max = max.max(value);
        min = min.min(value);
        run.advance();
        run.pause(0.5).await?;
    }

    let mut count = vec![0usize; (max - min) as usize + 1];
    run.narrate("Counting occurrences of each element");
    for i in 0..n {
        run.check()?;
        run.touch(&[i]);
        run.highlight(&[i]);
        count[(run.array[i] - min) as usize] += 1;
        run.advance();
        run.pause(0.5).await?;
    }

    run.narrate("Calculating positions in the sorted array");
    for k in 1..count.len() {
        count[k] += count[k - 1];
        run.pause(0.25).await?;
    }

    let source = run.array.clone();
    let mut output: Vec<Option<u32>> = vec![None; n];
    run.narrate("Building the sorted array");
    for i in (0..n).rev() {
        run.check()?;
        run.touch(&[i]);
        let element = source[i];
        let slot = &mut count[(element - min) as usize];
        *slot -= 1;
        let position = *slot;
        run.highlight(&[i, position]);
        run.narrate(&format!("Placing element {element} at position {position}"));
        output[position] = Some(element);
        run.count_swap();
        run.advance();
        run.array = overlay(&output, &source[..i]);
        run.publish();
        run.pause(1.0).await?;
    }
    Ok(())
}
