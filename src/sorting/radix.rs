// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Least-significant-digit radix sort in base 10.

use super::{overlay, SortRun};
use crate::control::Cancelled;

fn digit_of(value: u32, place: u32) -> usize {
    ((u64::from(value) / 10u64.pow(place)) % 10) as usize
}

pub(super) async fn sort(run: &mut SortRun<'_>) -> Result<(), Cancelled> {
    let n = run.len();
    let mut max = run.array[0];
    for i in 1..n {
        max = max.max(run.array[i]);
        run.compare();
    }
    let max_digits = max.to_string().len();
    run.set_total_steps((n * max_digits) as f64);

    for place in 0..max_digits as u32 {
        run.check()?;
        run.narrate(&format!("Sorting by digit position {} (from right)", place + 1));
        let mut count = [0usize; 10];
        for i in 0..n {
            run.check()?;
            run.touch(&[i]);
            let value = run.array[i];
            let digit = digit_of(value, place);
            run.highlight(&[i]);
            run.narrate(&format!("Counting digit {digit} from number {value}"));
            count[digit] += 1;
            run.advance();
            run.pause(0.25).await?;
        }
        for d in 1..10 {
            count[d] += count[d - 1];
        }

        let source = run.array.clone();
        let mut output: Vec<Option<u32>> = vec![None; n];
        for i in (0..n).rev() {
            run.check()?;
            run.touch(&[i]);
            let value = source[i];
            let digit = digit_of(value, place);
            count[digit] -= 1;
            let position = count[digit];
            run.highlight(&[i, position]);
            run.narrate(&format!("Placing {value} (digit {digit}) at position {position}"));
            output[position] = Some(value);
            run.count_swap();
            run.array = overlay(&output, &source[..i]);
            run.publish();
            run.pause(1.0).await?;
        }
        run.publish();
        run.pause(1.0).await?;
    }
    Ok(())
}
