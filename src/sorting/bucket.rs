// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bucket sort with `min(n, 10)` equal-width buckets and insertion sort
//! inside each bucket.

use super::SortRun;
use crate::control::Cancelled;

const MAX_BUCKETS: usize = 10;

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
        run.narrate(&format!(
            "Finding range: comparing {value} with current min {min} and max {max}"
        ));
        run.compare_by(2);
        max = max.max(value);
        min = min.min(value);
        run.advance();
        run.pause(0.5).await?;
    }

    let bucket_count = n.min(MAX_BUCKETS);
    let range = u64::from(max - min) + 1;
    let mut buckets: Vec<Vec<u32>> = vec![Vec::new(); bucket_count];
    run.narrate("Distributing elements into buckets");
    for i in 0..n {
        run.check()?;
        run.touch(&[i]);
        let value = run.array[i];
        let scaled = bucket_count as u64 * u64::from(value - min) / range;
        let index = (scaled as usize).min(bucket_count - 1);
        run.highlight(&[i]);
        run.narrate(&format!("Placing {value} in bucket {index}"));
        buckets[index].push(value);
        run.advance();
        run.pause(1.0).await?;
    }

    run.narrate("Sorting individual buckets");
    for b in 0..bucket_count {
        run.check()?;
        let len = buckets[b].len();
        run.narrate(&format!("Sorting bucket {b} with {len} elements"));
        for j in 1..len {
            run.check()?;
            let current = buckets[b][j];
            let mut k = j;
            run.compare();
            while k > 0 && buckets[b][k - 1] > current {
                run.check()?;
                buckets[b].swap(k - 1, k);
                k -= 1;
                run.count_swap();
                run.compare();
            }
            run.array = buckets.concat();
            run.publish();
            run.pause(0.5).await?;
        }
        run.advance_by(len);
    }

    run.array = buckets.concat();
    run.publish();
    run.narrate("Concatenating sorted buckets");
    let mut index = 0;
    for (b, bucket) in buckets.iter().enumerate() {
        run.check()?;
        run.narrate(&format!("Adding elements from bucket {b} to the final array"));
        for &value in bucket {
            run.check()?;
            run.touch(&[index]);
            run.highlight(&[index]);
            run.array[index] = value;
            index += 1;
            run.publish();
            run.pause(0.5).await?;
        }
    }
    Ok(())
}
