// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Input arrays for the sorting engine.
//!
//! These double as the challenge presets: each kind has a short name and a
//! one-line description.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter, EnumString};

/// Values drawn by [`ArrayKind::FewUnique`].
pub const FEW_UNIQUE_VALUES: [u32; 5] = [10, 30, 50, 70, 90];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumCount, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ArrayKind {
    /// Uniform values in 1..=100.
    #[default]
    Random,
    /// 1..=n with about 10% random swaps.
    NearlySorted,
    /// n down to 1.
    Reversed,
    /// Values from [`FEW_UNIQUE_VALUES`].
    FewUnique,
    /// 1..=n with exactly three random swaps.
    MostlySorted,
}

impl ArrayKind {
    pub fn title(self) -> &'static str {
        match self {
            ArrayKind::Random => "Random Array",
            ArrayKind::NearlySorted => "Nearly Sorted",
            ArrayKind::Reversed => "Reversed",
            ArrayKind::FewUnique => "Few Unique",
            ArrayKind::MostlySorted => "Mostly Sorted",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ArrayKind::Random => "Sort a completely random array",
            ArrayKind::NearlySorted => "Sort an array that's almost in order",
            ArrayKind::Reversed => "Sort an array in reverse order (worst case)",
            ArrayKind::FewUnique => "Sort an array with only a few unique values",
            ArrayKind::MostlySorted => "Sort an array where only a few elements are out of place",
        }
    }
}

fn ascending(size: usize) -> Vec<u32> {
    (1..=size as u32).collect()
}

/// Swap `count` random pairs. A pair may pick the same index twice.
fn scramble<R: Rng + ?Sized>(values: &mut [u32], count: usize, rng: &mut R) {
    if values.is_empty() {
        return;
    }
    for _ in 0..count {
        let a = rng.gen_range(0..values.len());
        let b = rng.gen_range(0..values.len());
        values.swap(a, b);
    }
}

pub fn generate_array<R: Rng + ?Sized>(kind: ArrayKind, size: usize, rng: &mut R) -> Vec<u32> {
    match kind {
        ArrayKind::Random => (0..size).map(|_| rng.gen_range(1..=100)).collect(),
        ArrayKind::NearlySorted => {
            let mut values = ascending(size);
            scramble(&mut values, size / 10, rng);
            values
        }
        ArrayKind::Reversed => (1..=size as u32).rev().collect(),
        ArrayKind::FewUnique => (0..size)
            .filter_map(|_| FEW_UNIQUE_VALUES.choose(rng).copied())
            .collect(),
        ArrayKind::MostlySorted => {
            let mut values = ascending(size);
            scramble(&mut values, 3, rng);
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strum::IntoEnumIterator;

    #[test]
    fn every_kind_has_the_requested_length() {
        let mut rng = StdRng::seed_from_u64(5);
        for kind in ArrayKind::iter() {
            assert_eq!(generate_array(kind, 37, &mut rng).len(), 37, "{kind}");
            assert!(generate_array(kind, 0, &mut rng).is_empty());
        }
    }

    #[test]
    fn shapes() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(generate_array(ArrayKind::Reversed, 4, &mut rng), vec![4, 3, 2, 1]);

        let random = generate_array(ArrayKind::Random, 200, &mut rng);
        assert!(random.iter().all(|v| (1..=100).contains(v)));

        let few = generate_array(ArrayKind::FewUnique, 50, &mut rng);
        assert!(few.iter().all(|v| FEW_UNIQUE_VALUES.contains(v)));

        for kind in [ArrayKind::NearlySorted, ArrayKind::MostlySorted] {
            let mut values = generate_array(kind, 30, &mut rng);
            values.sort_unstable();
            assert_eq!(values, ascending(30));
        }
    }
}
