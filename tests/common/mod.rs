// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reference answers computed independently of the engines under test.

#![allow(dead_code)]

use algo_stepper::graph::Graph;
use algo_stepper::pathfinding::{Cell, Grid};
use std::collections::{HashMap, VecDeque};

/// Node count of a shortest start-to-finish path, or `None` if unreachable.
pub fn reference_path_nodes(grid: &Grid) -> Option<usize> {
    let mut distance: HashMap<Cell, usize> = HashMap::from([(grid.start(), 1)]);
    let mut queue = VecDeque::from([grid.start()]);
    while let Some(cell) = queue.pop_front() {
        let here = distance[&cell];
        if cell == grid.finish() {
            return Some(here);
        }
        let (row, col) = cell;
        let candidates = [
            row.checked_sub(1).map(|r| (r, col)),
            Some((row + 1, col)),
            col.checked_sub(1).map(|c| (row, c)),
            Some((row, col + 1)),
        ];
        for next in candidates.into_iter().flatten() {
            let open = grid.get(next).is_some_and(|node| !node.is_wall);
            if open && !distance.contains_key(&next) {
                distance.insert(next, here + 1);
                queue.push_back(next);
            }
        }
    }
    None
}

/// Minimum spanning forest weight: edges lightest first, components tracked
/// by relabelling rather than union-find.
pub fn reference_mst_weight(graph: &Graph) -> u64 {
    let mut component: HashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();
    let mut edges: Vec<_> = graph.edges.iter().collect();
    edges.sort_by_key(|edge| edge.weight);
    let mut total = 0;
    for edge in edges {
        let a = component[edge.source.as_str()];
        let b = component[edge.target.as_str()];
        if a != b {
            total += u64::from(edge.weight);
            for label in component.values_mut() {
                if *label == b {
                    *label = a;
                }
            }
        }
    }
    total
}

pub fn sorted(values: &[u32]) -> Vec<u32> {
    let mut values = values.to_vec();
    values.sort_unstable();
    values
}

pub fn is_permutation(a: &[u32], b: &[u32]) -> bool {
    sorted(a) == sorted(b)
}
