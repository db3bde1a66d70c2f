// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The four grid searches.
//!
//! A search writes distances, scores and backlinks into the grid nodes but
//! leaves `is_visited` and `is_path` alone: those are painted by the replay.
//! Visitation is tracked in a local mask so a search never depends on stale
//! flags from an earlier replay.

use super::grid::{Cell, Grid};
use super::PathAlgorithm;
use serde::Serialize;
use std::collections::VecDeque;

/// The two ordered lists a replay paints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Cells in the order they were settled, start first.
    pub visited: Vec<Cell>,
    /// Start to finish inclusive, or empty when the finish is unreachable.
    pub path: Vec<Cell>,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

struct Mask {
    cols: usize,
    seen: Vec<bool>,
}

impl Mask {
    fn new(grid: &Grid) -> Self {
        Mask {
            cols: grid.cols(),
            seen: vec![false; grid.rows() * grid.cols()],
        }
    }

    fn get(&self, (row, col): Cell) -> bool {
        self.seen[row * self.cols + col]
    }

    /// Returns whether the cell was newly marked.
    fn mark(&mut self, (row, col): Cell) -> bool {
        let slot = &mut self.seen[row * self.cols + col];
        !std::mem::replace(slot, true)
    }
}

fn manhattan(a: Cell, b: Cell) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}

/// Open, unvisited neighbours of `cell`.
fn frontier(grid: &Grid, mask: &Mask, cell: Cell) -> Vec<Cell> {
    grid.neighbors(cell)
        .filter(|&next| !grid.is_wall(next) && !mask.get(next))
        .collect()
}

fn bfs(grid: &mut Grid) -> Vec<Cell> {
    let (start, finish) = (grid.start(), grid.finish());
    let mut order = Vec::new();
    let mut discovered = Mask::new(grid);
    let mut queue = VecDeque::from([start]);
    discovered.mark(start);
    grid.node_mut(start).distance = Some(0);

    while let Some(current) = queue.pop_front() {
        order.push(current);
        if current == finish {
            break;
        }
        let distance = grid.node(current).distance.unwrap_or(0);
        for next in frontier(grid, &discovered, current) {
            discovered.mark(next);
            let node = grid.node_mut(next);
            node.distance = Some(distance + 1);
            node.previous = Some(current);
            queue.push_back(next);
        }
    }
    order
}

fn dfs(grid: &mut Grid) -> Vec<Cell> {
    let (start, finish) = (grid.start(), grid.finish());
    let mut order = Vec::new();
    let mut visited = Mask::new(grid);
    let mut stack = vec![start];
    grid.node_mut(start).distance = Some(0);

    while let Some(current) = stack.pop() {
        if !visited.mark(current) {
            continue;
        }
        order.push(current);
        if current == finish {
            break;
        }
        let distance = grid.node(current).distance.unwrap_or(0);
        // A cell pushed twice takes the backlink of its latest pusher, which
        // is always already settled.
        for next in frontier(grid, &visited, current) {
            let node = grid.node_mut(next);
            node.distance = Some(distance + 1);
            node.previous = Some(current);
            stack.push(next);
        }
    }
    order
}

fn dijkstra(grid: &mut Grid) -> Vec<Cell> {
    let (start, finish) = (grid.start(), grid.finish());
    let mut order = Vec::new();
    let mut visited = Mask::new(grid);
    grid.node_mut(start).distance = Some(0);
    let mut unvisited: Vec<Cell> = grid
        .nodes()
        .iter()
        .filter(|node| !node.is_wall)
        .map(|node| node.cell())
        .collect();

    while !unvisited.is_empty() {
        // Stable: equal distances keep row-major order.
        unvisited.sort_by_key(|&cell| grid.node(cell).distance.unwrap_or(u32::MAX));
        let closest = unvisited.remove(0);
        let Some(distance) = grid.node(closest).distance else {
            break;
        };
        visited.mark(closest);
        order.push(closest);
        if closest == finish {
            break;
        }
        for next in frontier(grid, &visited, closest) {
            let node = grid.node_mut(next);
            if node.distance.map_or(true, |known| distance + 1 < known) {
                node.distance = Some(distance + 1);
                node.previous = Some(closest);
            }
        }
    }
    order
}

fn astar(grid: &mut Grid) -> Vec<Cell> {
    let (start, finish) = (grid.start(), grid.finish());
    let mut order = Vec::new();
    let mut visited = Mask::new(grid);
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            grid.node_mut((row, col)).h_score = Some(manhattan((row, col), finish));
        }
    }
    {
        let node = grid.node_mut(start);
        node.g_score = Some(0);
        node.f_score = node.h_score;
        node.distance = Some(0);
    }
    let mut open = vec![start];

    while !open.is_empty() {
        open.sort_by_key(|&cell| grid.node(cell).f_score.unwrap_or(u32::MAX));
        let current = open.remove(0);
        if !visited.mark(current) {
            continue;
        }
        order.push(current);
        if current == finish {
            break;
        }
        let tentative = grid.node(current).g_score.unwrap_or(0) + 1;
        for next in frontier(grid, &visited, current) {
            let node = grid.node_mut(next);
            if node.g_score.map_or(true, |known| tentative < known) {
                node.previous = Some(current);
                node.g_score = Some(tentative);
                node.distance = Some(tentative);
                node.f_score = node.h_score.map(|h| tentative + h);
                if !open.contains(&next) {
                    open.push(next);
                }
            }
        }
    }
    order
}

/// Unwind backlinks from the finish. Empty unless the chain reaches the start.
pub fn shortest_path(grid: &Grid) -> Vec<Cell> {
    let (start, finish) = (grid.start(), grid.finish());
    let mut path = vec![finish];
    let mut current = finish;
    while current != start {
        match grid.node(current).previous {
            // A chain longer than the grid has looped.
            Some(previous) if path.len() <= grid.nodes().len() => {
                path.push(previous);
                current = previous;
            }
            _ => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// Run one search over `grid`, clearing the previous search first.
///
/// Walls and endpoints are read from the grid as it stands.
#[tracing::instrument(skip_all, fields(algorithm = %algorithm, rows = grid.rows(), cols = grid.cols()))]
pub fn visualize(grid: &mut Grid, algorithm: PathAlgorithm) -> SearchResult {
    grid.clear_path();
    let visited = match algorithm {
        PathAlgorithm::Bfs => bfs(grid),
        PathAlgorithm::Dfs => dfs(grid),
        PathAlgorithm::Dijkstra => dijkstra(grid),
        PathAlgorithm::AStar => astar(grid),
    };
    let path = shortest_path(grid);
    if path.is_empty() {
        tracing::debug!(explored = visited.len(), "no path");
    } else {
        tracing::debug!(explored = visited.len(), length = path.len(), "path found");
    }
    SearchResult { visited, path }
}
