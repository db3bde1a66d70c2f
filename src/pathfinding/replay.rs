// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Two-phase paced replay of a finished search.
//!
//! Phase one paints the visited cells at half the configured delay, phase
//! two paints the path at the full delay. Each paint is published before
//! the pause that follows it.

use super::grid::{Cell, Grid, GridNode};
use super::search::{visualize, SearchResult};
use super::PathAlgorithm;
use crate::control::{percent, Cancelled, Pacer, RunOutcome};
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

pub const STOPPED: &str = "Visualization stopped. Click Visualize to restart.";
pub const UNREACHABLE: &str = "No path found! The target is unreachable.";

/// Receives every published change of a pathfinding run.
pub trait PathObserver: Send {
    /// A cell's flags changed.
    fn on_cell(&mut self, _node: &GridNode) {}
    fn on_progress(&mut self, _percent: u8) {}
    fn on_narration(&mut self, _text: &str) {}
    fn on_running_change(&mut self, _running: bool) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullPathObserver;

impl PathObserver for NullPathObserver {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathReport {
    pub algorithm: PathAlgorithm,
    pub outcome: RunOutcome,
    pub result: SearchResult,
    pub elapsed: Duration,
}

pub fn summary(result: &SearchResult) -> String {
    if result.found() {
        format!(
            "Path found! Length: {} nodes, Explored: {} nodes",
            result.path.len(),
            result.visited.len()
        )
    } else {
        UNREACHABLE.to_string()
    }
}

struct Painter<'g, 'o> {
    grid: &'g mut Grid,
    observer: &'o mut dyn PathObserver,
    step: usize,
    total: f64,
}

impl Painter<'_, '_> {
    fn paint(&mut self, cell: Cell, apply: impl FnOnce(&mut GridNode), text: String) {
        let node = self.grid.node_mut(cell);
        apply(node);
        self.observer.on_cell(node);
        self.observer.on_progress(percent(self.step, self.total));
        self.observer.on_narration(&text);
        self.step += 1;
    }
}

async fn paint_all(
    painter: &mut Painter<'_, '_>,
    result: &SearchResult,
    pacer: &Pacer,
) -> Result<(), Cancelled> {
    for &cell in &result.visited {
        pacer.token().check()?;
        painter.paint(
            cell,
            |node| node.is_visited = true,
            format!("Exploring node at ({}, {})...", cell.0, cell.1),
        );
        pacer.pause(0.5).await?;
    }
    let length = result.path.len();
    for (index, &cell) in result.path.iter().enumerate() {
        pacer.token().check()?;
        painter.paint(
            cell,
            |node| node.is_path = true,
            format!("Building shortest path... ({}/{} nodes)", index + 1, length),
        );
        pacer.pause(1.0).await?;
    }
    Ok(())
}

/// Paint `result` onto `grid`.
///
/// A cancelled replay leaves the grid as last painted and narrates the stop.
pub async fn animate(
    grid: &mut Grid,
    result: &SearchResult,
    pacer: &Pacer,
    observer: &mut dyn PathObserver,
) -> RunOutcome {
    let total = (result.visited.len() + result.path.len()) as f64;
    let mut painter = Painter {
        grid,
        observer,
        step: 0,
        total,
    };
    let outcome = RunOutcome::from(paint_all(&mut painter, result, pacer).await);
    let observer = painter.observer;
    match outcome {
        RunOutcome::Completed => {
            observer.on_narration(&summary(result));
            observer.on_progress(100);
        }
        RunOutcome::Cancelled => {
            tracing::debug!(painted = painter.step, "pathfinding replay cancelled");
            observer.on_narration(STOPPED);
        }
    }
    outcome
}

/// Search `grid` with `algorithm`, then replay the result onto it.
#[tracing::instrument(skip_all, fields(algorithm = %algorithm))]
pub async fn run_pathfinding(
    grid: &mut Grid,
    algorithm: PathAlgorithm,
    pacer: &Pacer,
    observer: &mut dyn PathObserver,
) -> PathReport {
    let started = Instant::now();
    observer.on_running_change(true);
    observer.on_progress(0);
    observer.on_narration(algorithm.running_message());
    let result = visualize(grid, algorithm);
    let outcome = animate(grid, &result, pacer, observer).await;
    observer.on_running_change(false);
    PathReport {
        algorithm,
        outcome,
        result,
        elapsed: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::CancellationToken;

    #[derive(Debug, Default)]
    struct Recording {
        cells: Vec<GridNode>,
        progress: Vec<u8>,
        narrations: Vec<String>,
        running: Vec<bool>,
    }

    impl PathObserver for Recording {
        fn on_cell(&mut self, node: &GridNode) {
            self.cells.push(node.clone());
        }
        fn on_progress(&mut self, percent: u8) {
            self.progress.push(percent);
        }
        fn on_narration(&mut self, text: &str) {
            self.narrations.push(text.to_string());
        }
        fn on_running_change(&mut self, running: bool) {
            self.running.push(running);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn paints_visited_then_path() {
        let mut grid = Grid::new(3, 4, (1, 0), (1, 3)).unwrap();
        let mut recording = Recording::default();
        let pacer = Pacer::from_millis(50, CancellationToken::new());
        let report = run_pathfinding(&mut grid, PathAlgorithm::Bfs, &pacer, &mut recording).await;

        assert_eq!(report.outcome, RunOutcome::Completed);
        let painted = report.result.visited.len() + report.result.path.len();
        assert_eq!(recording.cells.len(), painted);
        assert_eq!(recording.narrations[0], "Running Breadth-First Search...");
        assert_eq!(recording.narrations[1], "Exploring node at (1, 0)...");
        assert_eq!(
            recording.narrations.last().unwrap(),
            &format!("Path found! Length: 4 nodes, Explored: {} nodes", report.result.visited.len())
        );
        assert!(recording.progress.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(recording.progress.last(), Some(&100));
        assert_eq!(recording.running, vec![true, false]);
        for &cell in &report.result.path {
            assert!(grid.node(cell).is_path);
        }
        for &cell in &report.result.visited {
            assert!(grid.node(cell).is_visited);
        }
        // Half delay per visited cell, full delay per path cell.
        let expected = Duration::from_millis(25) * report.result.visited.len() as u32
            + Duration::from_millis(50) * 4;
        assert!(report.elapsed >= expected);
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_finish_is_narrated() {
        let mut grid = Grid::parse(&["S#.", "##.", "..F"]).unwrap();
        let mut recording = Recording::default();
        let pacer = Pacer::from_millis(0, CancellationToken::new());
        let report = run_pathfinding(&mut grid, PathAlgorithm::AStar, &pacer, &mut recording).await;
        assert_eq!(report.outcome, RunOutcome::Completed);
        assert!(report.result.path.is_empty());
        assert_eq!(recording.narrations.last().map(String::as_str), Some(UNREACHABLE));
    }

    #[tokio::test(start_paused = true)]
    async fn stopping_keeps_what_was_painted() {
        let mut grid = Grid::default();
        let token = CancellationToken::new();
        let pacer = Pacer::from_millis(50, token.clone());
        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(260)).await;
            token.cancel();
        });
        let mut recording = Recording::default();
        let report = run_pathfinding(&mut grid, PathAlgorithm::Dijkstra, &pacer, &mut recording).await;
        stopper.await.unwrap();

        assert_eq!(report.outcome, RunOutcome::Cancelled);
        assert_eq!(recording.narrations.last().map(String::as_str), Some(STOPPED));
        let painted = grid.nodes().iter().filter(|node| node.is_visited).count();
        assert_eq!(painted, recording.cells.len());
        assert!(painted < report.result.visited.len());
        assert!(grid.nodes().iter().all(|node| !node.is_path));
    }
}
