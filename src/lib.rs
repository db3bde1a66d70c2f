// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Stepwise execution engines for classic algorithms.
//!
//! Each engine turns an imperative algorithm into a sequence of observable
//! states that can be paced, stopped and replayed.
//!
//! # Architecture
//!
//! Two execution models share the crate:
//!
//! ## Streaming
//!
//! Sorting, pathfinding and graph runs are `async` and drive their own
//! clock. After each visible mutation they publish to an observer and pause
//! through a [`control::Pacer`], which checks a shared
//! [`control::CancellationToken`] before and after sleeping. A stop request
//! leaves the working state exactly as last published.
//!
//! ## Pre-materialized
//!
//! Backtracking runs to completion synchronously, recording a flat list of
//! snapshot steps and a recursion tree. Every step names the tree node
//! active when it was emitted. A [`backtracking::Playback`] replays the
//! steps on a fixed interval.
//!
//! # Modules
//!
//! - [`sorting`]: nine sorts, input generators and race mode
//! - [`pathfinding`]: BFS, DFS, Dijkstra and A* on a wall grid
//! - [`graph`]: traversals, topological sort, two spanning trees and SCC
//! - [`backtracking`]: N-Queens, Sudoku, maze, knight's tour and subset sum
//!
//! Malformed configuration is rejected up front with
//! [`error::ConfigError`]. Anything an algorithm can legitimately end in
//! (no path, no solution, a cycle) is an ordinary outcome.

pub mod backtracking;
pub mod control;
pub mod error;
pub mod graph;
pub mod pathfinding;
pub mod sorting;

pub use control::{CancellationToken, Pacer, RunOutcome};
pub use error::{ConfigError, Result};
