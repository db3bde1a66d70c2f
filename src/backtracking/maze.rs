// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Maze solving by depth-first backtracking over a 0/1 grid.
//!
//! The current `path` is popped on backtrack; the `visited` list only
//! grows, so a dead end is never entered twice.

use super::statistics::Counters;
use super::trace::{Board, Cell, MazeState, Recorder, StepState, Trace};
use super::tree::NodeId;
use super::BacktrackingAlgorithm;
use crate::error::{ConfigError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const WALL: u8 = 1;
pub const OPEN: u8 = 0;

pub const MIN_GENERATED_SIZE: usize = 5;
pub const MAX_GENERATED_SIZE: usize = 20;
pub const MIN_WALL_DENSITY: usize = 10;
pub const MAX_WALL_DENSITY: usize = 50;

/// Up, right, down, left.
const MOVES: [(isize, isize, &str); 4] = [(-1, 0, "up"), (0, 1, "right"), (1, 0, "down"), (0, -1, "left")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Row-major grid, 0 open and 1 wall.
    pub maze: Vec<Vec<u8>>,
    pub start: Cell,
    pub end: Cell,
}

impl Default for MazeConfig {
    fn default() -> Self {
        MazeConfig {
            maze: vec![
                vec![0, 0, 1, 0, 0, 0, 1, 0],
                vec![0, 0, 0, 0, 1, 0, 1, 0],
                vec![1, 1, 1, 0, 1, 0, 1, 0],
                vec![0, 0, 0, 0, 1, 0, 0, 0],
                vec![0, 1, 1, 1, 1, 1, 1, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
                vec![1, 1, 1, 1, 1, 1, 0, 1],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
            ],
            start: (0, 0),
            end: (7, 7),
        }
    }
}

impl MazeConfig {
    pub fn validate(&self) -> Result<()> {
        self.to_board().map(|_| ())
    }

    pub fn to_board(&self) -> Result<Board> {
        let board = Board::from_rows(&self.maze).ok_or(ConfigError::MazeShape)?;
        for (which, (row, col)) in [("start", self.start), ("end", self.end)] {
            if !board.contains(row, col) {
                return Err(ConfigError::out_of_bounds(row, col, board.rows(), board.cols()));
            }
            if board.get(row, col) == WALL {
                return Err(ConfigError::MazeBlocked { which, row, col });
            }
        }
        Ok(board)
    }
}

/// Random square maze with the given wall density (percent).
///
/// Endpoints outside the grid fall back to the top-left and bottom-right
/// corners; both endpoints are always left open.
pub fn generate_maze<R: Rng + ?Sized>(
    size: usize,
    wall_density: usize,
    start: Cell,
    end: Cell,
    rng: &mut R,
) -> Result<MazeConfig> {
    if !(MIN_GENERATED_SIZE..=MAX_GENERATED_SIZE).contains(&size) {
        return Err(ConfigError::OutOfRange {
            what: "maze size",
            value: size,
            min: MIN_GENERATED_SIZE,
            max: MAX_GENERATED_SIZE,
        });
    }
    if !(MIN_WALL_DENSITY..=MAX_WALL_DENSITY).contains(&wall_density) {
        return Err(ConfigError::OutOfRange {
            what: "wall density",
            value: wall_density,
            min: MIN_WALL_DENSITY,
            max: MAX_WALL_DENSITY,
        });
    }
    let probability = wall_density as f64 / 100.0;
    let mut maze: Vec<Vec<u8>> = (0..size)
        .map(|_| {
            (0..size)
                .map(|_| if rng.gen_bool(probability) { WALL } else { OPEN })
                .collect()
        })
        .collect();

    let clamp = |value: usize, fallback: usize| if value < size { value } else { fallback };
    let start = (clamp(start.0, 0), clamp(start.1, 0));
    let end = (clamp(end.0, size - 1), clamp(end.1, size - 1));
    maze[start.0][start.1] = OPEN;
    maze[end.0][end.1] = OPEN;
    Ok(MazeConfig { maze, start, end })
}

/// Random square maze running from the top-left to the bottom-right corner.
pub fn generate_corner_maze<R: Rng + ?Sized>(
    size: usize,
    wall_density: usize,
    rng: &mut R,
) -> Result<MazeConfig> {
    let far = size.saturating_sub(1);
    generate_maze(size, wall_density, (0, 0), (far, far), rng)
}

struct MazeSolver {
    maze: Board,
    end: Cell,
    path: Vec<Cell>,
    visited: Vec<Cell>,
    seen: Vec<bool>,
    recorder: Recorder,
}

pub(super) fn generate(config: &MazeConfig) -> Result<Trace> {
    let maze = config.to_board()?;
    let start = config.start;
    let mut seen = vec![false; maze.rows() * maze.cols()];
    seen[start.0 * maze.cols() + start.1] = true;
    let mut solver = MazeSolver {
        maze,
        end: config.end,
        path: vec![start],
        visited: vec![start],
        seen,
        recorder: Recorder::new("Maze"),
    };
    solver.emit(NodeId::ROOT, "Starting maze solver".to_string(), start);

    let solved = solver.solve(start, NodeId::ROOT);
    if !solved {
        solver.emit(
            NodeId::ROOT,
            "No path found! The exit is unreachable.".to_string(),
            start,
        );
    }
    tracing::debug!(solved, visited = solver.visited.len(), "maze search finished");
    Ok(solver.recorder.finish(BacktrackingAlgorithm::Maze))
}

impl MazeSolver {
    fn emit(&mut self, node: NodeId, description: String, current: Cell) {
        let state = MazeState {
            maze: self.maze.clone(),
            current,
            path: self.path.clone(),
            visited: self.visited.clone(),
        };
        self.recorder.emit(node, description, StepState::Maze(state));
    }

    fn step(&self, (row, col): Cell, dr: isize, dc: isize) -> Option<Cell> {
        let next_row = row.checked_add_signed(dr)?;
        let next_col = col.checked_add_signed(dc)?;
        if !self.maze.contains(next_row, next_col) || self.maze.get(next_row, next_col) == WALL {
            return None;
        }
        if self.seen[next_row * self.maze.cols() + next_col] {
            return None;
        }
        Some((next_row, next_col))
    }

    fn solve(&mut self, here: Cell, parent: NodeId) -> bool {
        if here == self.end {
            self.recorder.count(Counters::Solutions);
            self.emit(
                parent,
                "Found the exit! Maze solved successfully!".to_string(),
                here,
            );
            return true;
        }

        let (row, col) = here;
        let node = self.recorder.enter(parent, format!("Cell ({row},{col})"));

        for (dr, dc, direction) in MOVES {
            self.recorder.count(Counters::CandidateChecks);
            let Some(next) = self.step(here, dr, dc) else {
                continue;
            };
            let (next_row, next_col) = next;
            self.emit(
                node,
                format!("Trying to move {direction} from ({row}, {col}) to ({next_row}, {next_col})"),
                next,
            );

            self.seen[next_row * self.maze.cols() + next_col] = true;
            self.visited.push(next);
            self.path.push(next);
            self.recorder.count(Counters::Placements);
            self.emit(node, format!("Moving {direction} to ({next_row}, {next_col})"), next);

            if self.solve(next, node) {
                return true;
            }

            self.path.pop();
            self.recorder.count(Counters::Backtracks);
            self.emit(
                node,
                format!("Backtracking: Moving back from ({next_row}, {next_col}) to ({row}, {col})"),
                here,
            );
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn maze_state(trace: &Trace) -> &MazeState {
        match trace.last_state() {
            Some(StepState::Maze(state)) => state,
            other => panic!("unexpected state {other:?}"),
        }
    }

    fn adjacent(a: Cell, b: Cell) -> bool {
        a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
    }

    #[test]
    fn solves_the_default_maze_with_a_connected_path() {
        let config = MazeConfig::default();
        let trace = generate(&config).unwrap();
        let last = trace.steps.last().unwrap();
        assert_eq!(last.description, "Found the exit! Maze solved successfully!");

        let state = maze_state(&trace);
        assert_eq!(state.path.first(), Some(&(0, 0)));
        assert_eq!(state.path.last(), Some(&(7, 7)));
        assert!(state.path.windows(2).all(|pair| adjacent(pair[0], pair[1])));
        assert!(state.path.iter().all(|&(r, c)| config.maze[r][c] == OPEN));
        assert!(state.path.iter().all(|cell| state.visited.contains(cell)));
    }

    #[test]
    fn walled_off_exit_is_unreachable() {
        let config = MazeConfig {
            maze: vec![vec![0, 1, 0], vec![1, 1, 0], vec![0, 0, 0]],
            start: (0, 0),
            end: (2, 2),
        };
        let trace = generate(&config).unwrap();
        assert_eq!(trace.solution_count(), 0);
        assert_eq!(
            trace.steps.last().unwrap().description,
            "No path found! The exit is unreachable."
        );
        assert_eq!(maze_state(&trace).path, vec![(0, 0)]);
    }

    #[test]
    fn visited_never_shrinks() {
        let trace = generate(&MazeConfig::default()).unwrap();
        let lengths: Vec<usize> = trace
            .steps
            .iter()
            .map(|step| match &step.state {
                StepState::Maze(state) => state.visited.len(),
                _ => 0,
            })
            .collect();
        assert!(lengths.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn endpoints_must_be_open_and_in_bounds() {
        let mut config = MazeConfig::default();
        config.end = (8, 0);
        assert!(matches!(config.validate(), Err(ConfigError::OutOfBounds { .. })));

        let mut config = MazeConfig::default();
        config.start = (0, 2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MazeBlocked { which: "start", .. })
        ));

        let ragged = MazeConfig {
            maze: vec![vec![0, 0], vec![0]],
            start: (0, 0),
            end: (0, 1),
        };
        assert_eq!(ragged.validate(), Err(ConfigError::MazeShape));
    }

    #[test]
    fn generated_mazes_keep_endpoints_open() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = generate_maze(10, 50, (0, 0), (30, 30), &mut rng).unwrap();
        assert_eq!(config.end, (9, 9));
        assert!(config.validate().is_ok());
        assert!(generate_maze(4, 30, (0, 0), (3, 3), &mut rng).is_err());
        assert!(generate_maze(8, 60, (0, 0), (7, 7), &mut rng).is_err());
    }

    #[test]
    fn corner_maze_rejects_sizes_before_placing_the_exit() {
        let mut rng = StdRng::seed_from_u64(5);
        for size in [0, 1, 4, 21] {
            assert!(matches!(
                generate_corner_maze(size, 30, &mut rng),
                Err(ConfigError::OutOfRange { what: "maze size", .. })
            ));
        }
        let config = generate_corner_maze(6, 30, &mut rng).unwrap();
        assert_eq!((config.start, config.end), ((0, 0), (5, 5)));
        assert!(config.validate().is_ok());
    }
}
