// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Step trace produced by a backtracking generation.
//!
//! A [`Recorder`] is threaded through a solver's recursion. It owns the
//! growing step list, the recursion tree and the run statistics. Every step
//! stores its own snapshot: solvers mutate one board in place, so a step
//! that borrowed it would show whatever the board became later.

use super::statistics::{Counters, Statistics};
use super::tree::{NodeId, RecursionTree, RecursionTreeNode};
use super::BacktrackingAlgorithm;
use serde::{Serialize, Serializer};

/// A `(row, col)` position on a board or maze.
pub type Cell = (usize, usize);

/// Dense row-major board of small integers.
///
/// Holds queens (0/1), sudoku digits, knight move numbers or maze walls
/// (0 open, 1 wall) depending on the problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    pub fn square(size: usize) -> Self {
        Board::new(size, size)
    }

    /// Build from nested rows. `None` when empty or ragged.
    pub fn from_rows(rows: &[Vec<u8>]) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Board {
            rows: rows.len(),
            cols,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.cells[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Positions holding a non-zero value, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0)
            .map(move |(index, _)| (index / self.cols, index % self.cols))
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows).map(|row| self.row(row).to_vec()).collect()
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

/// Board snapshot for N-Queens, Sudoku and the Knight's Tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardState {
    pub board: Board,
    pub current_row: Option<usize>,
    pub current_col: Option<usize>,
    /// Sudoku candidate digit or knight move number.
    pub value: Option<u32>,
    /// Outcome of the constraint check, on "checking" steps only.
    pub is_valid: Option<bool>,
}

impl BoardState {
    pub fn new(board: &Board, current_row: Option<usize>, current_col: Option<usize>) -> Self {
        BoardState {
            board: board.clone(),
            current_row,
            current_col,
            value: None,
            is_valid: None,
        }
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_validity(mut self, is_valid: bool) -> Self {
        self.is_valid = Some(is_valid);
        self
    }
}

/// Maze snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MazeState {
    pub maze: Board,
    pub current: Cell,
    /// Current candidate path, popped on backtrack.
    pub path: Vec<Cell>,
    /// Every cell entered so far, never popped.
    pub visited: Vec<Cell>,
}

/// Subset Sum snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsetState {
    pub current_index: Option<usize>,
    pub current_sum: u64,
    pub current_subset: Vec<u64>,
    pub solutions: Vec<Vec<u64>>,
}

/// Problem-specific snapshot carried by each step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepState {
    Board(BoardState),
    Maze(MazeState),
    Subset(SubsetState),
}

impl StepState {
    pub fn board(&self) -> Option<&Board> {
        match self {
            StepState::Board(state) => Some(&state.board),
            StepState::Maze(state) => Some(&state.maze),
            StepState::Subset(_) => None,
        }
    }
}

/// One narrated beat of a backtracking run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BacktrackingStep {
    pub description: String,
    pub state: StepState,
    /// The recursion-tree node whose call produced this step.
    pub node_id: NodeId,
}

/// Accumulates steps, tree and statistics during one generation.
#[derive(Debug)]
pub struct Recorder {
    steps: Vec<BacktrackingStep>,
    tree: RecursionTree,
    statistics: Statistics,
}

impl Recorder {
    pub fn new(root_name: impl Into<String>) -> Self {
        Recorder {
            steps: Vec::new(),
            tree: RecursionTree::new(root_name),
            statistics: Statistics::new(),
        }
    }

    /// Open a tree node for a recursive call under `parent`.
    pub fn enter(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        self.statistics.increment_counter(Counters::RecursiveCalls);
        self.tree.add_child(parent, name)
    }

    pub fn emit(&mut self, node_id: NodeId, description: impl Into<String>, state: StepState) {
        self.steps.push(BacktrackingStep {
            description: description.into(),
            state,
            node_id,
        });
    }

    pub fn count(&mut self, counter: Counters) {
        self.statistics.increment_counter(counter);
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn finish(self, algorithm: BacktrackingAlgorithm) -> Trace {
        Trace {
            algorithm,
            steps: self.steps,
            tree: self.tree,
            statistics: self.statistics,
        }
    }
}

/// A complete, immutable backtracking trace.
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub algorithm: BacktrackingAlgorithm,
    pub steps: Vec<BacktrackingStep>,
    pub tree: RecursionTree,
    pub statistics: Statistics,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn solution_count(&self) -> u64 {
        self.statistics.get(Counters::Solutions)
    }

    pub fn nested_tree(&self) -> RecursionTreeNode {
        self.tree.to_nested()
    }

    pub fn last_state(&self) -> Option<&StepState> {
        self.steps.last().map(|step| &step.state)
    }

    /// Narration lines in order.
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.description.as_str())
    }
}
