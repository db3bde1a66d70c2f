// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Knight's Tour from the top-left square.
//!
//! Squares are numbered 1..=N² in visiting order. A closed tour must also
//! end a knight's move away from (0, 0); that is only checked on the final
//! square, and a final square that fails it is cleared and the search
//! backtracks as if the move had failed.

use super::statistics::Counters;
use super::trace::{Board, BoardState, Cell, Recorder, StepState, Trace};
use super::tree::NodeId;
use super::BacktrackingAlgorithm;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub const MIN_SIZE: usize = 3;
pub const MAX_SIZE: usize = 8;

const MOVES: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const START: Cell = (0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TourType {
    #[default]
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnightsTourConfig {
    pub size: usize,
    pub tour_type: TourType,
}

impl Default for KnightsTourConfig {
    fn default() -> Self {
        KnightsTourConfig {
            size: 5,
            tour_type: TourType::Open,
        }
    }
}

impl KnightsTourConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::board_size(
                "Knight's Tour",
                self.size,
                MIN_SIZE,
                MAX_SIZE,
            ));
        }
        Ok(())
    }
}

/// `a` and `b` are one knight's move apart.
pub fn is_knight_move(a: Cell, b: Cell) -> bool {
    let dr = a.0.abs_diff(b.0);
    let dc = a.1.abs_diff(b.1);
    (dr == 2 && dc == 1) || (dr == 1 && dc == 2)
}

/// The last square of a tour is acceptable for this tour type.
pub fn completes_tour(tour_type: TourType, last: Cell) -> bool {
    match tour_type {
        TourType::Open => true,
        TourType::Closed => is_knight_move(last, START),
    }
}

struct KnightsTour {
    size: usize,
    tour_type: TourType,
    board: Board,
    recorder: Recorder,
}

pub(super) fn generate(config: &KnightsTourConfig) -> Result<Trace> {
    config.validate()?;
    let size = config.size;
    let mut solver = KnightsTour {
        size,
        tour_type: config.tour_type,
        board: Board::square(size),
        recorder: Recorder::new("Knight's Tour"),
    };
    let start = BoardState::new(&solver.board, None, None);
    solver.recorder.emit(
        NodeId::ROOT,
        format!("Starting Knight's Tour problem with board size {size}x{size}"),
        StepState::Board(start),
    );

    let found = solver.solve(START, 1, NodeId::ROOT);
    if !found {
        let state = BoardState::new(&solver.board, None, None);
        solver.recorder.emit(
            NodeId::ROOT,
            format!(
                "No {} knight's tour exists on a {size}x{size} board from (0, 0)",
                config.tour_type
            ),
            StepState::Board(state),
        );
    }
    tracing::debug!(size, tour = %config.tour_type, found, "knight's tour search finished");
    Ok(solver.recorder.finish(BacktrackingAlgorithm::KnightsTour))
}

impl KnightsTour {
    fn emit(&mut self, node: NodeId, description: String, at: Cell, move_number: usize) {
        let state = BoardState::new(&self.board, Some(at.0), Some(at.1)).with_value(move_number as u32);
        self.recorder.emit(node, description, StepState::Board(state));
    }

    fn moves_from(&self, (row, col): Cell) -> impl Iterator<Item = Cell> + '_ {
        MOVES.iter().filter_map(move |&(dr, dc)| {
            let next = (row.checked_add_signed(dr)?, col.checked_add_signed(dc)?);
            (self.board.contains(next.0, next.1) && self.board.get(next.0, next.1) == 0).then_some(next)
        })
    }

    fn solve(&mut self, here: Cell, move_number: usize, parent: NodeId) -> bool {
        let (row, col) = here;
        self.board.set(row, col, move_number as u8);
        self.recorder.count(Counters::Placements);

        if move_number == self.size * self.size {
            if !completes_tour(self.tour_type, here) {
                self.board.set(row, col, 0);
                return false;
            }
            self.recorder.count(Counters::Solutions);
            self.emit(
                parent,
                format!("Knight's Tour completed successfully! ({} tour)", self.tour_type),
                here,
                move_number,
            );
            return true;
        }

        let node = self.recorder.enter(parent, format!("Move {move_number}"));
        self.emit(
            node,
            format!("Knight at position ({row}, {col}), move number {move_number}"),
            here,
            move_number,
        );

        let candidates: Vec<Cell> = self.moves_from(here).collect();
        for next in candidates {
            // An earlier sibling's subtree restores every square it used.
            debug_assert_eq!(self.board.get(next.0, next.1), 0);
            self.recorder.count(Counters::CandidateChecks);
            let (next_row, next_col) = next;
            self.emit(
                node,
                format!("Trying to move knight from ({row}, {col}) to ({next_row}, {next_col})"),
                next,
                move_number + 1,
            );

            if self.solve(next, move_number + 1, node) {
                return true;
            }

            self.board.set(next_row, next_col, 0);
            self.recorder.count(Counters::Backtracks);
            self.emit(
                node,
                format!("Backtracking: Removing knight from ({next_row}, {next_col})"),
                here,
                move_number,
            );
        }

        self.board.set(row, col, 0);
        false
    }
}
