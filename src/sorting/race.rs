// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Race mode: several algorithms sort copies of one array concurrently.
//!
//! Each entrant runs in its own tokio task and owns one slot of a shared
//! [`RaceBoard`]. Every published change bumps a `watch` revision counter,
//! which a renderer can wait on to redraw all lanes at once. There is no
//! ordering between lanes, only within each one.

use super::{run_sort, SortAlgorithm, SortObserver};
use crate::control::{CancellationToken, Pacer, RunOutcome};
use crate::error::{ConfigError, Result};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;

/// What one lane currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RaceTaskState {
    pub array: Vec<u32>,
    pub active_indices: Vec<usize>,
    pub comparisons: u64,
    pub swaps: u64,
    pub running: bool,
}

pub type RaceBoard = Arc<Mutex<HashMap<SortAlgorithm, RaceTaskState>>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceResult {
    pub algorithm: SortAlgorithm,
    pub name: &'static str,
    pub elapsed: Duration,
    pub comparisons: u64,
    pub swaps: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RaceOutcome {
    /// Every lane finished; fastest first.
    Ranked(Vec<RaceResult>),
    /// Stopped before the end. No ranking is produced.
    Cancelled,
}

/// Forwards one lane's changes into the shared board.
struct LaneObserver {
    algorithm: SortAlgorithm,
    board: RaceBoard,
    revision: Arc<watch::Sender<u64>>,
}

impl LaneObserver {
    fn update(&self, apply: impl FnOnce(&mut RaceTaskState)) {
        if let Some(lane) = self.board.lock().get_mut(&self.algorithm) {
            apply(lane);
        }
        self.revision.send_modify(|revision| *revision += 1);
    }
}

impl SortObserver for LaneObserver {
    fn on_array_change(&mut self, array: &[u32]) {
        self.update(|lane| {
            lane.array.clear();
            lane.array.extend_from_slice(array);
        });
    }

    fn on_active_indices(&mut self, indices: &[usize]) {
        self.update(|lane| {
            lane.active_indices.clear();
            lane.active_indices.extend_from_slice(indices);
        });
    }

    fn on_comparisons(&mut self, count: u64) {
        if let Some(lane) = self.board.lock().get_mut(&self.algorithm) {
            lane.comparisons = count;
        }
    }

    fn on_swaps(&mut self, count: u64) {
        if let Some(lane) = self.board.lock().get_mut(&self.algorithm) {
            lane.swaps = count;
        }
    }

    fn on_running_change(&mut self, running: bool) {
        self.update(|lane| lane.running = running);
    }
}

/// Race coordinator. Owns the original array and the lane board.
#[derive(Debug)]
pub struct Race {
    algorithms: Vec<SortAlgorithm>,
    original: Vec<u32>,
    board: RaceBoard,
    revision: Arc<watch::Sender<u64>>,
}

impl Race {
    pub fn new(algorithms: Vec<SortAlgorithm>, array: Vec<u32>) -> Result<Self> {
        if algorithms.is_empty() {
            return Err(ConfigError::EmptyRace);
        }
        if array.is_empty() {
            return Err(ConfigError::EmptyArray);
        }
        let mut seen = HashSet::new();
        for algorithm in &algorithms {
            if !seen.insert(*algorithm) {
                return Err(ConfigError::DuplicateRaceEntry(algorithm.to_string()));
            }
        }
        let (revision, _) = watch::channel(0);
        let race = Race {
            algorithms,
            original: array,
            board: Arc::new(Mutex::new(HashMap::new())),
            revision: Arc::new(revision),
        };
        race.reset();
        Ok(race)
    }

    pub fn algorithms(&self) -> &[SortAlgorithm] {
        &self.algorithms
    }

    pub fn original(&self) -> &[u32] {
        &self.original
    }

    /// Shared lane state, for rendering.
    pub fn board(&self) -> RaceBoard {
        Arc::clone(&self.board)
    }

    /// Snapshot of one lane.
    pub fn lane(&self, algorithm: SortAlgorithm) -> Option<RaceTaskState> {
        self.board.lock().get(&algorithm).cloned()
    }

    /// Revision counter bumped after every lane change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Put every lane back to the original array.
    pub fn reset(&self) {
        let mut board = self.board.lock();
        board.clear();
        for &algorithm in &self.algorithms {
            board.insert(
                algorithm,
                RaceTaskState {
                    array: self.original.clone(),
                    ..RaceTaskState::default()
                },
            );
        }
        drop(board);
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Replace the array every lane starts from.
    pub fn set_array(&mut self, array: Vec<u32>) -> Result<()> {
        if array.is_empty() {
            return Err(ConfigError::EmptyArray);
        }
        self.original = array;
        self.reset();
        Ok(())
    }

    /// Run every lane to completion or cancellation.
    ///
    /// Lanes start from the original array. The ranking orders by elapsed
    /// time; lanes that tie keep their entry order.
    #[tracing::instrument(skip_all, fields(lanes = self.algorithms.len(), speed_ms = speed_ms))]
    pub async fn run(&self, speed_ms: u64, token: &CancellationToken) -> RaceOutcome {
        self.reset();
        let pacer = Pacer::from_millis(speed_ms, token.clone());
        let mut lanes = JoinSet::new();
        for (entry, &algorithm) in self.algorithms.iter().enumerate() {
            let input = self.original.clone();
            let pacer = pacer.clone();
            let mut observer = LaneObserver {
                algorithm,
                board: Arc::clone(&self.board),
                revision: Arc::clone(&self.revision),
            };
            lanes.spawn(async move {
                let report = run_sort(algorithm, &input, &pacer, &mut observer).await;
                (entry, report)
            });
        }

        let mut finished = Vec::with_capacity(self.algorithms.len());
        while let Some(joined) = lanes.join_next().await {
            match joined {
                Ok((entry, Ok(report))) => finished.push((entry, report)),
                Ok((_, Err(err))) => tracing::warn!(%err, "race lane rejected its input"),
                Err(err) => tracing::error!(%err, "race lane did not finish"),
            }
        }

        let cancelled = token.is_cancelled()
            || finished
                .iter()
                .any(|(_, report)| report.outcome == RunOutcome::Cancelled);
        if cancelled {
            tracing::debug!("race cancelled");
            return RaceOutcome::Cancelled;
        }

        finished.sort_by_key(|(entry, report)| (report.elapsed, *entry));
        RaceOutcome::Ranked(
            finished
                .into_iter()
                .map(|(_, report)| RaceResult {
                    algorithm: report.algorithm,
                    name: report.algorithm.info().name,
                    elapsed: report.elapsed,
                    comparisons: report.comparisons,
                    swaps: report.swaps,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: &[u32]) -> Vec<u32> {
        let mut values = values.to_vec();
        values.sort_unstable();
        values
    }

    #[test]
    fn entries_are_validated() {
        assert_eq!(
            Race::new(vec![], vec![1]).unwrap_err(),
            ConfigError::EmptyRace
        );
        assert_eq!(
            Race::new(vec![SortAlgorithm::QuickSort], vec![]).unwrap_err(),
            ConfigError::EmptyArray
        );
        assert!(matches!(
            Race::new(vec![SortAlgorithm::QuickSort, SortAlgorithm::QuickSort], vec![1]),
            Err(ConfigError::DuplicateRaceEntry(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn lanes_finish_sorted_and_ranked_by_time() {
        let input = vec![9, 4, 7, 1, 8, 2, 6, 3, 5];
        let race = Race::new(
            vec![SortAlgorithm::BubbleSort, SortAlgorithm::MergeSort, SortAlgorithm::QuickSort],
            input.clone(),
        )
        .unwrap();
        let outcome = race.run(5, &CancellationToken::new()).await;

        let RaceOutcome::Ranked(results) = outcome else {
            panic!("race was not ranked");
        };
        assert_eq!(results.len(), 3);
        assert!(results.windows(2).all(|pair| pair[0].elapsed <= pair[1].elapsed));
        for algorithm in race.algorithms() {
            let lane = race.lane(*algorithm).unwrap();
            assert_eq!(lane.array, sorted(&input));
            assert!(!lane.running);
            assert!(lane.active_indices.is_empty());
        }
        // Each lane sorted its own copy.
        assert_eq!(race.original(), input.as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_race_has_no_ranking() {
        let input: Vec<u32> = (1..=30).rev().collect();
        let race = Race::new(vec![SortAlgorithm::BubbleSort, SortAlgorithm::SelectionSort], input.clone())
            .unwrap();
        let token = CancellationToken::new();
        let stopper = {
            let token = token.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                token.cancel();
            })
        };
        let outcome = race.run(10, &token).await;
        stopper.await.unwrap();
        assert_eq!(outcome, RaceOutcome::Cancelled);
        for algorithm in race.algorithms() {
            let lane = race.lane(*algorithm).unwrap();
            assert_eq!(sorted(&lane.array), sorted(&input));
            assert!(!lane.running);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn every_change_bumps_the_revision() {
        let race = Race::new(vec![SortAlgorithm::InsertionSort], vec![2, 1]).unwrap();
        let receiver = race.subscribe();
        let before = *receiver.borrow();
        race.run(0, &CancellationToken::new()).await;
        assert!(*receiver.borrow() > before);
    }
}
