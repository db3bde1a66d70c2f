// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Subset Sum by include/exclude recursion over the numbers in order.
//!
//! Branches are pruned once the running sum passes the target or the
//! subset reaches `max_subset_size`. A branch that hits the target is
//! recorded and not extended: with non-negative numbers any extension
//! either overshoots or repeats the same subset.

use super::statistics::Counters;
use super::trace::{Recorder, StepState, SubsetState, Trace};
use super::tree::NodeId;
use super::BacktrackingAlgorithm;
use crate::error::{ConfigError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsetSumConfig {
    pub numbers: Vec<u64>,
    pub target: u64,
    pub max_subset_size: Option<usize>,
    pub find_all_solutions: bool,
}

impl Default for SubsetSumConfig {
    fn default() -> Self {
        SubsetSumConfig {
            numbers: vec![2, 4, 6, 8, 10, 12, 14],
            target: 30,
            max_subset_size: None,
            find_all_solutions: false,
        }
    }
}

impl SubsetSumConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_subset_size == Some(0) {
            return Err(ConfigError::ZeroSubsetCap);
        }
        Ok(())
    }
}

/// Random instance: 5 to 10 numbers in 1..=50, target between 30% and 70%
/// of their sum.
pub fn random_instance<R: Rng + ?Sized>(rng: &mut R) -> (Vec<u64>, u64) {
    let count = rng.gen_range(5..=10);
    let numbers: Vec<u64> = (0..count).map(|_| rng.gen_range(1..=50)).collect();
    let sum: u64 = numbers.iter().sum();
    let target = (sum as f64 * rng.gen_range(0.3..0.7)).floor() as u64;
    (numbers, target)
}

fn join(subset: &[u64]) -> String {
    subset
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

struct SubsetSum<'a> {
    config: &'a SubsetSumConfig,
    subset: Vec<u64>,
    solutions: Vec<Vec<u64>>,
    recorder: Recorder,
}

pub(super) fn generate(config: &SubsetSumConfig) -> Result<Trace> {
    config.validate()?;
    let mut solver = SubsetSum {
        config,
        subset: Vec::new(),
        solutions: Vec::new(),
        recorder: Recorder::new("Subset Sum"),
    };
    let target = config.target;
    solver.emit(
        NodeId::ROOT,
        format!("Starting Subset Sum problem with target {target}"),
        None,
        0,
    );

    solver.solve(0, 0, NodeId::ROOT);

    let end = Some(config.numbers.len());
    if solver.solutions.is_empty() {
        solver.emit(
            NodeId::ROOT,
            format!("No solutions found for target sum {target}"),
            end,
            0,
        );
    } else if config.find_all_solutions && solver.solutions.len() > 1 {
        solver.subset.clear();
        solver.emit(
            NodeId::ROOT,
            format!("Found {} solutions for target sum {target}", solver.solutions.len()),
            end,
            0,
        );
    }
    tracing::debug!(target, solutions = solver.solutions.len(), "subset sum search finished");
    Ok(solver.recorder.finish(BacktrackingAlgorithm::SubsetSum))
}

impl SubsetSum<'_> {
    fn emit(&mut self, node: NodeId, description: String, index: Option<usize>, sum: u64) {
        let state = SubsetState {
            current_index: index,
            current_sum: sum,
            current_subset: self.subset.clone(),
            solutions: self.solutions.clone(),
        };
        self.recorder.emit(node, description, StepState::Subset(state));
    }

    fn solve(&mut self, index: usize, sum: u64, parent: NodeId) -> bool {
        let target = self.config.target;
        let within_cap = self
            .config
            .max_subset_size
            .map_or(true, |cap| self.subset.len() <= cap);
        if sum == target && within_cap {
            self.solutions.push(self.subset.clone());
            self.recorder.count(Counters::Solutions);
            self.emit(
                parent,
                format!("Found a solution! Subset {} sums to {target}", join(&self.subset)),
                Some(index),
                sum,
            );
            return !self.config.find_all_solutions;
        }

        if index >= self.config.numbers.len() || sum > target {
            return false;
        }
        if matches!(self.config.max_subset_size, Some(cap) if self.subset.len() >= cap) {
            return false;
        }

        let number = self.config.numbers[index];
        let node = self.recorder.enter(parent, format!("Index {index}"));
        self.recorder.count(Counters::CandidateChecks);
        self.emit(
            node,
            format!("Considering number {number} at index {index}"),
            Some(index),
            sum,
        );

        self.subset.push(number);
        self.recorder.count(Counters::Placements);
        let included = sum + number;
        self.emit(
            node,
            format!("Including number {number}, current sum: {included}"),
            Some(index),
            included,
        );
        if self.solve(index + 1, included, node) {
            return true;
        }

        self.subset.pop();
        self.recorder.count(Counters::Backtracks);
        self.emit(
            node,
            format!("Excluding number {number}, current sum: {sum}"),
            Some(index),
            sum,
        );
        self.solve(index + 1, sum, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn solutions(trace: &Trace) -> Vec<Vec<u64>> {
        match trace.last_state() {
            Some(StepState::Subset(state)) => state.solutions.clone(),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn first_solution_includes_greedily() {
        let trace = generate(&SubsetSumConfig::default()).unwrap();
        assert_eq!(
            trace.steps.last().unwrap().description,
            "Found a solution! Subset 2, 4, 6, 8, 10 sums to 30"
        );
        assert_eq!(trace.solution_count(), 1);
    }

    #[test]
    fn find_all_counts_each_subset_once() {
        let config = SubsetSumConfig {
            find_all_solutions: true,
            ..SubsetSumConfig::default()
        };
        let trace = generate(&config).unwrap();
        let found = solutions(&trace);
        assert_eq!(found.len(), 8);
        assert!(found.iter().all(|subset| subset.iter().sum::<u64>() == 30));
        assert_eq!(
            trace.steps.last().unwrap().description,
            "Found 8 solutions for target sum 30"
        );
    }

    #[test]
    fn cap_of_two_finds_nothing() {
        let config = SubsetSumConfig {
            max_subset_size: Some(2),
            find_all_solutions: true,
            ..SubsetSumConfig::default()
        };
        let trace = generate(&config).unwrap();
        assert_eq!(trace.solution_count(), 0);
        assert_eq!(
            trace.steps.last().unwrap().description,
            "No solutions found for target sum 30"
        );
    }

    #[test]
    fn cap_of_three_keeps_small_subsets() {
        let config = SubsetSumConfig {
            max_subset_size: Some(3),
            find_all_solutions: true,
            ..SubsetSumConfig::default()
        };
        let trace = generate(&config).unwrap();
        let mut found = solutions(&trace);
        found.sort();
        assert_eq!(found, vec![vec![4, 12, 14], vec![6, 10, 14], vec![8, 10, 12]]);
    }

    #[test]
    fn zero_cap_is_rejected() {
        let config = SubsetSumConfig {
            max_subset_size: Some(0),
            ..SubsetSumConfig::default()
        };
        assert_eq!(generate(&config).unwrap_err(), ConfigError::ZeroSubsetCap);
    }

    #[test]
    fn random_instances_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let (numbers, target) = random_instance(&mut rng);
            assert!((5..=10).contains(&numbers.len()));
            assert!(numbers.iter().all(|n| (1..=50).contains(n)));
            let sum: u64 = numbers.iter().sum();
            assert!(target <= sum);
        }
    }
}
