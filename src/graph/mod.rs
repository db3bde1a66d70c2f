// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Graph algorithm engine.
//!
//! [`visualize_algorithm`] runs one of six algorithms over a [`Graph`] and
//! returns ordered id lists; [`animate`] replays them in four phases.
//! [`GraphEditor`] owns a graph between runs and keeps its ids stable.
//!
//! # Example
//!
//! ```
//! use algo_stepper::graph::{visualize_algorithm, GraphAlgorithm, GraphEditor};
//!
//! let mut editor = GraphEditor::new(false);
//! let a = editor.add_node(0.0, 0.0);
//! let b = editor.add_node(10.0, 0.0);
//! let c = editor.add_node(0.0, 10.0);
//! editor.add_edge(&a, &b, 2).unwrap();
//! editor.add_edge(&b, &c, 1).unwrap();
//! editor.add_edge(&a, &c, 5).unwrap();
//!
//! let mst = visualize_algorithm(editor.graph(), None, GraphAlgorithm::Kruskal, false).unwrap();
//! assert_eq!(editor.graph().total_weight(&mst.result_edges), 3);
//! ```

pub mod algorithms;
pub mod model;
pub mod replay;

pub use algorithms::{visualize_algorithm, GraphOutput, UnionFind};
pub use model::{Edge, Graph, GraphEditor, Node};
pub use replay::{animate, run_graph, GraphObserver, GraphReport, GraphView, NullGraphObserver, Phase};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    AsRefStr,
    EnumCount,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GraphAlgorithm {
    #[default]
    Bfs,
    Dfs,
    Topological,
    Kruskal,
    Prim,
    Scc,
}

impl GraphAlgorithm {
    pub fn display_name(self) -> &'static str {
        match self {
            GraphAlgorithm::Bfs => "Breadth-First Search",
            GraphAlgorithm::Dfs => "Depth-First Search",
            GraphAlgorithm::Topological => "Topological Sort",
            GraphAlgorithm::Kruskal => "Kruskal's MST",
            GraphAlgorithm::Prim => "Prim's MST",
            GraphAlgorithm::Scc => "Strongly Connected Components",
        }
    }

    fn running_message(self) -> &'static str {
        match self {
            GraphAlgorithm::Bfs => "Running Breadth-First Search...",
            GraphAlgorithm::Dfs => "Running Depth-First Search...",
            GraphAlgorithm::Topological => "Running Topological Sort...",
            GraphAlgorithm::Kruskal => "Running Kruskal's MST Algorithm...",
            GraphAlgorithm::Prim => "Running Prim's MST Algorithm...",
            GraphAlgorithm::Scc => "Finding Strongly Connected Components...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSettings {
    pub speed_ms: u64,
    pub directed: bool,
    pub weighted: bool,
    pub algorithm: GraphAlgorithm,
}

impl Default for GraphSettings {
    fn default() -> Self {
        GraphSettings {
            speed_ms: 100,
            directed: true,
            weighted: false,
            algorithm: GraphAlgorithm::Bfs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn six_algorithms_with_short_names() {
        assert_eq!(GraphAlgorithm::COUNT, 6);
        for algorithm in GraphAlgorithm::iter() {
            assert_eq!(GraphAlgorithm::from_str(algorithm.as_ref()).unwrap(), algorithm);
        }
        assert_eq!(GraphAlgorithm::Scc.to_string(), "scc");
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = GraphSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"algorithm\":\"bfs\""));
        assert_eq!(serde_json::from_str::<GraphSettings>(&json).unwrap(), settings);
    }
}
