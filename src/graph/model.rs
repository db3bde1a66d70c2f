// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Graph data and the editor that keeps ids stable.
//!
//! Edges name their endpoints by node id. Direction is an interpretation
//! applied by traversals: with `directed == false` every edge can be walked
//! both ways, but it is still stored once.

use crate::error::{ConfigError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f64::consts::PI;

pub const LAYOUT_CENTER: (f64, f64) = (250.0, 250.0);
pub const LAYOUT_RADIUS: f64 = 180.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub weight: u32,
}

impl Edge {
    /// The far end when leaving `from`, honouring direction.
    pub fn leads_from(&self, from: &str, directed: bool) -> Option<&str> {
        if self.source == from {
            Some(&self.target)
        } else if !directed && self.target == from {
            Some(&self.source)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    /// The node's label, or the id itself when the node is unknown.
    pub fn label<'g>(&'g self, id: &'g str) -> &'g str {
        self.node(id).map_or(id, |node| node.label.as_str())
    }

    pub fn first_node_id(&self) -> Option<&str> {
        self.nodes.first().map(|node| node.id.as_str())
    }

    /// Edges walkable from `from` with their far ends, in edge-list order.
    pub fn adjacent<'g>(
        &'g self,
        from: &'g str,
        directed: bool,
    ) -> impl Iterator<Item = (&'g Edge, &'g str)> + 'g {
        self.edges
            .iter()
            .filter_map(move |edge| edge.leads_from(from, directed).map(|to| (edge, to)))
    }

    pub fn total_weight<'g>(&self, edge_ids: impl IntoIterator<Item = &'g String>) -> u64 {
        edge_ids
            .into_iter()
            .filter_map(|id| self.edge(id))
            .map(|edge| u64::from(edge.weight))
            .sum()
    }

    /// Every edge endpoint names an existing node.
    pub fn validate(&self) -> Result<()> {
        let ids: HashSet<&str> = self.nodes.iter().map(|node| node.id.as_str()).collect();
        for edge in &self.edges {
            for end in [&edge.source, &edge.target] {
                if !ids.contains(end.as_str()) {
                    return Err(ConfigError::DanglingEdge {
                        edge: edge.id.clone(),
                        node: end.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Owns a graph and hands out `node-N` / `edge-N` ids that are never reused
/// until the graph is cleared.
#[derive(Debug, Clone)]
pub struct GraphEditor {
    graph: Graph,
    directed: bool,
    next_node: usize,
    next_edge: usize,
}

impl Default for GraphEditor {
    fn default() -> Self {
        GraphEditor::new(true)
    }
}

impl GraphEditor {
    pub fn new(directed: bool) -> Self {
        GraphEditor {
            graph: Graph::default(),
            directed,
            next_node: 1,
            next_edge: 1,
        }
    }

    /// Adopt an existing graph. Counters continue past the largest numeric
    /// suffix already in use.
    pub fn from_graph(graph: Graph, directed: bool) -> Result<Self> {
        graph.validate()?;
        let suffix = |id: &str, prefix: &str| {
            id.strip_prefix(prefix)
                .and_then(|n| n.parse::<usize>().ok())
                .unwrap_or(0)
        };
        let next_node = graph.nodes.iter().map(|n| suffix(&n.id, "node-")).max().unwrap_or(0) + 1;
        let next_edge = graph.edges.iter().map(|e| suffix(&e.id, "edge-")).max().unwrap_or(0) + 1;
        Ok(GraphEditor {
            graph,
            directed,
            next_node,
            next_edge,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    pub fn add_node(&mut self, x: f64, y: f64) -> String {
        let id = format!("node-{}", self.next_node);
        self.graph.nodes.push(Node {
            id: id.clone(),
            x,
            y,
            label: self.next_node.to_string(),
        });
        self.next_node += 1;
        id
    }

    /// Add an edge unless one already joins the pair.
    ///
    /// Returns the new id, or `None` for a duplicate. In undirected mode the
    /// reverse of an existing edge counts as a duplicate.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: u32) -> Result<Option<String>> {
        for end in [source, target] {
            if !self.graph.contains(end) {
                return Err(ConfigError::UnknownNode(end.to_string()));
            }
        }
        Ok(self.connect(source, target, weight))
    }

    /// Insert an edge between nodes known to exist, skipping duplicates.
    fn connect(&mut self, source: &str, target: &str, weight: u32) -> Option<String> {
        if self.are_connected(source, target) {
            return None;
        }
        let id = format!("edge-{}", self.next_edge);
        self.next_edge += 1;
        self.graph.edges.push(Edge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            weight,
        });
        Some(id)
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.graph.nodes.len();
        self.graph.nodes.retain(|node| node.id != id);
        self.graph
            .edges
            .retain(|edge| edge.source != id && edge.target != id);
        self.graph.nodes.len() != before
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        let before = self.graph.edges.len();
        self.graph.edges.retain(|edge| edge.id != id);
        self.graph.edges.len() != before
    }

    /// Empty the graph and restart both id counters.
    pub fn clear(&mut self) {
        self.graph = Graph::default();
        self.next_node = 1;
        self.next_edge = 1;
    }

    pub fn are_connected(&self, a: &str, b: &str) -> bool {
        self.graph.edges.iter().any(|edge| {
            (edge.source == a && edge.target == b)
                || (!self.directed && edge.source == b && edge.target == a)
        })
    }

    /// Replace the graph with a random one.
    ///
    /// Five to ten nodes sit on a circle. Each ordered pair gets an edge with
    /// probability 0.3 (directed) or 0.4 (undirected), and consecutive nodes
    /// are then chained so the graph is connected. Weights are 1..=9 when
    /// `weighted`, otherwise 1.
    pub fn randomize<R: Rng + ?Sized>(&mut self, weighted: bool, rng: &mut R) {
        self.clear();
        let count: usize = rng.gen_range(5..=10);
        for i in 0..count {
            let angle = i as f64 / count as f64 * 2.0 * PI;
            self.add_node(
                LAYOUT_CENTER.0 + LAYOUT_RADIUS * angle.cos(),
                LAYOUT_CENTER.1 + LAYOUT_RADIUS * angle.sin(),
            );
        }
        let ids: Vec<String> = self.graph.nodes.iter().map(|node| node.id.clone()).collect();
        let probability = if self.directed { 0.3 } else { 0.4 };
        let weight = |rng: &mut R| if weighted { rng.gen_range(1..=9) } else { 1 };

        for (i, source) in ids.iter().enumerate() {
            for (j, target) in ids.iter().enumerate() {
                if i == j || !rng.gen_bool(probability) {
                    continue;
                }
                let w = weight(&mut *rng);
                // Undirected: the (j, i) pass finds (i, j) already joined.
                self.connect(source, target, w);
            }
        }
        for pair in ids.windows(2) {
            if !self.are_connected(&pair[0], &pair[1]) {
                let w = weight(&mut *rng);
                self.connect(&pair[0], &pair[1], w);
            }
        }
        tracing::debug!(
            nodes = self.graph.nodes.len(),
            edges = self.graph.edges.len(),
            "random graph generated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn triangle(directed: bool) -> GraphEditor {
        let mut editor = GraphEditor::new(directed);
        for _ in 0..3 {
            editor.add_node(0.0, 0.0);
        }
        editor.add_edge("node-1", "node-2", 4).unwrap();
        editor.add_edge("node-2", "node-3", 1).unwrap();
        editor
    }

    #[test]
    fn ids_count_up_and_survive_removal() {
        let mut editor = triangle(true);
        assert!(editor.remove_node("node-2"));
        assert!(editor.graph().edges.is_empty(), "edges cascade with the node");
        assert_eq!(editor.add_node(1.0, 1.0), "node-4");
        assert_eq!(editor.graph().node("node-4").unwrap().label, "4");
        assert_eq!(
            editor.add_edge("node-1", "node-4", 1).unwrap().as_deref(),
            Some("edge-3")
        );
        editor.clear();
        assert_eq!(editor.add_node(0.0, 0.0), "node-1");
    }

    #[test]
    fn duplicates_depend_on_direction() {
        let mut directed = triangle(true);
        assert_eq!(directed.add_edge("node-1", "node-2", 9).unwrap(), None);
        assert!(directed.add_edge("node-2", "node-1", 9).unwrap().is_some());

        let mut undirected = triangle(false);
        assert_eq!(undirected.add_edge("node-2", "node-1", 9).unwrap(), None);
        assert!(undirected.are_connected("node-3", "node-2"));
    }

    #[test]
    fn unknown_endpoints_are_rejected() {
        let mut editor = triangle(true);
        assert_eq!(
            editor.add_edge("node-1", "node-9", 1),
            Err(ConfigError::UnknownNode("node-9".into()))
        );
    }

    #[test]
    fn dangling_edges_fail_validation() {
        let mut graph = triangle(true).into_graph();
        graph.nodes.remove(2);
        assert!(matches!(graph.validate(), Err(ConfigError::DanglingEdge { .. })));
        assert!(GraphEditor::from_graph(graph, true).is_err());
    }

    #[test]
    fn adopted_graph_continues_numbering() {
        let graph = triangle(true).into_graph();
        let mut editor = GraphEditor::from_graph(graph, true).unwrap();
        assert_eq!(editor.add_node(0.0, 0.0), "node-4");
        assert_eq!(editor.add_edge("node-4", "node-1", 1).unwrap().as_deref(), Some("edge-3"));
    }

    #[test]
    fn random_graphs_are_chained_and_well_formed() {
        let mut rng = StdRng::seed_from_u64(42);
        for directed in [true, false] {
            for weighted in [true, false] {
                let mut editor = GraphEditor::new(directed);
                editor.randomize(weighted, &mut rng);
                let graph = editor.graph();
                assert!((5..=10).contains(&graph.nodes.len()));
                graph.validate().unwrap();
                for pair in graph.nodes.windows(2) {
                    assert!(editor.are_connected(&pair[0].id, &pair[1].id));
                }
                for edge in &graph.edges {
                    assert_ne!(edge.source, edge.target);
                    if weighted {
                        assert!((1..=9).contains(&edge.weight));
                    } else {
                        assert_eq!(edge.weight, 1);
                    }
                }
                for node in &graph.nodes {
                    let (dx, dy) = (node.x - LAYOUT_CENTER.0, node.y - LAYOUT_CENTER.1);
                    assert!(((dx * dx + dy * dy).sqrt() - LAYOUT_RADIUS).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn undirected_random_graphs_join_each_pair_once() {
        for seed in 0..20 {
            let mut editor = GraphEditor::new(false);
            editor.randomize(false, &mut StdRng::seed_from_u64(seed));
            let graph = editor.graph();
            let mut pairs: Vec<(&str, &str)> = graph
                .edges
                .iter()
                .map(|edge| {
                    let (a, b) = (edge.source.as_str(), edge.target.as_str());
                    if a < b { (a, b) } else { (b, a) }
                })
                .collect();
            let total = pairs.len();
            pairs.sort_unstable();
            pairs.dedup();
            assert_eq!(pairs.len(), total, "seed {seed}");
            // Skipped reverse pairs never consume an id.
            for (i, edge) in graph.edges.iter().enumerate() {
                assert_eq!(edge.id, format!("edge-{}", i + 1), "seed {seed}");
            }
        }
    }
}
