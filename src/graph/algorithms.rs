// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The six graph algorithms.
//!
//! Each one is eager and returns ordered id lists for the replay. Adjacency
//! is derived from the edge list on every expansion, so edits between runs
//! need no bookkeeping.

use super::model::{Edge, Graph};
use super::GraphAlgorithm;
use crate::error::{ConfigError, Result};
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

/// What one algorithm produced, phase by phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphOutput {
    pub visited_nodes: Vec<String>,
    /// Discovery edges of a traversal.
    pub active_edges: Vec<String>,
    pub result_nodes: Vec<String>,
    pub result_edges: Vec<String>,
    /// Strongly connected components, in discovery order.
    pub components: Vec<Vec<String>>,
}

impl GraphOutput {
    pub fn total_steps(&self) -> usize {
        self.visited_nodes.len()
            + self.active_edges.len()
            + self.result_nodes.len()
            + self.result_edges.len()
    }
}

fn owned(ids: Vec<&str>) -> Vec<String> {
    ids.into_iter().map(str::to_string).collect()
}

/// Breadth-first order from `start`, with the edge that discovered each node.
pub fn bfs<'g>(graph: &'g Graph, start: &'g str, directed: bool) -> (Vec<&'g str>, Vec<&'g str>) {
    let mut order = Vec::new();
    let mut discovery = Vec::new();
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        order.push(current);
        for (edge, next) in graph.adjacent(current, directed) {
            if seen.insert(next) {
                discovery.push(edge.id.as_str());
                queue.push_back(next);
            }
        }
    }
    (order, discovery)
}

struct Dfs<'g> {
    graph: &'g Graph,
    directed: bool,
    seen: HashSet<&'g str>,
    order: Vec<&'g str>,
    discovery: Vec<&'g str>,
}

impl<'g> Dfs<'g> {
    fn visit(&mut self, node: &'g str) {
        self.seen.insert(node);
        self.order.push(node);
        let graph = self.graph;
        for (edge, next) in graph.adjacent(node, self.directed) {
            if !self.seen.contains(next) {
                self.discovery.push(edge.id.as_str());
                self.visit(next);
            }
        }
    }
}

/// Recursive depth-first preorder from `start`, with discovery edges.
pub fn dfs<'g>(graph: &'g Graph, start: &'g str, directed: bool) -> (Vec<&'g str>, Vec<&'g str>) {
    let mut walk = Dfs {
        graph,
        directed,
        seen: HashSet::new(),
        order: Vec::new(),
        discovery: Vec::new(),
    };
    walk.visit(start);
    (walk.order, walk.discovery)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

struct Topological<'g> {
    graph: &'g Graph,
    marks: HashMap<&'g str, Mark>,
    finished: Vec<&'g str>,
}

impl<'g> Topological<'g> {
    /// False when a node still in progress is reached again.
    fn visit(&mut self, node: &'g str) -> bool {
        match self.marks.get(node) {
            Some(Mark::InProgress) => return false,
            Some(Mark::Done) => return true,
            None => {}
        }
        self.marks.insert(node, Mark::InProgress);
        let graph = self.graph;
        for (_, next) in graph.adjacent(node, true) {
            if !self.visit(next) {
                return false;
            }
        }
        self.marks.insert(node, Mark::Done);
        self.finished.push(node);
        true
    }
}

/// Topological order over directed edges, or empty when there is a cycle.
pub fn topological_sort(graph: &Graph) -> Vec<&str> {
    let mut sort = Topological {
        graph,
        marks: HashMap::new(),
        finished: Vec::new(),
    };
    for node in &graph.nodes {
        if !sort.marks.contains_key(node.id.as_str()) && !sort.visit(&node.id) {
            tracing::debug!(node = %node.id, "cycle detected");
            return Vec::new();
        }
    }
    sort.finished.reverse();
    sort.finished
}

/// Disjoint sets over node indices, with path compression and union by rank.
#[derive(Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Returns false when `a` and `b` were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Minimum spanning forest, edges taken lightest first. Direction is ignored.
pub fn kruskal(graph: &Graph) -> Vec<&str> {
    let index: HashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();
    let mut edges: Vec<&Edge> = graph.edges.iter().collect();
    edges.sort_by_key(|edge| edge.weight);

    let mut sets = UnionFind::new(graph.nodes.len());
    let mut tree = Vec::new();
    for edge in edges {
        let (Some(&a), Some(&b)) = (index.get(edge.source.as_str()), index.get(edge.target.as_str())) else {
            continue;
        };
        if sets.union(a, b) {
            tree.push(edge.id.as_str());
        }
    }
    tree
}

/// Minimum spanning tree grown from `start`.
///
/// Candidates live in a list that is stably re-sorted by weight after every
/// expansion, so equal weights are taken in the order they were offered.
pub fn prim<'g>(graph: &'g Graph, start: &'g str, directed: bool) -> Vec<&'g str> {
    let mut tree = Vec::new();
    let mut visited = HashSet::from([start]);
    let mut candidates: Vec<&Edge> = graph.adjacent(start, directed).map(|(edge, _)| edge).collect();
    candidates.sort_by_key(|edge| edge.weight);

    while !candidates.is_empty() && visited.len() < graph.nodes.len() {
        let edge = candidates.remove(0);
        let next = if visited.contains(edge.source.as_str()) {
            edge.target.as_str()
        } else {
            edge.source.as_str()
        };
        if !visited.insert(next) {
            continue;
        }
        tree.push(edge.id.as_str());
        candidates.extend(
            graph
                .adjacent(next, directed)
                .filter(|(_, far)| !visited.contains(far))
                .map(|(edge, _)| edge),
        );
        candidates.sort_by_key(|edge| edge.weight);
    }
    tree
}

struct Kosaraju<'g> {
    graph: &'g Graph,
    seen: HashSet<&'g str>,
    finished: Vec<&'g str>,
}

impl<'g> Kosaraju<'g> {
    fn fill(&mut self, node: &'g str) {
        self.seen.insert(node);
        let graph = self.graph;
        for (_, next) in graph.adjacent(node, true) {
            if !self.seen.contains(next) {
                self.fill(next);
            }
        }
        self.finished.push(node);
    }

    fn collect(&mut self, node: &'g str, component: &mut Vec<&'g str>) {
        self.seen.insert(node);
        component.push(node);
        let graph = self.graph;
        let sources = graph
            .edges
            .iter()
            .filter(|edge| edge.target == node)
            .map(|edge| edge.source.as_str());
        for previous in sources {
            if !self.seen.contains(previous) {
                self.collect(previous, component);
            }
        }
    }
}

/// Strongly connected components over directed edges.
pub fn strongly_connected_components(graph: &Graph) -> Vec<Vec<&str>> {
    let mut pass = Kosaraju {
        graph,
        seen: HashSet::new(),
        finished: Vec::new(),
    };
    for node in &graph.nodes {
        if !pass.seen.contains(node.id.as_str()) {
            pass.fill(&node.id);
        }
    }
    pass.seen.clear();
    let mut components = Vec::new();
    while let Some(node) = pass.finished.pop() {
        if !pass.seen.contains(node) {
            let mut component = Vec::new();
            pass.collect(node, &mut component);
            components.push(component);
        }
    }
    components
}

/// Run `algorithm` on `graph`.
///
/// Traversals and Prim start from `start`, or the first node when `None`.
#[tracing::instrument(skip_all, fields(algorithm = %algorithm, directed = directed))]
pub fn visualize_algorithm(
    graph: &Graph,
    start: Option<&str>,
    algorithm: GraphAlgorithm,
    directed: bool,
) -> Result<GraphOutput> {
    graph.validate()?;
    let first = graph.first_node_id().ok_or(ConfigError::EmptyGraph)?;
    let start = match start {
        Some(id) => graph
            .node(id)
            .map(|node| node.id.as_str())
            .ok_or_else(|| ConfigError::UnknownNode(id.to_string()))?,
        None => first,
    };

    let mut output = GraphOutput::default();
    match algorithm {
        GraphAlgorithm::Bfs => {
            let (order, discovery) = bfs(graph, start, directed);
            output.visited_nodes = owned(order);
            output.active_edges = owned(discovery);
        }
        GraphAlgorithm::Dfs => {
            let (order, discovery) = dfs(graph, start, directed);
            output.visited_nodes = owned(order);
            output.active_edges = owned(discovery);
        }
        GraphAlgorithm::Topological => output.result_nodes = owned(topological_sort(graph)),
        GraphAlgorithm::Kruskal => output.result_edges = owned(kruskal(graph)),
        GraphAlgorithm::Prim => output.result_edges = owned(prim(graph, start, directed)),
        GraphAlgorithm::Scc => {
            output.components = strongly_connected_components(graph)
                .into_iter()
                .map(owned)
                .collect();
            output.result_nodes = output.components.concat();
        }
    }
    tracing::debug!(steps = output.total_steps(), "graph algorithm finished");
    Ok(output)
}
