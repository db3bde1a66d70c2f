// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Spanning tree and topological sort properties on generated graphs.

mod common;

use algo_stepper::graph::{visualize_algorithm, Graph, GraphAlgorithm, GraphEditor};
use common::reference_mst_weight;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

fn random_weighted(seed: u64) -> Graph {
    let mut editor = GraphEditor::new(false);
    editor.randomize(true, &mut StdRng::seed_from_u64(seed));
    editor.into_graph()
}

/// Random DAG: edges only run from lower to higher node number.
fn random_dag(seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut editor = GraphEditor::new(true);
    let ids: Vec<String> = (0..8).map(|_| editor.add_node(0.0, 0.0)).collect();
    for i in 0..ids.len() {
        for j in i + 1..ids.len() {
            if rng.gen_bool(0.35) {
                editor.add_edge(&ids[i], &ids[j], 1).unwrap();
            }
        }
    }
    editor.into_graph()
}

#[test]
fn kruskal_and_prim_agree_with_the_reference() {
    for seed in 0..20 {
        let graph = random_weighted(seed);
        let expected = reference_mst_weight(&graph);
        for algorithm in [GraphAlgorithm::Kruskal, GraphAlgorithm::Prim] {
            let output = visualize_algorithm(&graph, None, algorithm, false).unwrap();
            assert_eq!(output.result_edges.len(), graph.nodes.len() - 1, "{algorithm} seed {seed}");
            assert_eq!(graph.total_weight(&output.result_edges), expected, "{algorithm} seed {seed}");
        }
    }
}

#[test]
fn topological_order_puts_sources_first() {
    for seed in 0..20 {
        let graph = random_dag(seed);
        let output = visualize_algorithm(&graph, None, GraphAlgorithm::Topological, true).unwrap();
        assert_eq!(output.result_nodes.len(), graph.nodes.len());
        let position: HashMap<&str, usize> = output
            .result_nodes
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        for edge in &graph.edges {
            assert!(position[edge.source.as_str()] < position[edge.target.as_str()], "seed {seed}");
        }
    }
}

#[test]
fn a_back_edge_empties_the_order() {
    let mut graph = random_dag(3);
    let last = graph.nodes.last().unwrap().id.clone();
    let first = graph.nodes[0].id.clone();
    let mut editor = GraphEditor::from_graph(graph.clone(), true).unwrap();
    editor.add_edge(&first, &graph.nodes[1].id, 1).unwrap();
    editor.add_edge(&graph.nodes[1].id, &last, 1).unwrap();
    editor.add_edge(&last, &first, 1).unwrap();
    graph = editor.into_graph();
    let output = visualize_algorithm(&graph, None, GraphAlgorithm::Topological, true).unwrap();
    assert!(output.result_nodes.is_empty());
}

#[test]
fn traversals_reach_every_chained_node() {
    for seed in 0..10 {
        let mut editor = GraphEditor::new(true);
        editor.randomize(false, &mut StdRng::seed_from_u64(seed));
        let graph = editor.graph();
        for algorithm in [GraphAlgorithm::Bfs, GraphAlgorithm::Dfs] {
            let output = visualize_algorithm(graph, None, algorithm, true).unwrap();
            assert_eq!(output.visited_nodes.len(), graph.nodes.len(), "{algorithm}");
            assert_eq!(output.active_edges.len(), graph.nodes.len() - 1, "{algorithm}");
        }
        let scc = visualize_algorithm(graph, None, GraphAlgorithm::Scc, true).unwrap();
        let mut members = scc.result_nodes.clone();
        members.sort();
        members.dedup();
        assert_eq!(members.len(), graph.nodes.len());
    }
}
