// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Paced four-phase replay of a graph algorithm's output.
//!
//! Phases run one after another: visited nodes, active edges, result
//! nodes, result edges. Progress counts across all four.

use super::algorithms::{visualize_algorithm, GraphOutput};
use super::model::Graph;
use super::GraphAlgorithm;
use crate::control::{percent, Cancelled, Pacer, RunOutcome};
use crate::error::Result;
use serde::Serialize;
use std::time::Duration;
use strum_macros::Display;
use tokio::time::Instant;

pub const STOPPED: &str = "Visualization stopped. Click Visualize to restart.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum Phase {
    VisitedNode,
    ActiveEdge,
    ResultNode,
    ResultEdge,
}

/// Receives every published change of a graph run.
pub trait GraphObserver: Send {
    /// `id` joined the set for `phase`.
    fn on_mark(&mut self, _phase: Phase, _id: &str) {}
    fn on_progress(&mut self, _percent: u8) {}
    fn on_narration(&mut self, _text: &str) {}
    fn on_running_change(&mut self, _running: bool) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullGraphObserver;

impl GraphObserver for NullGraphObserver {}

/// The four highlight sets as painted so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphView {
    pub visited_nodes: Vec<String>,
    pub active_edges: Vec<String>,
    pub result_nodes: Vec<String>,
    pub result_edges: Vec<String>,
}

impl GraphView {
    fn set(&mut self, phase: Phase) -> &mut Vec<String> {
        match phase {
            Phase::VisitedNode => &mut self.visited_nodes,
            Phase::ActiveEdge => &mut self.active_edges,
            Phase::ResultNode => &mut self.result_nodes,
            Phase::ResultEdge => &mut self.result_edges,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphReport {
    pub algorithm: GraphAlgorithm,
    pub outcome: RunOutcome,
    pub output: GraphOutput,
    pub view: GraphView,
    pub elapsed: Duration,
}

/// The closing narration for a completed replay.
pub fn summary(graph: &Graph, algorithm: GraphAlgorithm, output: &GraphOutput) -> String {
    match algorithm {
        GraphAlgorithm::Bfs | GraphAlgorithm::Dfs => format!(
            "{} traversal complete! Visited {} nodes.",
            algorithm.as_ref().to_uppercase(),
            output.visited_nodes.len()
        ),
        GraphAlgorithm::Topological if output.result_nodes.is_empty() && !graph.is_empty() => {
            "Topological sort failed: the graph contains a cycle, so it is not a valid DAG."
                .to_string()
        }
        GraphAlgorithm::Topological => format!(
            "Topological sort complete! Found ordering of {} nodes.",
            output.result_nodes.len()
        ),
        GraphAlgorithm::Kruskal | GraphAlgorithm::Prim => format!(
            "Minimum Spanning Tree complete! MST contains {} edges.",
            output.result_edges.len()
        ),
        GraphAlgorithm::Scc => format!(
            "Found {} strongly connected components.",
            output.components.len()
        ),
    }
}

fn narration(graph: &Graph, phase: Phase, id: &str) -> String {
    match phase {
        Phase::VisitedNode => format!("Visiting node {}...", graph.label(id)),
        Phase::ActiveEdge => format!("Traversing edge {id}..."),
        Phase::ResultNode => format!("Adding node {} to result...", graph.label(id)),
        Phase::ResultEdge => format!("Adding edge {id} to result..."),
    }
}

async fn paint_all(
    graph: &Graph,
    output: &GraphOutput,
    view: &mut GraphView,
    pacer: &Pacer,
    observer: &mut dyn GraphObserver,
) -> std::result::Result<(), Cancelled> {
    let total = output.total_steps() as f64;
    let phases = [
        (Phase::VisitedNode, &output.visited_nodes),
        (Phase::ActiveEdge, &output.active_edges),
        (Phase::ResultNode, &output.result_nodes),
        (Phase::ResultEdge, &output.result_edges),
    ];
    let mut step = 0;
    for (phase, ids) in phases {
        for id in ids {
            pacer.token().check()?;
            view.set(phase).push(id.clone());
            observer.on_mark(phase, id);
            observer.on_narration(&narration(graph, phase, id));
            step += 1;
            observer.on_progress(percent(step, total));
            pacer.pause(1.0).await?;
        }
    }
    Ok(())
}

/// Replay `output` at the pacer's cadence.
pub async fn animate(
    graph: &Graph,
    algorithm: GraphAlgorithm,
    output: &GraphOutput,
    pacer: &Pacer,
    observer: &mut dyn GraphObserver,
) -> (RunOutcome, GraphView) {
    let mut view = GraphView::default();
    let outcome = RunOutcome::from(paint_all(graph, output, &mut view, pacer, observer).await);
    match outcome {
        RunOutcome::Completed => {
            observer.on_narration(&summary(graph, algorithm, output));
            observer.on_progress(100);
        }
        RunOutcome::Cancelled => {
            tracing::debug!("graph replay cancelled");
            observer.on_narration(STOPPED);
        }
    }
    (outcome, view)
}

/// Run `algorithm` on `graph`, then replay its output.
#[tracing::instrument(skip_all, fields(algorithm = %algorithm, nodes = graph.nodes.len()))]
pub async fn run_graph(
    graph: &Graph,
    start: Option<&str>,
    algorithm: GraphAlgorithm,
    directed: bool,
    pacer: &Pacer,
    observer: &mut dyn GraphObserver,
) -> Result<GraphReport> {
    let output = visualize_algorithm(graph, start, algorithm, directed)?;
    let started = Instant::now();
    observer.on_running_change(true);
    observer.on_progress(0);
    observer.on_narration(algorithm.running_message());
    let (outcome, view) = animate(graph, algorithm, &output, pacer, observer).await;
    observer.on_running_change(false);
    Ok(GraphReport {
        algorithm,
        outcome,
        output,
        view,
        elapsed: started.elapsed(),
    })
}
