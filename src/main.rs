// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! `algoviz`: run one engine from the command line and print its narration.

use algo_stepper::backtracking::{
    self, maze, subset, sudoku, BacktrackingAlgorithm, BacktrackingConfig, Difficulty, TourType,
};
use algo_stepper::graph::{self, GraphAlgorithm, GraphEditor, GraphObserver};
use algo_stepper::pathfinding::{run_pathfinding, Grid, PathAlgorithm, PathObserver, PathfindingSettings};
use algo_stepper::sorting::{self, generate_array, ArrayKind, Race, RaceOutcome, SortAlgorithm, SortObserver};
use algo_stepper::{CancellationToken, Pacer, RunOutcome};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "algoviz")]
#[command(about = "Step through classic algorithms and print what they do")]
struct Cmd {
    /// Log engine internals at debug level
    #[arg(long, short)]
    verbose: bool,

    /// Seed for generated inputs; random when omitted
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Sort a generated array, or race several sorts against each other
    Sort {
        #[arg(long, default_value = "quickSort")]
        algorithm: SortAlgorithm,
        #[arg(long, default_value = "random")]
        kind: ArrayKind,
        #[arg(long, default_value_t = 20)]
        size: usize,
        /// Delay per step in milliseconds
        #[arg(long, default_value_t = 0)]
        speed: u64,
        /// Race these algorithms instead of running one
        #[arg(long, value_delimiter = ',')]
        race: Vec<SortAlgorithm>,
    },
    /// Search the default grid
    Path {
        #[arg(long, default_value = "dijkstra")]
        algorithm: PathAlgorithm,
        /// Generate a random maze first
        #[arg(long)]
        maze: bool,
        #[arg(long, default_value_t = 0)]
        speed: u64,
    },
    /// Run a graph algorithm on a random graph
    Graph {
        #[arg(long, default_value = "bfs")]
        algorithm: GraphAlgorithm,
        #[arg(long)]
        undirected: bool,
        #[arg(long)]
        weighted: bool,
        #[arg(long, default_value_t = 0)]
        speed: u64,
    },
    /// Generate a backtracking trace
    Backtrack {
        #[arg(long, default_value = "nqueens")]
        algorithm: BacktrackingAlgorithm,
        /// Board size for N-Queens, knight's tour, sudoku and generated mazes
        #[arg(long)]
        size: Option<usize>,
        #[arg(long)]
        find_all: bool,
        /// Generate a sudoku of this difficulty instead of the classic board
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Generate a maze with this wall density (percent)
        #[arg(long)]
        wall_density: Option<usize>,
        /// Look for a closed knight's tour
        #[arg(long)]
        closed: bool,
        /// Random subset sum instance
        #[arg(long)]
        random: bool,
        /// Dump the whole trace as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Prints narration lines, skipping consecutive repeats.
#[derive(Default)]
struct Printer {
    last: String,
}

impl Printer {
    fn say(&mut self, text: &str) {
        if text != self.last {
            println!("{text}");
            self.last = text.to_string();
        }
    }
}

impl SortObserver for Printer {
    fn on_narration(&mut self, text: &str) {
        self.say(text);
    }
}

impl PathObserver for Printer {
    fn on_narration(&mut self, text: &str) {
        self.say(text);
    }
}

impl GraphObserver for Printer {
    fn on_narration(&mut self, text: &str) {
        self.say(text);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    let mut rng = match cmd.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cmd.action {
        Action::Sort {
            algorithm,
            kind,
            size,
            speed,
            race,
        } => {
            if size == 0 {
                bail!("array size must be at least 1");
            }
            let array = generate_array(kind, size, &mut rng);
            if race.is_empty() {
                sort(algorithm, &array, speed).await
            } else {
                sort_race(race, array, speed).await
            }
        }
        Action::Path {
            algorithm,
            maze,
            speed,
        } => path(algorithm, maze, speed, &mut rng).await,
        Action::Graph {
            algorithm,
            undirected,
            weighted,
            speed,
        } => graph_run(algorithm, !undirected, weighted, speed, &mut rng).await,
        Action::Backtrack {
            algorithm,
            size,
            find_all,
            difficulty,
            wall_density,
            closed,
            random,
            json,
        } => {
            let mut config = BacktrackingConfig::default_for(algorithm);
            match &mut config {
                BacktrackingConfig::NQueens(c) => {
                    c.size = size.unwrap_or(c.size);
                    c.find_all_solutions = find_all;
                }
                BacktrackingConfig::Sudoku(c) => {
                    if let Some(difficulty) = difficulty {
                        c.board = sudoku::generate_puzzle(size.unwrap_or(9), difficulty, &mut rng)?;
                    }
                }
                BacktrackingConfig::Maze(c) => {
                    if size.is_some() || wall_density.is_some() {
                        let size = size.unwrap_or(10);
                        *c = maze::generate_corner_maze(size, wall_density.unwrap_or(30), &mut rng)?;
                    }
                }
                BacktrackingConfig::KnightsTour(c) => {
                    c.size = size.unwrap_or(c.size);
                    if closed {
                        c.tour_type = TourType::Closed;
                    }
                }
                BacktrackingConfig::SubsetSum(c) => {
                    if random {
                        (c.numbers, c.target) = subset::random_instance(&mut rng);
                    }
                    c.find_all_solutions = find_all;
                }
            }
            backtrack(&config, json)
        }
    }
}

async fn sort(algorithm: SortAlgorithm, array: &[u32], speed: u64) -> Result<()> {
    tracing::info!(%algorithm, len = array.len(), "sorting");
    let pacer = Pacer::from_millis(speed, CancellationToken::new());
    let report = sorting::run_sort(algorithm, array, &pacer, &mut Printer::default()).await?;
    println!(
        "{:?} -> {:?} ({} comparisons, {} swaps)",
        array, report.array, report.comparisons, report.swaps
    );
    Ok(())
}

async fn sort_race(algorithms: Vec<SortAlgorithm>, array: Vec<u32>, speed: u64) -> Result<()> {
    tracing::info!(lanes = algorithms.len(), len = array.len(), "racing");
    let race = Race::new(algorithms, array)?;
    match race.run(speed, &CancellationToken::new()).await {
        RaceOutcome::Ranked(results) => {
            for (place, result) in results.iter().enumerate() {
                println!(
                    "{}. {} in {:?} ({} comparisons, {} swaps)",
                    place + 1,
                    result.name,
                    result.elapsed,
                    result.comparisons,
                    result.swaps
                );
            }
        }
        RaceOutcome::Cancelled => println!("Race cancelled"),
    }
    Ok(())
}

async fn path(algorithm: PathAlgorithm, maze: bool, speed: u64, rng: &mut StdRng) -> Result<()> {
    let settings = PathfindingSettings {
        algorithm,
        speed_ms: speed,
        ..PathfindingSettings::default()
    };
    let mut grid: Grid = settings.grid()?;
    if maze {
        grid.generate_maze(rng);
        println!("{}", algo_stepper::pathfinding::grid::MAZE_GENERATED);
    }
    tracing::info!(%algorithm, walls = grid.wall_count(), "searching");
    let pacer = Pacer::from_millis(speed, CancellationToken::new());
    let report = run_pathfinding(&mut grid, algorithm, &pacer, &mut Printer::default()).await;
    if report.outcome != RunOutcome::Completed {
        bail!("pathfinding did not complete");
    }
    Ok(())
}

async fn graph_run(
    algorithm: GraphAlgorithm,
    directed: bool,
    weighted: bool,
    speed: u64,
    rng: &mut StdRng,
) -> Result<()> {
    let mut editor = GraphEditor::new(directed);
    editor.randomize(weighted, rng);
    let g = editor.graph();
    tracing::info!(%algorithm, nodes = g.nodes.len(), edges = g.edges.len(), directed, "running");
    for edge in &g.edges {
        println!("{}: {} -> {} (weight {})", edge.id, edge.source, edge.target, edge.weight);
    }
    let pacer = Pacer::from_millis(speed, CancellationToken::new());
    let report = graph::run_graph(g, None, algorithm, directed, &pacer, &mut Printer::default()).await?;
    if algorithm == GraphAlgorithm::Scc {
        for component in &report.output.components {
            println!("{{{}}}", component.join(", "));
        }
    }
    Ok(())
}

fn backtrack(config: &BacktrackingConfig, json: bool) -> Result<()> {
    tracing::info!(algorithm = %config.algorithm(), "generating steps");
    let trace = backtracking::generate_steps(config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }
    for step in &trace.steps {
        println!("[{}] {}", step.node_id, step.description);
    }
    for (counter, value) in trace.statistics.iter() {
        println!("{}: {}", counter.as_ref(), value);
    }
    println!("{} steps, {} tree nodes", trace.len(), trace.tree.len());
    Ok(())
}
