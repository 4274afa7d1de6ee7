//! balance CLI tool
//!
//! Command-line interface for structural-balance analysis of signed edge lists.
//!
//! ## Commands
//!
//! - `summary <path>`: Node and edge counts of the loaded graph
//! - `census <path>`: Count and fraction of every triad class
//! - `signs <path>`: Fraction of positive and negative edges
//! - `probabilities <path>`: Independent-sign model against the signed census
//! - `simulate`: Balance dynamics on random complete graphs
//!
//! Every command accepts `--json` to print the result as JSON instead of text.

use clap::{Parser, Subcommand};
use signed_balance::{
    census::{SignedTriadCensus, TriadCensus},
    config::{BalanceCheck, TomlConfigProvider},
    edgelist::read_edge_list,
    probability::TriadProbabilityModel,
    simulation::BalanceSimulator,
    statistics::EdgeSignStatistics,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "balance")]
#[command(author, version, about = "Triad census and balance dynamics for signed networks", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an edge list and report its size
    Summary {
        /// Path to a `<source> <target> <sign>` edge list
        path: PathBuf,
    },

    /// Count triads of each class
    Census {
        /// Path to a `<source> <target> <sign>` edge list
        path: PathBuf,
    },

    /// Fraction of positive and negative edges
    Signs {
        /// Path to a `<source> <target> <sign>` edge list
        path: PathBuf,
    },

    /// Compare signed triads against the independent-sign model
    Probabilities {
        /// Path to a `<source> <target> <sign>` edge list
        path: PathBuf,
    },

    /// Run the balance dynamics simulation
    Simulate {
        /// Configuration file path (TOML, `[simulation]` table)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of nodes in the complete graph
        #[arg(long)]
        nodes: Option<usize>,

        /// Updates per repetition
        #[arg(long)]
        iterations: Option<u64>,

        /// Number of independent repetitions
        #[arg(long)]
        repetitions: Option<usize>,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Check balance only after the last update instead of after every update
        #[arg(long)]
        final_state: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { path } => {
            let graph = read_edge_list(&path)?;
            let summary = graph.summary();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Number of nodes: {}", summary.nodes);
                println!("Number of edges: {}", summary.edges);
                println!("Self loops: {}", summary.self_loops);
                println!("Reciprocated pairs: {}", summary.reciprocated_pairs);
            }
        }

        Commands::Census { path } => {
            let graph = read_edge_list(&path)?;
            let census = TriadCensus::compute(&graph)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&census.records())?);
            } else {
                println!("=== Triad Census ===");
                for record in census.records() {
                    println!(
                        "Triad Type {:>4}: Count={}, Fraction={:.6}",
                        record.triad, record.count, record.fraction
                    );
                }
                println!("Connected triples: {}", census.total());
                println!("Unconnected triples: {}", census.unconnected_triples());
            }
        }

        Commands::Signs { path } => {
            let graph = read_edge_list(&path)?;
            let stats = EdgeSignStatistics::compute(&graph)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Positive edges: {}", stats.positive_count);
                println!("Negative edges: {}", stats.negative_count);
                println!("Fraction of positive edges: {}", stats.positive_fraction);
                println!("Fraction of negative edges: {}", stats.negative_fraction);
            }
        }

        Commands::Probabilities { path } => {
            let graph = read_edge_list(&path)?;
            let stats = EdgeSignStatistics::compute(&graph)?;
            let model = TriadProbabilityModel::from_statistics(&stats);
            let census = SignedTriadCensus::compute(&graph)?;
            let rows = model.compare(&census);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("p = {:.6}", model.positive_fraction());
                println!("=== Signed Triads (observed share vs. model) ===");
                for row in rows {
                    println!(
                        "Triad Type {:>4} with {} positive: Observed={}, Empirical={:.6}, Probability={:.6}",
                        row.triad,
                        row.positives,
                        row.observed,
                        row.empirical_fraction,
                        row.model_probability
                    );
                }
            }
        }

        Commands::Simulate {
            config,
            nodes,
            iterations,
            repetitions,
            seed,
            final_state,
        } => {
            let mut settings = match config {
                Some(cfg_path) => TomlConfigProvider::new(cfg_path).load()?.simulation,
                None => Default::default(),
            };
            if let Some(nodes) = nodes {
                settings.node_count = nodes;
            }
            if let Some(iterations) = iterations {
                settings.iterations_per_trial = iterations;
            }
            if let Some(repetitions) = repetitions {
                settings.repetitions = repetitions;
            }
            if seed.is_some() {
                settings.random_seed = seed;
            }
            if final_state {
                settings.balance_check = BalanceCheck::FinalState;
            }

            let simulator = BalanceSimulator::new(settings)?;
            let report = simulator.run()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Balanced networks: {} of {}",
                    report.balanced, report.repetitions
                );
                println!("Fraction of balanced networks: {}", report.fraction_balanced);
            }
        }
    }

    Ok(())
}
