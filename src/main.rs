// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Collabgraph CLI - collaboration graphs from GitHub interaction data

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use collabgraph::commands::{self, Output};
use collabgraph::config;
use collabgraph::dataset::GraphView;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "collabgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "COLLABGRAPH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Dataset path override
    #[arg(short, long, env = "COLLABGRAPH_DATASET", global = true)]
    dataset: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the structure of one interaction graph
    Inspect {
        /// Graph: issue-comments, issue-closures, pull-requests, all
        graph: GraphView,
    },

    /// Rank users by degree, betweenness, closeness and PageRank
    Metrics {
        /// Graph: issue-comments, issue-closures, pull-requests, all
        graph: GraphView,

        /// Users listed per metric (defaults to the configured top_k)
        #[arg(short, long)]
        top: Option<usize>,

        /// Print every user with all four scores, ordered by PageRank
        #[arg(short, long)]
        all: bool,
    },

    /// Detect communities and bridging users
    Communities {
        /// Graph: issue-comments, issue-closures, pull-requests, all
        graph: GraphView,

        /// Bridging users listed
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Summarize every reported graph and the overall metric means
    Report,

    /// Show configuration
    Config {
        /// Configuration key (omit to show all)
        key: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = config::load(cli.config.as_deref())?;
    if let Some(dataset) = cli.dataset {
        config.dataset = dataset;
    }

    // Initialize logging
    let filter = match cli.verbose {
        _ if std::env::var_os("RUST_LOG").is_some() => EnvFilter::from_default_env(),
        0 if cli.quiet => EnvFilter::new("error"),
        0 => EnvFilter::new(&config.log_level),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let out = Output {
        json: cli.json,
        color: !cli.no_color,
    };

    // Execute command
    match cli.command {
        Commands::Inspect { graph } => {
            let dataset = commands::load_dataset(&config.dataset)?;
            commands::inspect::run(&dataset, graph, out)
        }
        Commands::Metrics { graph, top, all } => {
            let dataset = commands::load_dataset(&config.dataset)?;
            commands::metrics::run(&dataset, graph, top, all, &config, out)
        }
        Commands::Communities { graph, top } => {
            let dataset = commands::load_dataset(&config.dataset)?;
            commands::communities::run(&dataset, graph, top.unwrap_or(config.top_k), out)
        }
        Commands::Report => {
            let dataset = commands::load_dataset(&config.dataset)?;
            commands::report::run(&dataset, &config, out)
        }
        Commands::Config { key } => commands::config::run(&config, key.as_deref(), out),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
