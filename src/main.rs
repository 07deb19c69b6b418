// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Sociograph CLI - analyze follower networks as weighted graphs

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use sociograph::commands::{self, Output};
use sociograph::config::Config;
use sociograph::VertexId;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sociograph")]
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
    #[arg(short, long, env = "SOCIOGRAPH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(
        long,
        env = "NO_COLOR",
        global = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every analysis over a social network file
    Analyze {
        /// Social network file
        file: PathBuf,

        /// Shortest path start (defaults to the first account)
        #[arg(long, requires = "to")]
        from: Option<VertexId>,

        /// Shortest path end (defaults to the second account)
        #[arg(long, requires = "from")]
        to: Option<VertexId>,

        /// Skip exhaustive path analyses above this many accounts
        #[arg(long)]
        max_exhaustive: Option<usize>,
    },

    /// Cheapest weighted path between two accounts
    Path {
        /// Social network file
        file: PathBuf,
        /// Start account
        from: VertexId,
        /// End account
        to: VertexId,
    },

    /// Print the graph
    Show {
        /// Social network file
        file: PathBuf,

        /// Print the undirected form
        #[arg(long)]
        undirected: bool,
    },

    /// Describe one account
    Who {
        /// Social network file
        file: PathBuf,
        /// Account id
        id: VertexId,
    },

    /// Count likes from one account to another
    Likes {
        /// Social network file
        file: PathBuf,
        /// Liking account
        from: VertexId,
        /// Liked account
        to: VertexId,
    },

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_new(log_level)
        .with_context(|| format!("Invalid log level: {log_level}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output = Output {
        json: cli.json,
        color: config.color && !cli.no_color,
    };

    // Execute command
    match cli.command {
        Commands::Analyze { file, from, to, max_exhaustive } => {
            let endpoints = from.zip(to);
            let limit = max_exhaustive.unwrap_or(config.max_exhaustive_vertices);
            commands::analyze::run(&file, endpoints, limit, output)
        }
        Commands::Path { file, from, to } => {
            commands::path::run(&file, from, to, output)
        }
        Commands::Show { file, undirected } => {
            commands::show::run(&file, undirected, output)
        }
        Commands::Who { file, id } => {
            commands::who::run(&file, id, output)
        }
        Commands::Likes { file, from, to } => {
            commands::likes::run(&file, from, to, output)
        }
        Commands::Config => {
            commands::config::run(&config, output)
        }
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}
