//! stack2graph CLI
//!
//! Parses captured call stacks and writes them to a Neo4j call graph.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use stacktrace_to_graph::commands::{
    display_schema, display_version, execute_parse, execute_report, validate_args, ParseArgs,
    ReportArgs,
};
use stacktrace_to_graph::utils::config::{DEFAULT_DATABASE, DEFAULT_NEO4J_URI};

/// stack2graph - call graphs from captured stacks
#[derive(Parser, Debug)]
#[command(name = "stack2graph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a stack and print or save its frames
    Parse {
        /// Stack text file (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output path for JSON document (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a stack and write its call chain to the graph
    Report {
        /// Stack text file (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Neo4j HTTP endpoint
        #[arg(long, env = "NEO4J_URI", default_value = DEFAULT_NEO4J_URI)]
        uri: String,

        /// Neo4j user name
        #[arg(short, long, env = "NEO4J_USER")]
        user: Option<String>,

        /// Neo4j password
        #[arg(short, long, env = "NEO4J_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Target database
        #[arg(short, long, env = "NEO4J_DATABASE", default_value = DEFAULT_DATABASE)]
        database: String,

        /// Write to an in-memory graph and print its size instead
        #[arg(long)]
        dry_run: bool,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Parse { input, output } => {
            execute_parse(ParseArgs { input, output })?;
        }

        Commands::Report {
            input,
            uri,
            user,
            password,
            database,
            dry_run,
        } => {
            let args = ReportArgs {
                input,
                uri,
                username: user,
                password,
                database,
                dry_run,
            };

            // Validate args first
            validate_args(&args)?;

            execute_report(args)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
