//! Report command implementation.
//!
//! The report command:
//! 1. Reads stack text
//! 2. Builds the graph sink (Neo4j, or in-memory for dry runs)
//! 3. Parses, chains and writes the stack through a StackReporter

use super::utils::read_input;
use crate::graph::{MemoryGraph, Neo4jSink};
use crate::reporter::{ReportOutcome, StackReporter};
use crate::utils::config::{Neo4jConfig, DEFAULT_DATABASE, DEFAULT_NEO4J_URI};
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the report command
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Stack text file, or `-` for stdin
    pub input: PathBuf,

    /// Neo4j HTTP endpoint
    pub uri: String,

    pub username: Option<String>,
    pub password: Option<String>,
    pub database: String,

    /// Write to an in-memory graph instead of Neo4j
    pub dry_run: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            uri: DEFAULT_NEO4J_URI.to_string(),
            username: None,
            password: None,
            database: DEFAULT_DATABASE.to_string(),
            dry_run: false,
        }
    }
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input read failures
/// * Sink construction or write failures
pub fn execute_report(args: ReportArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Step 1/2: Reading stack text from {}...", args.input.display());
    let text = read_input(&args.input)?;

    info!("Step 2/2: Reporting stack...");
    if args.dry_run {
        let graph = Arc::new(MemoryGraph::new());
        let reporter = StackReporter::new(Arc::clone(&graph));
        let outcome = reporter.report(&text).context("Failed to report stack")?;
        reporter.close();

        print_outcome(outcome);
        println!(
            "Dry run graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
    } else {
        let sink = Neo4jSink::new(build_config(&args)).context("Failed to create Neo4j sink")?;
        let reporter = StackReporter::new(sink);
        let result = reporter.report(&text);
        reporter.close();

        let outcome = result.with_context(|| format!("Failed to report stack to {}", args.uri))?;
        print_outcome(outcome);
    }

    info!("Report completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Build the sink configuration from arguments
///
/// **Private** - internal helper for execute_report
fn build_config(args: &ReportArgs) -> Neo4jConfig {
    let config = Neo4jConfig::new(&args.uri).with_database(&args.database);
    match &args.username {
        Some(username) => {
            config.with_credentials(username, args.password.clone().unwrap_or_default())
        }
        None => config,
    }
}

fn print_outcome(outcome: ReportOutcome) {
    match outcome {
        ReportOutcome::Reported { frames, operations } => {
            println!("✓ Reported {} frames ({} graph operations)", frames, operations);
        }
        ReportOutcome::Duplicate => println!("Stack already reported, nothing written"),
    }
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.dry_run {
        return Ok(());
    }

    if args.uri.is_empty() {
        anyhow::bail!("Neo4j URI cannot be empty");
    }

    if !args.uri.starts_with("http://") && !args.uri.starts_with("https://") {
        anyhow::bail!("Neo4j URI must start with http:// or https:// (the HTTP API is used)");
    }

    if args.database.is_empty() {
        anyhow::bail!("Database name cannot be empty");
    }

    if args.password.is_some() && args.username.is_none() {
        anyhow::bail!("A password was given without a username");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_args_valid() {
        let args = ReportArgs {
            uri: "http://localhost:7474".to_string(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_uri() {
        let args = ReportArgs {
            uri: String::new(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_bolt_scheme() {
        let args = ReportArgs {
            uri: "neo4j://localhost".to_string(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_database() {
        let args = ReportArgs {
            database: String::new(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_password_without_user() {
        let args = ReportArgs {
            password: Some("secret".to_string()),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_dry_run_ignores_uri() {
        let args = ReportArgs {
            uri: String::new(),
            dry_run: true,
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_build_config_credentials() {
        let args = ReportArgs {
            username: Some("neo4j".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        };

        let config = build_config(&args);
        assert_eq!(config.username.as_deref(), Some("neo4j"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.database, DEFAULT_DATABASE);
    }

    #[test]
    fn test_execute_report_dry_run() {
        let mut input = NamedTempFile::new().unwrap();
        write!(input, "main.run()\n\t/app/main.go:7 +0x1d\nmain.main()\n\t/app/main.go:3 +0x11\n")
            .unwrap();

        let args = ReportArgs {
            input: input.path().to_path_buf(),
            dry_run: true,
            ..Default::default()
        };

        assert!(execute_report(args).is_ok());
    }
}
