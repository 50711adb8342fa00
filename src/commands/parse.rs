//! Parse command implementation.
//!
//! Reads stack text, parses it and either prints a frame table or writes
//! the parsed frames as a JSON document.

use super::utils::read_input;
use crate::output::{write_document, StackDocument};
use crate::parser::parse_stack_trace;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Arguments for the parse command
#[derive(Debug, Clone)]
pub struct ParseArgs {
    /// Stack text file, or `-` for stdin
    pub input: PathBuf,

    /// Output path for the JSON document (optional)
    pub output: Option<PathBuf>,
}

/// Execute the parse command
///
/// **Public** - main entry point called from main.rs
pub fn execute_parse(args: ParseArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let frames = parse_stack_trace(&text);
    info!("Parsed {} frames from {}", frames.len(), args.input.display());

    match &args.output {
        Some(path) => {
            let document = StackDocument::new(frames);
            write_document(&document, path).context("Failed to write stack document")?;
            info!("✓ Stack document written to: {}", path.display());
        }
        None => {
            println!("{:<4} {:<32} {:<20} {:<40} LOCATION", "#", "FUNCTION", "RECEIVER", "PACKAGE");
            for (i, frame) in frames.iter().enumerate() {
                println!(
                    "{:<4} {:<32} {:<20} {:<40} {}:{}",
                    i, frame.function, frame.receiver, frame.package, frame.file, frame.line
                );
            }
        }
    }

    Ok(())
}
