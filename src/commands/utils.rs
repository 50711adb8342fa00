use crate::utils::config::{CALLS_RELATIONSHIP, FUNCTION_LABEL, SCHEMA_VERSION};
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read stack text from a file, or from stdin when the path is `-`
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stack text from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stack text from {}", path.display()))
}

/// Display graph schema information
pub fn display_schema(show_details: bool) {
    println!("Stack Graph Schema");
    println!("Document Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Node (:{}), merged on (name, package):", FUNCTION_LABEL);
        println!("  name: string                    - Bare function or method name");
        println!("  package: string                 - Full package import path");
        println!("  receiver: string                - Method receiver type, empty for functions");
        println!("  package_name: string            - Last segment of package");
        println!("  repository: string              - host/org/name for hosted packages");
        println!("  repository_organization: string - Organization segment");
        println!("  repository_name: string         - Repository or subpackage name");
        println!("  file: string                    - Source file path");
        println!("  folder: string                  - Parent directory of file");
        println!("  folder_name: string             - Last segment of folder");
        println!("  line: string                    - Line number of the call site");
        println!("  original_signature: string      - Signature without arguments");
        println!();
        println!("Relationship (caller)-[:{}]->(callee), merged", CALLS_RELATIONSHIP);
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("stack2graph v{}", env!("CARGO_PKG_VERSION"));
    println!("Document Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Turns captured call stacks into a deduplicated call graph.");
}
