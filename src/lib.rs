//! Stack Trace to Graph
//!
//! Turns captured call-stack text into a normalized, deduplicated
//! call graph.
//!
//! The pipeline for one stack:
//!
//! ```text
//! raw text -> split_frames -> clean_function_name -> identity parsing
//!          -> dedup check -> build_chain -> GraphSink
//! ```
//!
//! ## Getting Started
//!
//! ```
//! use std::sync::Arc;
//! use stacktrace_to_graph::graph::MemoryGraph;
//! use stacktrace_to_graph::reporter::StackReporter;
//!
//! let graph = Arc::new(MemoryGraph::new());
//! let reporter = StackReporter::new(Arc::clone(&graph));
//!
//! let stack = "main.run()\n\t/app/main.go:7 +0x1d\nmain.main()\n\t/app/main.go:3 +0x11\n";
//! reporter.report(stack).unwrap();
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

pub mod cache;
pub mod commands;
pub mod graph;
pub mod output;
pub mod parser;
pub mod reporter;
pub mod utils;
