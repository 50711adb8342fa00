//! Output writers for parsed stacks.
//!
//! This module handles writing parsed frames to disk as JSON documents
//! and reading them back.

pub mod json;

// Re-export main functions
pub use json::{read_document, write_document, StackDocument};
