//! Stack-trace parsing and frame normalization.
//!
//! This module handles:
//! - Splitting raw stack text into call/location line pairs
//! - Stripping argument lists from call descriptions
//! - Decomposing signatures into package, receiver and function
//! - Deriving repository and folder identity

pub mod identity;
pub mod schema;
pub mod signature;
pub mod splitter;

// Re-export main types
pub use identity::{
    parse_folder, parse_package_name, parse_receiver, parse_repository, short_package_name,
    strip_package, CallTarget, FolderInfo, RepositoryInfo,
};
pub use schema::{RawFrame, StackFrame};
pub use signature::clean_function_name;
pub use splitter::split_frames;

use log::debug;

/// Parse raw stack text into normalized frames
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `stack` - Raw stack text, innermost call first
///
/// # Returns
/// One `StackFrame` per recognized frame, in the order of the input
pub fn parse_stack_trace(stack: &str) -> Vec<StackFrame> {
    let frames: Vec<StackFrame> = split_frames(stack).iter().map(parse_frame).collect();

    debug!("Parsed {} stack frames", frames.len());
    frames
}

/// Normalize a single raw frame
///
/// **Public** - exposed for callers that split frames themselves
pub fn parse_frame(raw: &RawFrame<'_>) -> StackFrame {
    let signature = clean_function_name(raw.call_description);
    let package = parse_package_name(signature);
    let target = parse_receiver(strip_package(signature, package));

    // Keep a usable name when the signature has no package-relative part
    let function = [target.function, signature, raw.call_description.trim()]
        .into_iter()
        .find(|name| !name.is_empty())
        .unwrap_or_default();

    let repository = parse_repository(package);
    let folder = parse_folder(raw.file);

    StackFrame {
        original_signature: signature.to_string(),
        function: function.to_string(),
        receiver: target.receiver.to_string(),
        package: package.to_string(),
        package_name: short_package_name(package).to_string(),
        repository: repository.repository.to_string(),
        repository_organization: repository.organization.to_string(),
        repository_name: repository.name.to_string(),
        file: raw.file.to_string(),
        folder: folder.folder.to_string(),
        folder_name: folder.folder_name.to_string(),
        line: raw.line.to_string(),
    }
}
