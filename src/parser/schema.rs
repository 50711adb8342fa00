//! Data model for parsed stack frames.
//!
//! `StackFrame` is the normalized entity persisted downstream; every field
//! is derived from a single frame's signature and location.

use serde::{Deserialize, Serialize};

/// One call-site line paired with its location line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame<'a> {
    /// Call description, e.g. `main.isError({0x1, 0x2})`
    pub call_description: &'a str,

    /// Source file path from the location line
    pub file: &'a str,

    /// Line number, kept textual
    pub line: &'a str,
}

/// A fully decomposed stack frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    /// Cleaned call description before package/receiver stripping
    pub original_signature: String,

    /// Bare function or method name
    pub function: String,

    /// Type the method is defined on; empty for free functions
    pub receiver: String,

    /// Full package import path
    pub package: String,

    /// Last segment of `package`
    pub package_name: String,

    pub repository: String,
    pub repository_organization: String,
    pub repository_name: String,

    /// Absolute source file path
    pub file: String,

    /// Parent directory of `file` and its last segment
    pub folder: String,
    pub folder_name: String,

    pub line: String,
}
