//! Deduplication of already-reported stacks.
//!
//! The raw stack text is the key: any textual difference, including
//! addresses or whitespace, makes a stack distinct.

pub mod dedup;

pub use dedup::{ReportClaim, ReportedStacks};
