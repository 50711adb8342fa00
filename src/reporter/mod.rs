//! Reporting stacks into the call graph.
//!
//! `StackReporter` is an explicit handle owning a sink and its dedup cache.
//! A process-wide default can be installed for call sites that hold no
//! handle; nothing in the handle depends on it.

pub mod global;
pub mod source;
pub mod stack_reporter;

pub use global::{global, install_global, report_stacktrace};
pub use source::{CapturedStack, StackSource};
pub use stack_reporter::{ReportOutcome, StackReporter};
