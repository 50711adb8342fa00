//! Graph write operations and sinks.
//!
//! A reported stack becomes an ordered list of idempotent upserts:
//! one node per frame, one `CALLS` edge between consecutive frames.
//! Sinks apply the whole list as a single transaction.

pub mod chain;
pub mod memory;
pub mod neo4j;

pub use chain::build_chain;
pub use memory::MemoryGraph;
pub use neo4j::Neo4jSink;

use crate::parser::StackFrame;
use crate::utils::error::SinkError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Identity of a function node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    pub name: String,
    pub package: String,
}

impl NodeKey {
    pub fn from_frame(frame: &StackFrame) -> Self {
        Self {
            name: frame.function.clone(),
            package: frame.package.clone(),
        }
    }
}

/// Create-or-update a function node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUpsert {
    pub key: NodeKey,

    /// Non-key fields, overwritten on every upsert
    pub properties: BTreeMap<String, String>,
}

impl NodeUpsert {
    /// Build the upsert for a frame
    ///
    /// **Public** - used by the chain builder
    pub fn from_frame(frame: &StackFrame) -> Self {
        let properties = [
            ("receiver", &frame.receiver),
            ("package_name", &frame.package_name),
            ("repository", &frame.repository),
            ("repository_organization", &frame.repository_organization),
            ("repository_name", &frame.repository_name),
            ("file", &frame.file),
            ("folder", &frame.folder),
            ("folder_name", &frame.folder_name),
            ("line", &frame.line),
            ("original_signature", &frame.original_signature),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect();

        Self {
            key: NodeKey::from_frame(frame),
            properties,
        }
    }
}

/// Create a `CALLS` relationship if it does not exist
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeUpsert {
    pub caller: NodeKey,
    pub callee: NodeKey,
}

/// A single idempotent write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GraphOp {
    UpsertNode(NodeUpsert),
    UpsertEdge(EdgeUpsert),
}

/// Destination for call chains
///
/// Implementations must apply `ops` atomically: either every operation
/// becomes visible or none does.
pub trait GraphSink: Send + Sync {
    fn write_chain(&self, ops: &[GraphOp]) -> Result<(), SinkError>;

    /// Release transport resources; no writes follow
    fn close(&self) {}
}

impl<S: GraphSink + ?Sized> GraphSink for Arc<S> {
    fn write_chain(&self, ops: &[GraphOp]) -> Result<(), SinkError> {
        (**self).write_chain(ops)
    }

    fn close(&self) {
        (**self).close()
    }
}

impl<S: GraphSink + ?Sized> GraphSink for Box<S> {
    fn write_chain(&self, ops: &[GraphOp]) -> Result<(), SinkError> {
        (**self).write_chain(ops)
    }

    fn close(&self) {
        (**self).close()
    }
}
