//! In-memory graph sink with merge semantics.
//!
//! Used for dry runs and tests. A chain is validated before anything is
//! applied, so a rejected chain leaves the graph untouched.

use super::{EdgeUpsert, GraphOp, GraphSink, NodeKey};
use crate::utils::error::SinkError;
use log::debug;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Default)]
struct GraphState {
    nodes: BTreeMap<NodeKey, BTreeMap<String, String>>,
    edges: HashSet<EdgeUpsert>,
    transactions: usize,
}

/// Thread-safe in-memory call graph
#[derive(Debug, Default)]
pub struct MemoryGraph {
    state: Mutex<GraphState>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.state.lock().nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.state.lock().edges.len()
    }

    /// Number of chains committed
    pub fn transaction_count(&self) -> usize {
        self.state.lock().transactions
    }

    /// Properties of a node, if it exists
    pub fn node(&self, key: &NodeKey) -> Option<BTreeMap<String, String>> {
        self.state.lock().nodes.get(key).cloned()
    }

    pub fn has_edge(&self, caller: &NodeKey, callee: &NodeKey) -> bool {
        self.state.lock().edges.contains(&EdgeUpsert {
            caller: caller.clone(),
            callee: callee.clone(),
        })
    }
}

impl GraphSink for MemoryGraph {
    fn write_chain(&self, ops: &[GraphOp]) -> Result<(), SinkError> {
        let mut state = self.state.lock();

        // Edges may only reference nodes that exist or are created earlier in the chain
        let mut known: HashSet<&NodeKey> = HashSet::new();
        for op in ops {
            match op {
                GraphOp::UpsertNode(node) => {
                    known.insert(&node.key);
                }
                GraphOp::UpsertEdge(edge) => {
                    for end in [&edge.caller, &edge.callee] {
                        if !known.contains(end) && !state.nodes.contains_key(end) {
                            return Err(SinkError::Rejected {
                                code: "MemoryGraph.MissingNode".to_string(),
                                message: format!("no node {}.{}", end.package, end.name),
                            });
                        }
                    }
                }
            }
        }

        for op in ops {
            match op {
                GraphOp::UpsertNode(node) => {
                    state
                        .nodes
                        .entry(node.key.clone())
                        .or_default()
                        .extend(node.properties.clone());
                }
                GraphOp::UpsertEdge(edge) => {
                    state.edges.insert(edge.clone());
                }
            }
        }
        state.transactions += 1;

        debug!(
            "Memory graph now holds {} nodes and {} edges",
            state.nodes.len(),
            state.edges.len()
        );
        Ok(())
    }
}
