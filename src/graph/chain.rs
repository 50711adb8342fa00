//! Build caller-to-callee write chains from parsed frames.
//!
//! Stacks are captured innermost call first, so the chain walks the frames
//! in reverse: the outermost caller is written first and every following
//! frame is linked from the one before it.
//!
//! Example: captured `[C, B, A]` yields
//! `node A, node B, edge A->B, node C, edge B->C`.

use super::{EdgeUpsert, GraphOp, NodeKey, NodeUpsert};
use crate::parser::StackFrame;
use log::debug;

/// Build the ordered write operations for one stack
///
/// **Public** - main entry point for chain building
///
/// # Arguments
/// * `frames` - Parsed frames, innermost call first
///
/// # Returns
/// Node and edge upserts in outermost-to-innermost order
pub fn build_chain(frames: &[StackFrame]) -> Vec<GraphOp> {
    let mut ops = Vec::with_capacity(frames.len() * 2);
    let mut previous: Option<NodeKey> = None;

    for frame in frames.iter().rev() {
        let node = NodeUpsert::from_frame(frame);
        let current = node.key.clone();
        ops.push(GraphOp::UpsertNode(node));

        if let Some(caller) = previous.take() {
            ops.push(GraphOp::UpsertEdge(EdgeUpsert {
                caller,
                callee: current.clone(),
            }));
        }

        previous = Some(current);
    }

    debug!("Built chain of {} operations from {} frames", ops.len(), frames.len());
    ops
}
