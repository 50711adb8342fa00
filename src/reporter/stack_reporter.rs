//! The reporting handle.
//!
//! Flow for one report:
//! 1. Claim the raw text in the dedup cache (skip if already claimed)
//! 2. Parse the text into frames
//! 3. Build the caller-to-callee chain
//! 4. Write the chain to the sink as one transaction
//! 5. Confirm the claim, or release it on failure so the stack can retry

use super::source::StackSource;
use crate::cache::ReportedStacks;
use crate::graph::{build_chain, GraphSink};
use crate::parser::parse_stack_trace;
use crate::utils::error::ReportError;
use log::{debug, error, info, warn};

/// Result of a successful report call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The chain was written to the sink
    Reported { frames: usize, operations: usize },
    /// The identical text was already reported or is being reported
    Duplicate,
}

/// Reports stacks to a graph sink, skipping texts seen before
pub struct StackReporter {
    sink: Box<dyn GraphSink>,
    reported: ReportedStacks,
}

impl StackReporter {
    pub fn new(sink: impl GraphSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            reported: ReportedStacks::new(),
        }
    }

    /// Report a raw stack text
    ///
    /// **Public** - main reporting entry point, safe to call from many threads
    ///
    /// # Arguments
    /// * `stack` - Raw stack text, innermost call first
    ///
    /// # Returns
    /// `Reported` with frame and operation counts, or `Duplicate`
    ///
    /// # Errors
    /// * `ReportError::Sink` - the sink rejected or failed the chain; the
    ///   text stays eligible for a later retry
    pub fn report(&self, stack: &str) -> Result<ReportOutcome, ReportError> {
        let Some(claim) = self.reported.try_claim(stack) else {
            debug!("Skipping previously reported stack");
            return Ok(ReportOutcome::Duplicate);
        };
        debug!("Claimed stack of {} bytes", claim.stack().len());

        let frames = parse_stack_trace(stack);
        let ops = build_chain(&frames);

        if ops.is_empty() {
            warn!("Stack text contained no recognizable frames");
        } else if let Err(e) = self.sink.write_chain(&ops) {
            error!("Error reporting stack trace to graph: {}", e);
            return Err(e.into());
        }

        claim.confirm();
        info!("Reported stack of {} frames ({} operations)", frames.len(), ops.len());

        Ok(ReportOutcome::Reported {
            frames: frames.len(),
            operations: ops.len(),
        })
    }

    /// Capture a stack from `source` and report it
    pub fn report_from(&self, source: &dyn StackSource) -> Result<ReportOutcome, ReportError> {
        self.report(&source.capture())
    }

    /// The dedup cache backing this reporter
    pub fn reported(&self) -> &ReportedStacks {
        &self.reported
    }

    /// Close the sink and drop the reporter
    pub fn close(self) {
        info!("Closing stack reporter ({} stacks reported)", self.reported.len());
        self.sink.close();
    }
}
