//! Concurrent set of reported stack texts.
//!
//! Reporting a stack is a two-step protocol:
//!
//! 1. `try_claim` checks the set under the lock. A hit returns `None`; a
//!    miss records the text as in flight and hands back a `ReportClaim`.
//! 2. The caller writes to the sink with the lock released, then calls
//!    `ReportClaim::confirm` on success. Dropping the claim unconfirmed
//!    forgets the text so a later identical report retries.
//!
//! The lock is only held inside these methods, never across the sink write.

use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Per-text progress marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackState {
    /// A claim is outstanding
    InFlight,
    /// Successfully written to the sink
    Reported,
}

/// Set of raw stack texts that have been reported
///
/// **Public** - owned by a `StackReporter`, grows for its whole lifetime
#[derive(Debug, Default)]
pub struct ReportedStacks {
    // Created on first use
    states: Mutex<Option<HashMap<String, StackState>>>,
}

impl ReportedStacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the right to report `stack`
    ///
    /// **Public** - returns `None` if the text is reported or in flight
    pub fn try_claim(&self, stack: &str) -> Option<ReportClaim<'_>> {
        let mut guard = self.states.lock();
        let states = guard.get_or_insert_with(HashMap::new);

        if let Some(state) = states.get(stack) {
            debug!("Stack already {:?}, skipping", state);
            return None;
        }
        states.insert(stack.to_string(), StackState::InFlight);

        Some(ReportClaim {
            owner: self,
            stack: stack.to_string(),
            confirmed: false,
        })
    }

    /// Check-and-mark in one step
    ///
    /// **Public** - true exactly once per distinct text
    pub fn should_report(&self, stack: &str) -> bool {
        self.try_claim(stack).map(ReportClaim::confirm).is_some()
    }

    /// Whether `stack` has been confirmed as reported
    pub fn is_reported(&self, stack: &str) -> bool {
        self.states
            .lock()
            .as_ref()
            .and_then(|states| states.get(stack))
            .is_some_and(|state| *state == StackState::Reported)
    }

    /// Number of confirmed stacks
    pub fn len(&self) -> usize {
        self.states.lock().as_ref().map_or(0, |states| {
            states
                .values()
                .filter(|state| **state == StackState::Reported)
                .count()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn settle(&self, stack: &str, confirmed: bool) {
        let mut guard = self.states.lock();
        let Some(states) = guard.as_mut() else {
            return;
        };

        if confirmed {
            states.insert(stack.to_string(), StackState::Reported);
        } else {
            states.remove(stack);
        }
    }
}

/// Exclusive right to report one stack text
///
/// **Public** - confirm after a successful write; drop to release
#[must_use = "dropping a claim without confirming releases the stack for retry"]
#[derive(Debug)]
pub struct ReportClaim<'a> {
    owner: &'a ReportedStacks,
    stack: String,
    confirmed: bool,
}

impl ReportClaim<'_> {
    /// Mark the stack as reported
    pub fn confirm(mut self) {
        self.owner.settle(&self.stack, true);
        self.confirmed = true;
    }

    /// The raw stack text this claim covers
    pub(crate) fn stack(&self) -> &str {
        &self.stack
    }
}

impl Drop for ReportClaim<'_> {
    fn drop(&mut self) {
        if !self.confirmed {
            debug!("Releasing unconfirmed stack claim");
            self.owner.settle(&self.stack, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_should_report_once() {
        let reported = ReportedStacks::new();

        assert!(reported.should_report("stack-a"));
        assert!(!reported.should_report("stack-a"));
        assert!(reported.should_report("stack-b"));
        assert_eq!(reported.len(), 2);
    }

    #[test]
    fn test_textual_difference_is_new_stack() {
        let reported = ReportedStacks::new();

        assert!(reported.should_report("main.main()\n\t/a.go:1 +0x1f"));
        assert!(reported.should_report("main.main()\n\t/a.go:1 +0x2f"));
        assert!(reported.should_report("main.main()\n\t/a.go:1 +0x2f "));
    }

    #[test]
    fn test_lazy_initialization() {
        let reported = ReportedStacks::new();
        assert!(reported.states.lock().is_none());
        assert!(reported.is_empty());
        assert!(!reported.is_reported("anything"));
        assert!(reported.states.lock().is_none());

        let _ = reported.should_report("anything");
        assert!(reported.states.lock().is_some());
    }

    #[test]
    fn test_in_flight_claim_blocks_duplicates() {
        let reported = ReportedStacks::new();

        let claim = reported.try_claim("stack").expect("first claim");
        assert!(reported.try_claim("stack").is_none());
        assert!(!reported.is_reported("stack"));

        claim.confirm();
        assert!(reported.is_reported("stack"));
        assert!(reported.try_claim("stack").is_none());
    }

    #[test]
    fn test_dropped_claim_allows_retry() {
        let reported = ReportedStacks::new();

        {
            let claim = reported.try_claim("stack").expect("first claim");
            assert_eq!(claim.stack(), "stack");
        }

        assert!(!reported.is_reported("stack"));
        assert!(reported.try_claim("stack").is_some());
    }

    #[test]
    fn test_concurrent_claims_single_winner() {
        let reported = Arc::new(ReportedStacks::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reported = Arc::clone(&reported);
                thread::spawn(move || reported.should_report("shared"))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(reported.len(), 1);
    }

    #[test]
    fn test_concurrent_distinct_stacks_no_lost_updates() {
        let reported = Arc::new(ReportedStacks::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let reported = Arc::clone(&reported);
                thread::spawn(move || reported.should_report(&format!("stack-{}", i)))
            })
            .collect();

        assert!(handles.into_iter().all(|h| h.join().unwrap()));
        assert_eq!(reported.len(), 16);
    }
}
