//! Bounded, lock-guarded call history

use super::entity::{Call, CurrentState};
use super::request::ValidatedCall;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Default number of calls kept (one current plus three history entries)
pub const DEFAULT_MAX_CALLS: usize = 4;

/// Owns the most-recent-first call history
///
/// Every read and write goes through the same mutex, so readers observe
/// either the state before an insert or after its truncation, never between.
#[derive(Debug)]
pub struct CallHistoryStore {
    calls: Mutex<VecDeque<Call>>,
    max_calls: usize,
}

impl CallHistoryStore {
    /// Create an empty store; a capacity of zero is raised to one
    pub fn new(max_calls: usize) -> Self {
        let max_calls = max_calls.max(1);
        Self {
            calls: Mutex::new(VecDeque::with_capacity(max_calls + 1)),
            max_calls,
        }
    }

    /// Record a call at the front, evicting the oldest beyond capacity
    pub fn add_call(&self, call: ValidatedCall) -> Call {
        let mut calls = self.lock();

        let call = Call::new(call.number, call.counter, Utc::now());
        calls.push_front(call.clone());
        calls.truncate(self.max_calls);

        debug!(
            "Recorded call {} -> {} ({} in history)",
            call.number(),
            call.counter(),
            calls.len()
        );

        call
    }

    /// Copy of the history split into current + older calls
    pub fn current_state(&self) -> CurrentState {
        let calls = self.lock();
        CurrentState::from_calls(calls.iter().cloned())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_calls
    }

    // Insert and truncate run under one guard, so a poisoned lock still
    // protects a consistent list.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Call>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CallHistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CALLS)
    }
}
