//! Search action state: one cycle at a time, plus the delayed first run.

use std::time::Duration;

use crate::error::{Error, Result};

/// Whether a search cycle is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
}

/// Tracks the `Idle -> Searching -> Idle` cycle of the search action.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    state: SearchState,
    completed: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Searching`.
    ///
    /// A trigger while a cycle is in flight is rejected with
    /// [`Error::SearchInProgress`]; it is neither queued nor does it cancel
    /// the running cycle.
    pub fn begin(&mut self) -> Result<()> {
        if self.state == SearchState::Searching {
            return Err(Error::SearchInProgress);
        }
        self.state = SearchState::Searching;
        Ok(())
    }

    /// Return to `Idle` after a cycle, successful or not.
    pub fn finish(&mut self) {
        if self.state == SearchState::Searching {
            self.completed += 1;
        }
        self.state = SearchState::Idle;
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn is_searching(&self) -> bool {
        self.state == SearchState::Searching
    }

    /// Number of cycles that have finished.
    pub fn completed_cycles(&self) -> u64 {
        self.completed
    }
}

/// Fires the search action exactly once, `delay` after the view is ready.
#[derive(Debug, Clone)]
pub struct AutoSearch {
    delay: Duration,
    fired: bool,
}

impl AutoSearch {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    pub fn new(delay: Duration) -> Self {
        Self { delay, fired: false }
    }

    /// Returns `true` the first time `elapsed` reaches the delay.
    pub fn poll(&mut self, elapsed: Duration) -> bool {
        if self.fired || elapsed < self.delay {
            return false;
        }
        self.fired = true;
        true
    }

    /// Time left before the trigger, `None` once it has fired.
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        if self.fired {
            None
        } else {
            Some(self.delay.saturating_sub(elapsed))
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

impl Default for AutoSearch {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}
