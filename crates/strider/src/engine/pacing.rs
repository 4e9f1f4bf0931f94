// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Adaptive wait budget for the transport poll.
//!
//! The engine's `process` call reports how much of the requested window
//! it consumed. A report strictly below the remaining budget means a
//! protocol timer fired early and the rest of the window is still owed;
//! a report of the full window (or more) means nothing happened and the
//! budget re-arms to the base interval. This keeps retransmission timers
//! prompt while idle waits still yield the processor, and keeps periodic
//! housekeeping on a stable period.

use std::time::Duration;

/// Remaining-wait accounting for the next poll.
#[derive(Debug, Clone)]
pub struct WaitBudget {
    base: Duration,
    remaining: Duration,
}

impl WaitBudget {
    /// Create a budget with `base` as the full window.
    #[must_use]
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            remaining: base,
        }
    }

    /// Wait window for the next poll.
    #[must_use]
    pub fn current(&self) -> Duration {
        self.remaining
    }

    /// The fixed base interval.
    #[must_use]
    pub fn base(&self) -> Duration {
        self.base
    }

    /// Account for a poll that consumed `elapsed`.
    pub fn consume(&mut self, elapsed: Duration) {
        if elapsed >= self.remaining {
            self.remaining = self.base;
        } else {
            self.remaining -= elapsed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Duration = Duration::from_secs(2);

    #[test]
    fn test_early_fire_subtracts_exactly() {
        let mut budget = WaitBudget::new(BASE);
        budget.consume(Duration::from_millis(500));
        assert_eq!(budget.current(), Duration::from_millis(1500));
    }

    #[test]
    fn test_zero_elapsed_leaves_budget_unchanged() {
        let mut budget = WaitBudget::new(BASE);
        budget.consume(Duration::ZERO);
        assert_eq!(budget.current(), BASE);
    }

    #[test]
    fn test_full_window_rearms_to_base() {
        let mut budget = WaitBudget::new(BASE);
        budget.consume(BASE);
        assert_eq!(budget.current(), BASE);
    }

    #[test]
    fn test_overrun_rearms_to_base() {
        let mut budget = WaitBudget::new(BASE);
        budget.consume(Duration::from_secs(5));
        assert_eq!(budget.current(), BASE);
    }

    #[test]
    fn test_successive_early_fires_drain_then_rearm() {
        let mut budget = WaitBudget::new(BASE);
        budget.consume(Duration::from_millis(500));
        budget.consume(Duration::from_millis(700));
        assert_eq!(budget.current(), Duration::from_millis(800));

        // Consuming the whole remainder re-arms the full base window.
        budget.consume(Duration::from_millis(800));
        assert_eq!(budget.current(), BASE);
    }
}
