// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide step counter.
//!
//! The dispatch loop ticks the counter exactly once per iteration; the
//! derived `shoe/steps` resource reads and resets it. Atomics make the
//! loop/handler sharing explicit even though both currently run on the
//! same worker.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic step counter shared between the dispatch loop and the
/// counter resource handler.
#[derive(Debug, Default)]
pub struct StepCounter {
    steps: AtomicU64,
}

impl StepCounter {
    /// Create a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by one. Called once per dispatch-loop iteration.
    pub fn tick(&self) {
        self.steps.fetch_add(1, Ordering::Relaxed);
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.steps.load(Ordering::Relaxed)
    }

    /// Reset to zero. Driven by DELETE on the counter resource.
    pub fn reset(&self) {
        self.steps.store(0, Ordering::Relaxed);
    }
}
