//! Wall-clock to fixed-tick conversion.

use std::time::Duration;

/// Most ticks a single `advance` call will hand out.
pub const DEFAULT_MAX_CATCH_UP: u32 = 5;

/// Accumulates elapsed time and releases it as whole ticks.
///
/// When the caller stalls for longer than `max_catch_up` ticks the backlog is
/// dropped instead of replayed, so a long pause never turns into a burst of
/// simulation.
#[derive(Clone, Debug)]
pub struct FixedTicker {
    step:         Duration,
    accumulated:  Duration,
    max_catch_up: u32,
}

impl FixedTicker {
    pub fn new(step: Duration) -> Self {
        FixedTicker {
            step:         step.max(Duration::from_millis(1)),
            accumulated:  Duration::ZERO,
            max_catch_up: DEFAULT_MAX_CATCH_UP,
        }
    }

    pub fn with_max_catch_up(mut self, max: u32) -> Self {
        self.max_catch_up = max.max(1);
        self
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add `elapsed` and return how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let due = self.accumulated.as_nanos() / self.step.as_nanos();
        if due > u128::from(self.max_catch_up) {
            tracing::debug!(due, cap = self.max_catch_up, "tick backlog dropped");
            self.accumulated = Duration::ZERO;
            return self.max_catch_up;
        }
        // `due` fits: it is at most max_catch_up.
        let due = due as u32;
        self.accumulated -= self.step * due;
        due
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
