//! Process-wide gesture state.
//!
//! [`GestureTracker`] is recomputed synchronously from each landmark batch.
//! Consumers read [`GestureTracker::latest_points`] and
//! [`GestureTracker::is_pinching`] after `update` returns, so they never see a
//! half-updated state.

use serde::Serialize;

use crate::landmark::{Landmark, Point, Surface};
use crate::normalizer::{InteractionPoint, Normalizer, PinchConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureState {
    #[default]
    Open,
    Pinch,
}

impl GestureState {
    pub fn is_pinch(self) -> bool {
        self == GestureState::Pinch
    }
}

/// Readout for the first tracked hand, kept for on-screen diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GestureDebug {
    pub thumb:        Point,
    pub index_finger: Point,
    pub distance:     f32,
    pub is_pinching:  bool,
}

// ════════════════════════════════════════════════════════════════════════════
// GestureTracker
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct GestureTracker {
    normalizer: Normalizer,
    points:     Vec<InteractionPoint>,
    state:      GestureState,
    /// Consecutive open frames seen while still reporting `Pinch`.
    open_streak: u32,
    debug:      Option<GestureDebug>,
}

impl GestureTracker {
    pub fn new(surface: Surface, pinch: PinchConfig) -> Self {
        GestureTracker {
            normalizer:  Normalizer::new(surface, pinch),
            points:      Vec::new(),
            state:       GestureState::Open,
            open_streak: 0,
            debug:       None,
        }
    }

    /// Replace the tracked state with one derived from `hands`.
    ///
    /// A batch with no valid hand clears the points but leaves the gesture
    /// state as it was: losing the hand is not the same as opening it.
    pub fn update<H: AsRef<[Landmark]>>(&mut self, hands: &[H]) -> GestureState {
        self.points = self.normalizer.normalize(hands);
        if self.points.is_empty() {
            tracing::trace!("no valid hands in batch; holding {:?}", self.state);
            return self.state;
        }

        if let Some(first) = self.points.first() {
            self.debug = Some(GestureDebug {
                thumb:        first.thumb,
                index_finger: first.index_finger,
                distance:     first.pinch_distance,
                is_pinching:  first.is_pinching,
            });
            tracing::trace!(distance = first.pinch_distance, pinching = first.is_pinching, "pinch check");
        }

        let any_pinch = self.points.iter().any(|p| p.is_pinching);
        let next = if any_pinch {
            self.open_streak = 0;
            GestureState::Pinch
        } else if self.state.is_pinch() {
            self.open_streak += 1;
            if self.open_streak > self.normalizer.pinch().release_frames {
                GestureState::Open
            } else {
                GestureState::Pinch
            }
        } else {
            GestureState::Open
        };

        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "gesture state changed");
            self.open_streak = 0;
        }
        self.state = next;
        self.state
    }

    pub fn latest_points(&self) -> &[InteractionPoint] { &self.points }
    pub fn state(&self) -> GestureState { self.state }
    pub fn is_pinching(&self) -> bool { self.state.is_pinch() }
    pub fn debug_info(&self) -> Option<GestureDebug> { self.debug }
    pub fn surface(&self) -> Surface { self.normalizer.surface() }

    pub fn resize(&mut self, surface: Surface) {
        self.normalizer.resize(surface);
    }

    /// Forget everything; the next state is `Open` with no points.
    pub fn reset(&mut self) {
        self.points.clear();
        self.state = GestureState::Open;
        self.open_streak = 0;
        self.debug = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
