//! Landmark → interaction point conversion and pinch classification.
//!
//! The normalizer is a pure transform: it never fails and never keeps state.
//! Hands that do not have exactly 21 finite landmarks are dropped from the
//! output (logged at `trace` level) instead of being reported as errors.

use serde::{Deserialize, Serialize};

use crate::error::GestureError;
use crate::landmark::{HandLandmarks, Landmark, Point, Surface};

/// Thumb-tip/index-tip distance (normalized units) below which a hand pinches.
pub const DEFAULT_PINCH_THRESHOLD: f32 = 0.15;

// ════════════════════════════════════════════════════════════════════════════
// PinchConfig
// ════════════════════════════════════════════════════════════════════════════

/// Tuning for pinch classification.
///
/// `threshold` is an empirically tuned value, not a property of hand geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    /// A hand pinches iff its thumb/index distance is strictly below this.
    pub threshold:     f32,
    /// Consecutive open frames required before the tracker reports `Open`
    /// again.  `0` releases on the first open frame.
    pub release_frames: u32,
}

impl Default for PinchConfig {
    fn default() -> Self {
        PinchConfig {
            threshold:      DEFAULT_PINCH_THRESHOLD,
            release_frames: 0,
        }
    }
}

impl PinchConfig {
    pub fn validate(&self) -> Result<(), GestureError> {
        if self.threshold.is_finite() && self.threshold > 0.0 {
            Ok(())
        } else {
            Err(GestureError::InvalidThreshold(self.threshold))
        }
    }

    pub fn is_pinch(&self, distance: f32) -> bool {
        distance < self.threshold
    }
}

// ════════════════════════════════════════════════════════════════════════════
// InteractionPoint
// ════════════════════════════════════════════════════════════════════════════

/// Per-hand interaction data for one frame, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InteractionPoint {
    /// Position of the hand in the incoming batch.
    pub hand_index:     usize,
    pub index_finger:   Point,
    pub thumb:          Point,
    pub wrist:          Point,
    pub is_pinching:    bool,
    /// Normalized thumb/index distance the pinch flag was derived from.
    pub pinch_distance: f32,
}

// ════════════════════════════════════════════════════════════════════════════
// Normalizer
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug)]
pub struct Normalizer {
    surface: Surface,
    pinch:   PinchConfig,
}

impl Normalizer {
    pub fn new(surface: Surface, pinch: PinchConfig) -> Self {
        Normalizer { surface, pinch }
    }

    pub fn surface(&self) -> Surface { self.surface }
    pub fn pinch(&self) -> PinchConfig { self.pinch }

    /// Adopt a new surface size, e.g. when the capture frame size changes.
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
    }

    /// Convert one batch of raw hands into interaction points.
    ///
    /// The output keeps input order; `hand_index` is the index in `hands`, so
    /// a rejected first hand leaves a gap rather than renumbering.
    pub fn normalize<H: AsRef<[Landmark]>>(&self, hands: &[H]) -> Vec<InteractionPoint> {
        hands
            .iter()
            .enumerate()
            .filter_map(|(hand_index, raw)| {
                match HandLandmarks::try_from(raw.as_ref()) {
                    Ok(hand) => Some(self.point_for(hand_index, &hand)),
                    Err(e) => {
                        tracing::trace!(hand_index, error = %e, "dropping malformed hand");
                        None
                    }
                }
            })
            .collect()
    }

    fn point_for(&self, hand_index: usize, hand: &HandLandmarks) -> InteractionPoint {
        let distance = pinch_distance(hand);
        InteractionPoint {
            hand_index,
            index_finger:   self.surface.project(hand.index_tip()),
            thumb:          self.surface.project(hand.thumb_tip()),
            wrist:          self.surface.project(hand.wrist()),
            is_pinching:    self.pinch.is_pinch(distance),
            pinch_distance: distance,
        }
    }
}

/// Thumb-tip to index-tip distance in normalized (pre-mirror) space.
pub fn pinch_distance(hand: &HandLandmarks) -> f32 {
    hand.thumb_tip().planar_distance(&hand.index_tip())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
