//! # hand_gesture
//!
//! Turns raw hand-landmark batches (21 normalized points per hand, as produced
//! by an external hand-pose model) into interaction points on a presentation
//! surface, and tracks a single process-wide pinch state.
//!
//! ## Pipeline
//!
//! | Stage | Type | Output |
//! |---|---|---|
//! | Hand source thread | [`FrameMailbox::publish`] | newest [`HandFrame`] |
//! | Normalizer | [`Normalizer::normalize`] | `Vec<InteractionPoint>` |
//! | Tracker | [`GestureTracker::update`] | [`GestureState`] + points |
//!
//! Coordinates are mirrored horizontally (`x_px = (1 - x) * width`) so a
//! front-facing camera behaves like a mirror.  Pinch classification is done in
//! the normalized space and is therefore resolution independent.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_gesture::{GestureTracker, Landmark, PinchConfig, Surface};
//!
//! let mut tracker = GestureTracker::new(Surface::new(1000.0, 800.0), PinchConfig::default());
//! let mut hand = vec![Landmark::new(0.5, 0.5, 0.0); 21];
//! hand[4] = Landmark::new(0.30, 0.40, 0.0);   // thumb tip
//! hand[8] = Landmark::new(0.25, 0.41, 0.0);   // index tip
//!
//! tracker.update(&[hand]);
//! assert!(tracker.is_pinching());
//! assert_eq!(tracker.latest_points()[0].index_finger.x, 750.0);
//! ```

pub mod landmark;
pub mod normalizer;
pub mod tracker;
pub mod mailbox;
mod error;

pub use error::{GestureError, LandmarkError};
pub use landmark::{
    HandLandmarks, Landmark, Point, Surface,
    LANDMARK_COUNT, WRIST, THUMB_TIP, INDEX_TIP, HAND_SKELETON,
};
pub use normalizer::{InteractionPoint, Normalizer, PinchConfig, DEFAULT_PINCH_THRESHOLD};
pub use tracker::{GestureDebug, GestureState, GestureTracker};
pub use mailbox::{FrameMailbox, HandFrame};
