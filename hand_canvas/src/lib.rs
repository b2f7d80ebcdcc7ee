//! # hand_canvas
//!
//! A free-form canvas of shapes that can be picked up with a pinch, carried
//! with the index finger, and dropped by opening the hand.
//!
//! The [`ManipulationController`] is a two-state machine:
//!
//! | From | Condition | To |
//! |---|---|---|
//! | `Idle` | pinch, finger within `size` px of a shape's centre | `Dragging(id)` |
//! | `Dragging(id)` | gesture back to open | `Idle` |
//!
//! Only one shape can be held at a time.  While held, the shape's centre is
//! set to the finger position every frame, with no smoothing.
//!
//! ```rust
//! use hand_canvas::{ManipulationController, seed_objects};
//! use hand_gesture::{InteractionPoint, Point};
//!
//! let mut canvas = ManipulationController::new(seed_objects());
//! let finger = InteractionPoint {
//!     hand_index: 0,
//!     index_finger: Point::new(210.0, 190.0),
//!     thumb: Point::new(215.0, 195.0),
//!     wrist: Point::new(260.0, 320.0),
//!     is_pinching: true,
//!     pinch_distance: 0.02,
//! };
//! let snaps = canvas.update(&[finger], true);
//! assert!(snaps.iter().any(|s| s.id == 1 && s.dragging));
//! ```

pub mod shape;
pub mod object;
pub mod controller;

pub use shape::{Color, ColorError, Shape};
pub use object::{ManipulableObject, ObjectError, ObjectSnapshot, seed_objects};
pub use controller::{DragState, ManipulationController};
