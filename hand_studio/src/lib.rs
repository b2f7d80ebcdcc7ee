//! # hand_studio
//!
//! Interactive front-end for the hand-gesture crates: a hand source feeds
//! landmark batches to the gesture tracker, whose output drives the object
//! canvas, the paddle game, or both at once.  Everything is drawn into a
//! software framebuffer shown in a `minifb` window.
//!
//! ## Data flow
//!
//! | Stage | Runs on | Item |
//! |---|---|---|
//! | Hand source | own thread | [`source::SimHandSource`], [`source::ReplayHandSource`] |
//! | Hand-off | shared | [`hand_gesture::FrameMailbox`] (newest wins) |
//! | Gesture tracking | main loop | [`hand_gesture::GestureTracker`] |
//! | Consumers | main loop | [`hand_canvas::ManipulationController`], [`hand_pong::PaddleGame`] |
//! | Rendering | main loop | [`scene::draw_scene`] → [`framebuffer::Framebuffer`] |
//!
//! ## Controls
//!
//! | Input | Action |
//! |---|---|
//! | Mouse | Move the simulated hand's index finger |
//! | Left button held | Pinch |
//! | `Space` | Start the game |
//! | `R` | Reset game and shapes |
//! | `Tab` | Cycle mode: canvas → paddle → both |
//! | `Q` / `Escape` | Quit |

pub mod error;
pub mod source;
pub mod framebuffer;
pub mod scene;
pub mod visualizer;
pub mod app;

pub use error::StudioError;
