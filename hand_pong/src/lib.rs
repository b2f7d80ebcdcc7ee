//! # hand_pong
//!
//! A paddle game where the left paddle follows the player's hand and the
//! right paddle chases the ball with a proportional controller.
//!
//! The simulation advances on a fixed tick, independent of how often hand
//! frames arrive; the paddle uses whatever hand height was seen last.
//!
//! | Item | Role |
//! |---|---|
//! | [`GameState::step`] | pure tick: `(state, input) → (state, report)` |
//! | [`PaddleGame`] | owns the state, start/reset, hand observation |
//! | [`FixedTicker`] | wall-clock → whole ticks, bounded catch-up |
//! | [`GameConfig`] | field geometry and tuning |
//!
//! ```rust
//! use hand_pong::{GameConfig, PaddleGame};
//!
//! let mut game = PaddleGame::new(GameConfig::default()).unwrap();
//! game.start();
//! game.advance(3);
//! let snap = game.snapshot();
//! assert_eq!((snap.ball.x, snap.ball.y), (415.0, 309.0));
//! ```

pub mod config;
pub mod state;
pub mod physics;
pub mod game;
pub mod clock;

pub use config::{GameConfig, GameConfigError};
pub use state::{GameState, Score, Side, TickInput, TickReport, Vec2};
pub use game::{GameSnapshot, PaddleGame};
pub use clock::FixedTicker;
