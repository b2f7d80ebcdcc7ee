//! Plain game-state values.  Nothing here mutates itself; see `physics` for
//! the tick function.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Computer,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player:   u32,
    pub computer: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player   => self.player += 1,
            Side::Computer => self.computer += 1,
        }
    }
}

/// Ball, paddles and score after some number of ticks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Top-left corner of the ball.
    pub ball:       Vec2,
    pub velocity:   Vec2,
    /// Top edge of each paddle.
    pub player_y:   f32,
    pub computer_y: f32,
    pub score:      Score,
}

impl GameState {
    /// Ball at the field centre served toward the computer, paddles centred.
    pub fn initial(cfg: &GameConfig) -> Self {
        let mid = cfg.paddle_travel() / 2.0;
        GameState {
            ball:       GameState::centre(cfg),
            velocity:   Vec2::new(cfg.serve_vx, cfg.serve_vy),
            player_y:   mid,
            computer_y: mid,
            score:      Score::default(),
        }
    }

    pub(crate) fn centre(cfg: &GameConfig) -> Vec2 {
        Vec2::new(cfg.field_width / 2.0, cfg.field_height / 2.0)
    }
}

/// What the outside world feeds into one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    /// Last known hand height in field pixels, or `None` if no hand has been
    /// seen yet.
    pub hand_y: Option<f32>,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub wall_bounce:  bool,
    pub player_hit:   bool,
    pub computer_hit: bool,
    pub scored:       Option<Side>,
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
