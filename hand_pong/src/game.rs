//! `PaddleGame`: owns a [`GameState`] and feeds it hand positions.

use hand_gesture::{InteractionPoint, Surface};
use serde::Serialize;

use crate::config::{GameConfig, GameConfigError};
use crate::state::{GameState, Score, Side, TickInput, TickReport, Vec2};

/// Everything a renderer needs for one frame of the game.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub ball:          Vec2,
    pub ball_size:     f32,
    pub player_y:      f32,
    pub computer_y:    f32,
    pub player_x:      f32,
    pub computer_x:    f32,
    pub paddle_width:  f32,
    pub paddle_height: f32,
    pub field_width:   f32,
    pub field_height:  f32,
    pub score:         Score,
    pub running:       bool,
}

#[derive(Debug)]
pub struct PaddleGame {
    config:  GameConfig,
    state:   GameState,
    hand_y:  Option<f32>,
    running: bool,
    ticks:   u64,
}

impl PaddleGame {
    pub fn new(config: GameConfig) -> Result<Self, GameConfigError> {
        config.validate()?;
        Ok(PaddleGame {
            state:   GameState::initial(&config),
            config,
            hand_y:  None,
            running: false,
            ticks:   0,
        })
    }

    pub fn start(&mut self) {
        if !self.running {
            tracing::info!(score = ?self.state.score, "game started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Zero the score, re-centre everything and stop.  The last known hand
    /// position is kept.
    pub fn reset(&mut self) {
        tracing::info!("game reset");
        self.state = GameState::initial(&self.config);
        self.running = false;
        self.ticks = 0;
    }

    pub fn is_running(&self) -> bool { self.running }
    pub fn state(&self) -> &GameState { &self.state }
    pub fn config(&self) -> &GameConfig { &self.config }
    pub fn ticks(&self) -> u64 { self.ticks }
    pub fn hand_y(&self) -> Option<f32> { self.hand_y }

    /// Set the hand height directly, in field pixels.
    pub fn set_hand_y(&mut self, y: f32) {
        if y.is_finite() {
            self.hand_y = Some(y);
        }
    }

    /// Take the wrist height of the lowest-index hand, rescaled from
    /// `surface` to the field.  With no hands the previous value is kept.
    pub fn observe(&mut self, points: &[InteractionPoint], surface: Surface) {
        let Some(hand) = points.iter().min_by_key(|p| p.hand_index) else {
            return;
        };
        if surface.height > 0.0 {
            self.set_hand_y(hand.wrist.y / surface.height * self.config.field_height);
        }
    }

    /// One tick, if running.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.running {
            return None;
        }
        let input = TickInput { hand_y: self.hand_y };
        let (next, report) = self.state.step(&input, &self.config);
        self.state = next;
        self.ticks += 1;
        if let Some(side) = report.scored {
            let Score { player, computer } = self.state.score;
            match side {
                Side::Player   => tracing::info!(player, computer, "player scores"),
                Side::Computer => tracing::info!(player, computer, "computer scores"),
            }
        }
        Some(report)
    }

    /// Run up to `ticks` ticks and return the reports of those that ran.
    pub fn advance(&mut self, ticks: u32) -> Vec<TickReport> {
        (0..ticks).map_while(|_| self.tick()).collect()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let c = &self.config;
        GameSnapshot {
            ball:          self.state.ball,
            ball_size:     c.ball_size,
            player_y:      self.state.player_y,
            computer_y:    self.state.computer_y,
            player_x:      c.paddle_margin,
            computer_x:    c.computer_paddle_x(),
            paddle_width:  c.paddle_width,
            paddle_height: c.paddle_height,
            field_width:   c.field_width,
            field_height:  c.field_height,
            score:         self.state.score,
            running:       self.running,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
