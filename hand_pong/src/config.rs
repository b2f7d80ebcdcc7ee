//! Field geometry and tuning constants.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameConfigError {
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("paddle height {paddle} does not fit a field {field} px tall")]
    PaddleTooTall { paddle: f32, field: f32 },

    #[error("field width {width} leaves no room between the paddles")]
    FieldTooNarrow { width: f32 },

    #[error("ai gain must be in (0, 1], got {0}")]
    AiGain(f32),

    #[error("spin factor must be finite and non-negative, got {0}")]
    Spin(f32),

    #[error("tick interval must be at least 1 ms")]
    ZeroTick,
}

/// Everything the simulation needs to know about the field.
///
/// Positions are in field pixels with the origin at the top-left.  The ball
/// is an axis-aligned square whose position is its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width:   f32,
    pub field_height:  f32,
    pub paddle_width:  f32,
    pub paddle_height: f32,
    /// Gap between a side wall and the outer face of its paddle.
    pub paddle_margin: f32,
    pub ball_size:     f32,
    /// Serve velocity; the x component is the magnitude, its sign is chosen
    /// at serve time.
    pub serve_vx:      f32,
    pub serve_vy:      f32,
    pub spin_factor:   f32,
    pub ai_gain:       f32,
    pub tick_ms:       u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_width:   800.0,
            field_height:  600.0,
            paddle_width:  15.0,
            paddle_height: 100.0,
            paddle_margin: 30.0,
            ball_size:     15.0,
            serve_vx:      5.0,
            serve_vy:      3.0,
            spin_factor:   10.0,
            ai_gain:       0.1,
            tick_ms:       16,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameConfigError> {
        for (name, value) in [
            ("field_width",   self.field_width),
            ("field_height",  self.field_height),
            ("paddle_width",  self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_size",     self.ball_size),
            ("serve_vx",      self.serve_vx),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameConfigError::NonPositive { name, value });
            }
        }
        if !(self.paddle_margin.is_finite() && self.paddle_margin >= 0.0) {
            return Err(GameConfigError::NonPositive { name: "paddle_margin", value: self.paddle_margin });
        }
        if !self.serve_vy.is_finite() {
            return Err(GameConfigError::NonPositive { name: "serve_vy", value: self.serve_vy });
        }
        if self.paddle_height > self.field_height || self.ball_size >= self.field_height {
            return Err(GameConfigError::PaddleTooTall {
                paddle: self.paddle_height,
                field:  self.field_height,
            });
        }
        let occupied = 2.0 * (self.paddle_margin + self.paddle_width) + self.ball_size;
        if occupied >= self.field_width {
            return Err(GameConfigError::FieldTooNarrow { width: self.field_width });
        }
        if !(self.ai_gain > 0.0 && self.ai_gain <= 1.0) {
            return Err(GameConfigError::AiGain(self.ai_gain));
        }
        if !(self.spin_factor.is_finite() && self.spin_factor >= 0.0) {
            return Err(GameConfigError::Spin(self.spin_factor));
        }
        if self.tick_ms == 0 {
            return Err(GameConfigError::ZeroTick);
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Lowest allowed paddle top.
    pub fn paddle_travel(&self) -> f32 {
        self.field_height - self.paddle_height
    }

    /// Left edge of the computer paddle.
    pub fn computer_paddle_x(&self) -> f32 {
        self.field_width - self.paddle_margin - self.paddle_width
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
