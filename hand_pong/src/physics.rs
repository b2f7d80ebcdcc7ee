//! The tick function.
//!
//! Order within a tick:
//!
//! 1. player paddle follows the hand (if one has ever been seen)
//! 2. ball moves by its velocity
//! 3. top/bottom walls
//! 4. player paddle, with spin
//! 5. computer paddle
//! 6. computer paddle AI
//! 7. scoring and re-serve

use crate::config::GameConfig;
use crate::state::{GameState, Side, TickInput, TickReport, Vec2};

impl GameState {
    /// Advance one tick.  `self` is left untouched.
    pub fn step(&self, input: &TickInput, cfg: &GameConfig) -> (GameState, TickReport) {
        let mut s = *self;
        let mut report = TickReport::default();

        if let Some(hand_y) = input.hand_y {
            s.player_y = clamp_paddle(hand_y - cfg.paddle_height / 2.0, cfg);
        }

        s.ball += s.velocity;

        let vy = wall_response(s.ball.y, s.velocity.y, cfg);
        report.wall_bounce = vy != s.velocity.y;
        s.velocity.y = vy;

        let ph = cfg.paddle_height;
        let in_span = |top: f32, y: f32| y >= top && y <= top + ph;

        let player_face = cfg.paddle_margin + cfg.paddle_width;
        if s.ball.x > cfg.paddle_margin
            && s.ball.x <= player_face
            && in_span(s.player_y, s.ball.y)
            && s.velocity.x <= 0.0
        {
            let hit_offset = (s.ball.y - s.player_y) / ph;
            s.velocity.x = reflect(s.velocity.x, 1.0, cfg);
            s.velocity.y = (hit_offset - 0.5) * cfg.spin_factor;
            report.player_hit = true;
        }

        let computer_x = cfg.computer_paddle_x();
        if s.ball.x >= computer_x - cfg.ball_size
            && s.ball.x < computer_x + cfg.paddle_width - cfg.ball_size
            && in_span(s.computer_y, s.ball.y)
            && s.velocity.x >= 0.0
        {
            s.velocity.x = reflect(s.velocity.x, -1.0, cfg);
            report.computer_hit = true;
        }

        let target = s.ball.y - ph / 2.0;
        s.computer_y = clamp_paddle(s.computer_y + (target - s.computer_y) * cfg.ai_gain, cfg);

        let conceded = if s.ball.x < 0.0 {
            Some(Side::Computer)
        } else if s.ball.x > cfg.field_width {
            Some(Side::Player)
        } else {
            None
        };
        if let Some(side) = conceded {
            s.score.award(side);
            s.ball = GameState::centre(cfg);
            s.velocity = serve_velocity(side, cfg);
            report.scored = Some(side);
        }

        (s, report)
    }
}

pub fn clamp_paddle(top: f32, cfg: &GameConfig) -> f32 {
    top.clamp(0.0, cfg.paddle_travel())
}

/// Vertical velocity after the wall check.  The sign is forced rather than
/// flipped so a ball sitting past a bound cannot oscillate.
pub fn wall_response(y: f32, vy: f32, cfg: &GameConfig) -> f32 {
    if y <= 0.0 {
        vy.abs()
    } else if y >= cfg.field_height - cfg.ball_size {
        -vy.abs()
    } else {
        vy
    }
}

/// Horizontal velocity pointing along `sign`, same magnitude, never zero.
fn reflect(vx: f32, sign: f32, cfg: &GameConfig) -> f32 {
    let magnitude = if vx == 0.0 { cfg.serve_vx } else { vx.abs() };
    sign * magnitude
}

/// The ball is served toward the side that just scored.
fn serve_velocity(scorer: Side, cfg: &GameConfig) -> Vec2 {
    match scorer {
        Side::Computer => Vec2::new(-cfg.serve_vx, cfg.serve_vy),
        Side::Player   => Vec2::new(cfg.serve_vx, cfg.serve_vy),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Score;

    fn cfg() -> GameConfig {
        GameConfig::default()
    }

    fn with_ball(x: f32, y: f32, vx: f32, vy: f32) -> GameState {
        GameState {
            ball: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            ..GameState::initial(&cfg())
        }
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn free_flight_moves_by_velocity() {
        let (s, r) = GameState::initial(&cfg()).step(&idle(), &cfg());
        assert_eq!(s.ball, Vec2::new(405.0, 303.0));
        assert_eq!(r, TickReport::default());
    }

    #[test]
    fn step_leaves_input_state_alone() {
        let before = GameState::initial(&cfg());
        let copy = before;
        let _ = before.step(&idle(), &cfg());
        assert_eq!(before, copy);
    }

    #[test]
    fn bottom_wall_flips_vy() {
        let (s, r) = with_ball(400.0, 584.0, 5.0, 3.0).step(&idle(), &cfg());
        assert!(r.wall_bounce);
        assert_eq!(s.velocity, Vec2::new(5.0, -3.0));
        assert_eq!(s.ball.x, 405.0);
        assert_eq!(s.ball.y, 587.0);
    }

    #[test]
    fn top_wall_flips_vy() {
        let (s, r) = with_ball(400.0, 2.0, -5.0, -4.0).step(&idle(), &cfg());
        assert!(r.wall_bounce);
        assert_eq!(s.velocity.y, 4.0);
    }

    #[test]
    fn ball_past_wall_does_not_oscillate() {
        // Already below the bound and heading back up: leave it alone.
        let (s, r) = with_ball(400.0, 595.0, 5.0, -3.0).step(&idle(), &cfg());
        assert!(!r.wall_bounce);
        assert_eq!(s.velocity.y, -3.0);
    }

    #[test]
    fn walls_preserve_vertical_speed() {
        for vy in [0.5_f32, 3.0, 4.75, 12.0] {
            let (s, _) = with_ball(400.0, 599.0, 5.0, vy).step(&idle(), &cfg());
            assert_eq!(s.velocity.y.abs(), vy);
            let (s, _) = with_ball(400.0, 1.0, 5.0, -vy).step(&idle(), &cfg());
            assert_eq!(s.velocity.y.abs(), vy);
        }
    }

    #[test]
    fn left_exit_scores_for_computer() {
        let (s, r) = with_ball(2.0, 300.0, -5.0, 3.0).step(&idle(), &cfg());
        assert_eq!(r.scored, Some(Side::Computer));
        assert_eq!(s.score, Score { player: 0, computer: 1 });
        assert_eq!(s.ball, Vec2::new(400.0, 300.0));
        assert_eq!(s.velocity, Vec2::new(-5.0, 3.0));
    }

    #[test]
    fn right_exit_scores_for_player() {
        let (s, r) = with_ball(798.0, 100.0, 5.0, -2.0).step(&idle(), &cfg());
        assert_eq!(r.scored, Some(Side::Player));
        assert_eq!(s.score, Score { player: 1, computer: 0 });
        assert_eq!(s.velocity, Vec2::new(5.0, 3.0));
    }

    #[test]
    fn centre_hit_has_no_spin() {
        // Paddle top at 250 → centre at 300.
        let (s, r) = with_ball(50.0, 300.0, -5.0, 0.0).step(&idle(), &cfg());
        assert!(r.player_hit);
        assert_eq!(s.velocity, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn top_edge_hit_has_full_spin() {
        let (s, r) = with_ball(50.0, 250.0, -5.0, 0.0).step(&idle(), &cfg());
        assert!(r.player_hit);
        assert_eq!(s.velocity, Vec2::new(5.0, -5.0));
    }

    #[test]
    fn bottom_edge_hit_spins_down() {
        let (s, _) = with_ball(50.0, 350.0, -5.0, 0.0).step(&idle(), &cfg());
        assert_eq!(s.velocity.y, 5.0);
    }

    #[test]
    fn miss_outside_paddle_span() {
        let (s, r) = with_ball(50.0, 400.0, -5.0, 0.0).step(&idle(), &cfg());
        assert!(!r.player_hit);
        assert_eq!(s.velocity.x, -5.0);
    }

    #[test]
    fn no_retrigger_while_leaving_band() {
        let (s, r) = with_ball(35.0, 300.0, 5.0, 1.0).step(&idle(), &cfg());
        assert!(!r.player_hit);
        assert_eq!(s.velocity.y, 1.0);
    }

    #[test]
    fn computer_paddle_reflects_without_spin() {
        // Band for the default field: 740 <= x < 755.
        let (s, r) = with_ball(738.0, 300.0, 5.0, 2.0).step(&idle(), &cfg());
        assert!(r.computer_hit);
        assert_eq!(s.velocity, Vec2::new(-5.0, 2.0));
    }

    #[test]
    fn zero_vx_in_band_gets_serve_speed() {
        let (s, r) = with_ball(40.0, 300.0, 0.0, 0.0).step(&idle(), &cfg());
        assert!(r.player_hit);
        assert_eq!(s.velocity.x, 5.0);
    }

    #[test]
    fn hand_drives_player_paddle_with_clamp() {
        let base = GameState::initial(&cfg());
        let (s, _) = base.step(&TickInput { hand_y: Some(300.0) }, &cfg());
        assert_eq!(s.player_y, 250.0);
        let (s, _) = base.step(&TickInput { hand_y: Some(10.0) }, &cfg());
        assert_eq!(s.player_y, 0.0);
        let (s, _) = base.step(&TickInput { hand_y: Some(590.0) }, &cfg());
        assert_eq!(s.player_y, 500.0);
    }

    #[test]
    fn no_hand_keeps_paddle() {
        let base = GameState { player_y: 123.0, ..GameState::initial(&cfg()) };
        let (s, _) = base.step(&idle(), &cfg());
        assert_eq!(s.player_y, 123.0);
    }

    #[test]
    fn ai_moves_a_tenth_of_the_gap() {
        // After the move the ball is at y = 453, target 403, gap 153.
        let (s, _) = with_ball(400.0, 450.0, 5.0, 3.0).step(&idle(), &cfg());
        assert!((s.computer_y - 265.3).abs() < 1e-3);
    }

    #[test]
    fn long_rally_keeps_invariants() {
        let c = cfg();
        let mut s = GameState::initial(&c);
        for _ in 0..20_000 {
            // Player tracks the ball perfectly.
            let input = TickInput { hand_y: Some(s.ball.y) };
            let (next, _) = s.step(&input, &c);
            s = next;
            assert!(s.velocity.x != 0.0);
            assert!(s.player_y >= 0.0 && s.player_y <= c.paddle_travel());
            assert!(s.computer_y >= 0.0 && s.computer_y <= c.paddle_travel());
            assert!(s.ball.x >= 0.0 && s.ball.x <= c.field_width);
        }
    }
}
