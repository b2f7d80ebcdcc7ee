//! Rendering adapter: draws one frame of studio state into a [`Framebuffer`].
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │        3    ┆    1                 (scores, paddle mode)  │
//! │ ▌           ┆                                          ▐ │
//! │      ●      ┆  ■         ▲          (shapes, canvas mode) │
//! │             ┆      ✋                (hand skeleton)      │
//! ├──────────────────────────────────────────────────────────┤
//! │ status bar: mode, gesture, drag, pinch readout           │
//! │ key legend                                               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here keeps state between frames.

use hand_canvas::{ObjectSnapshot, Shape};
use hand_gesture::{
    GestureDebug, GestureState, HandLandmarks, Landmark, Surface, HAND_SKELETON,
};
use hand_pong::GameSnapshot;

use crate::framebuffer::{text_width, Framebuffer, GLYPH_H};

// ════════════════════════════════════════════════════════════════════════════
// Palette
// ════════════════════════════════════════════════════════════════════════════

pub const BACKGROUND: u32 = 0xFF1A1A2E;
pub const FIELD_BG:   u32 = 0xFF000000;
const FOREGROUND:     u32 = 0xFFFFFFFF;
const SHADOW:         u32 = 0xFF0B0B16;
const BONE:           u32 = 0xFF00FF00;
const JOINT:          u32 = 0xFFFF0000;
const THUMB_MARK:     u32 = 0xFFFFFF00;
const INDEX_MARK:     u32 = 0xFF00FFFF;
const STATUS_BG:      u32 = 0xFF0F3460;
const STATUS_TEXT:    u32 = 0xFFEEEEEE;
const LEGEND_TEXT:    u32 = 0xFF888888;
const PINCH_TEXT:     u32 = 0xFFFFD700;

/// Held shapes are drawn this much larger, over a drop shadow.
const LIFT_SCALE: f32 = 1.1;
const SHADOW_OFFSET: (f32, f32) = (6.0, 10.0);

pub const STATUS_H: i32 = 44;
const TIP_RADIUS: f32 = 10.0;

// ════════════════════════════════════════════════════════════════════════════
// Scene description
// ════════════════════════════════════════════════════════════════════════════

/// Text shown in the status bar.
#[derive(Clone, Debug)]
pub struct Hud<'a> {
    pub mode:    &'a str,
    pub gesture: GestureState,
    pub debug:   Option<GestureDebug>,
    pub holding: Option<u32>,
    pub status:  &'a str,
}

/// Everything needed to draw one frame.  Absent consumers are `None`.
pub struct Scene<'a> {
    pub surface: Surface,
    pub objects: Option<&'a [ObjectSnapshot]>,
    pub game:    Option<GameSnapshot>,
    pub hands:   &'a [Vec<Landmark>],
    pub hud:     Hud<'a>,
}

pub fn draw_scene(fb: &mut Framebuffer, scene: &Scene<'_>) {
    let backdrop = if scene.game.is_some() && scene.objects.is_none() { FIELD_BG } else { BACKGROUND };
    fb.clear(backdrop);

    if let Some(game) = &scene.game {
        draw_game(fb, game);
    }
    if let Some(objects) = scene.objects {
        draw_objects(fb, objects);
    }
    draw_hands(fb, scene.hands, scene.surface);
    draw_status(fb, &scene.hud);
}

// ════════════════════════════════════════════════════════════════════════════
// Shapes
// ════════════════════════════════════════════════════════════════════════════

/// Draw every shape; a held shape goes on top of the rest.
pub fn draw_objects(fb: &mut Framebuffer, objects: &[ObjectSnapshot]) {
    for obj in objects.iter().filter(|o| !o.dragging) {
        draw_object(fb, obj);
    }
    for obj in objects.iter().filter(|o| o.dragging) {
        draw_object(fb, obj);
    }
}

pub fn draw_object(fb: &mut Framebuffer, obj: &ObjectSnapshot) {
    let (x, y) = (obj.position.x, obj.position.y);
    if obj.dragging {
        let size = obj.size * LIFT_SCALE;
        fill_shape(fb, obj.shape, x + SHADOW_OFFSET.0, y + SHADOW_OFFSET.1, size, SHADOW);
        fill_shape(fb, obj.shape, x, y, size, obj.color.argb());
    } else {
        fill_shape(fb, obj.shape, x, y, obj.size, obj.color.argb());
    }
}

/// `size` is the width and height of the shape's bounding box, centred on
/// `(x, y)`.  Triangles point up.
fn fill_shape(fb: &mut Framebuffer, shape: Shape, x: f32, y: f32, size: f32, color: u32) {
    let half = size / 2.0;
    match shape {
        Shape::Circle => fb.fill_circle(x, y, half, color),
        Shape::Square => fb.fill_rect(
            (x - half).round() as i32,
            (y - half).round() as i32,
            size.round() as i32,
            size.round() as i32,
            color,
        ),
        Shape::Triangle => fb.fill_triangle(
            (x, y - half),
            (x - half, y + half),
            (x + half, y + half),
            color,
        ),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Paddle game
// ════════════════════════════════════════════════════════════════════════════

/// Draw the game stretched to fill the buffer.
pub fn draw_game(fb: &mut Framebuffer, g: &GameSnapshot) {
    let sx = fb.width() as f32 / g.field_width;
    let sy = fb.height() as f32 / g.field_height;
    let rect = |fb: &mut Framebuffer, x: f32, y: f32, w: f32, h: f32| {
        fb.fill_rect(
            (x * sx).round() as i32,
            (y * sy).round() as i32,
            (w * sx).round().max(1.0) as i32,
            (h * sy).round().max(1.0) as i32,
            FOREGROUND,
        )
    };

    // Dashed centre line: 20 on, 20 off.
    let mut dash = 0.0;
    while dash < g.field_height {
        rect(fb, g.field_width / 2.0 - 2.0, dash, 4.0, 20.0);
        dash += 40.0;
    }

    rect(fb, g.player_x,   g.player_y,   g.paddle_width, g.paddle_height);
    rect(fb, g.computer_x, g.computer_y, g.paddle_width, g.paddle_height);
    rect(fb, g.ball.x, g.ball.y, g.ball_size, g.ball_size);

    let scale = ((48.0 * sy) / GLYPH_H as f32).round().max(1.0) as i32;
    let top = (20.0 * sy).round() as i32;
    let player = g.score.player.to_string();
    let computer = g.score.computer.to_string();
    let mid = fb.width() as i32 / 2;
    let gap = (80.0 * sx).round() as i32;
    fb.draw_text(&player, mid - gap - text_width(&player, scale), top, scale, FOREGROUND);
    fb.draw_text(&computer, mid + gap, top, scale, FOREGROUND);

    if !g.running {
        let msg = "SPACE TO START";
        let s = 3;
        let y = fb.height() as i32 / 3;
        fb.draw_text(msg, mid - text_width(msg, s) / 2, y, s, FOREGROUND);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Hand overlay
// ════════════════════════════════════════════════════════════════════════════

/// Skeleton for every well-formed hand, with thumb and index tips marked.
/// Hands reaching more than one buffer size past any edge are skipped.
pub fn draw_hands(fb: &mut Framebuffer, hands: &[Vec<Landmark>], surface: Surface) {
    let (w, h) = (fb.width() as f32, fb.height() as f32);
    let sx = w / surface.width;
    let sy = h / surface.height;
    let to_px = |lm: Landmark| {
        let p = surface.project(lm);
        (p.x * sx, p.y * sy)
    };
    let near = |(x, y): (f32, f32)| x >= -w && x <= 2.0 * w && y >= -h && y <= 2.0 * h;

    for raw in hands {
        let Ok(hand) = HandLandmarks::try_from(raw.as_slice()) else {
            continue;
        };
        if !hand.as_slice().iter().all(|&lm| near(to_px(lm))) {
            tracing::trace!("hand overlay skipped: landmarks far off-surface");
            continue;
        }
        for &(a, b) in HAND_SKELETON.iter() {
            let (Some(a), Some(b)) = (hand.get(a), hand.get(b)) else {
                continue;
            };
            let (x0, y0) = to_px(a);
            let (x1, y1) = to_px(b);
            fb.draw_wide_line(x0 as i32, y0 as i32, x1 as i32, y1 as i32, 2.0, BONE);
        }
        for &lm in hand.as_slice() {
            let (x, y) = to_px(lm);
            fb.draw_diamond(x as i32, y as i32, 3, JOINT);
        }
        let (tx, ty) = to_px(hand.thumb_tip());
        fb.fill_circle(tx, ty, TIP_RADIUS, THUMB_MARK);
        let (ix, iy) = to_px(hand.index_tip());
        fb.fill_circle(ix, iy, TIP_RADIUS, INDEX_MARK);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Status bar
// ════════════════════════════════════════════════════════════════════════════

pub fn draw_status(fb: &mut Framebuffer, hud: &Hud<'_>) {
    let w = fb.width() as i32;
    let y = fb.height() as i32 - STATUS_H;
    fb.fill_rect(0, y, w, STATUS_H, STATUS_BG);

    let gesture = match hud.gesture {
        GestureState::Open  => "OPEN",
        GestureState::Pinch => "PINCH",
    };
    let holding = hud.holding.map_or_else(|| "-".to_string(), |id| id.to_string());
    let line = format!("MODE: {}   GESTURE: {}   HOLDING: {}   {}", hud.mode, gesture, holding, hud.status);
    let color = if hud.gesture.is_pinch() { PINCH_TEXT } else { STATUS_TEXT };
    fb.draw_text(&line, 8, y + 6, 2, color);

    if let Some(d) = hud.debug {
        let readout = format!(
            "THUMB {:.0},{:.0}  INDEX {:.0},{:.0}  D={:.3}",
            d.thumb.x, d.thumb.y, d.index_finger.x, d.index_finger.y, d.distance,
        );
        fb.draw_text(&readout, 8, y + 20, 1, STATUS_TEXT);
    }

    fb.draw_text(
        "SPACE=START  R=RESET  TAB=MODE  Q=QUIT  MOUSE=HAND  CLICK=PINCH",
        8, y + 32, 1, LEGEND_TEXT,
    );
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
