//! ARGB software framebuffer and the drawing primitives the scene needs.
//!
//! Coordinates are signed so shapes dragged partly off-screen clip instead of
//! wrapping; every primitive clips to the buffer.

// ════════════════════════════════════════════════════════════════════════════
// Framebuffer
// ════════════════════════════════════════════════════════════════════════════

pub struct Framebuffer {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
}

/// Glyph cell: 3 px wide plus 1 px gap, 5 px tall.
pub const GLYPH_W: i32 = 4;
pub const GLYPH_H: i32 = 5;

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer { width, height, buf: vec![0xFF00_0000; width * height] }
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn as_slice(&self) -> &[u32] { &self.buf }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.buf[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.buf[i] = color;
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        for row in y0..y1 {
            let base = row as usize * self.width;
            for col in x0..x1 {
                self.buf[base + col as usize] = color;
            }
        }
    }

    /// Filled disc of radius `r` centred on `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: u32) {
        if r <= 0.0 {
            return;
        }
        let r2 = r * r;
        let y0 = (cy - r).floor() as i32;
        let y1 = (cy + r).ceil() as i32;
        let x0 = (cx - r).floor() as i32;
        let x1 = (cx + r).ceil() as i32;
        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - cy;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Filled triangle; vertex winding does not matter.
    pub fn fill_triangle(&mut self, a: (f32, f32), b: (f32, f32), c: (f32, f32), color: u32) {
        let edge = |p: (f32, f32), q: (f32, f32), x: f32, y: f32| {
            (q.0 - p.0) * (y - p.1) - (q.1 - p.1) * (x - p.0)
        };
        let area = edge(a, b, c.0, c.1);
        if area == 0.0 {
            return;
        }
        let x0 = a.0.min(b.0).min(c.0).floor() as i32;
        let x1 = a.0.max(b.0).max(c.0).ceil() as i32;
        let y0 = a.1.min(b.1).min(c.1).floor() as i32;
        let y1 = a.1.max(b.1).max(c.1).ceil() as i32;
        for y in y0..=y1 {
            let py = y as f32 + 0.5;
            for x in x0..=x1 {
                let px = x as f32 + 0.5;
                // Same sign as the full area on all three edges → inside.
                let w0 = edge(b, c, px, py) * area.signum();
                let w1 = edge(c, a, px, py) * area.signum();
                let w2 = edge(a, b, px, py) * area.signum();
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Line drawn with a round brush of radius `r`.
    pub fn draw_wide_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, r: f32, color: u32) {
        self.walk_line(x0, y0, x1, y1, |fb, x, y| {
            fb.fill_circle(x as f32 + 0.5, y as f32 + 0.5, r, color)
        });
    }

    /// Bresenham walk from `(x0, y0)` to `(x1, y1)`.  Error terms are kept in
    /// `i64` so endpoints anywhere in the `i32` range cannot overflow.
    fn walk_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(&mut Self, i32, i32)) {
        let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            // x and y stay between the i32 endpoints.
            plot(self, x as i32, y as i32);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn draw_diamond(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            let span = r - dy.abs();
            for dx in -span..=span {
                self.set_pixel(cx + dx, cy + dy, color);
            }
        }
    }

    /// 3×5 bitmap text, each font pixel drawn as a `scale`×`scale` block.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let scale = scale.max(1);
        let mut cx = x;
        for ch in text.chars() {
            for (row, &bits) in char_glyph(ch).iter().enumerate() {
                for col in 0..3 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row as i32 * scale, scale, scale, color);
                    }
                }
            }
            cx += GLYPH_W * scale;
            if cx >= self.width as i32 {
                break;
            }
        }
    }
}

pub fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * GLYPH_W * scale.max(1)
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000],
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFFFF_0000;
    const BLACK: u32 = 0xFF00_0000;

    fn lit(fb: &Framebuffer) -> usize {
        fb.as_slice().iter().filter(|&&p| p != BLACK).count()
    }

    #[test]
    fn fill_rect_clips_to_buffer() {
        let mut fb = Framebuffer::new(10, 10);
        fb.fill_rect(-5, -5, 8, 8, RED);
        assert_eq!(lit(&fb), 9);
        assert_eq!(fb.pixel(2, 2), Some(RED));
        assert_eq!(fb.pixel(3, 3), Some(BLACK));
        fb.fill_rect(8, 8, 100, 100, RED);
        assert_eq!(lit(&fb), 13);
    }

    #[test]
    fn fill_rect_at_extreme_coordinates_is_clipped() {
        let mut fb = Framebuffer::new(10, 10);
        fb.fill_rect(i32::MAX - 5, i32::MAX - 5, 100, 100, RED);
        fb.fill_rect(i32::MIN, i32::MIN, 100, 100, RED);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn out_of_range_pixels_are_ignored() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_pixel(-1, 0, RED);
        fb.set_pixel(4, 0, RED);
        fb.set_pixel(0, 4, RED);
        assert_eq!(lit(&fb), 0);
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn circle_covers_centre_not_corners() {
        let mut fb = Framebuffer::new(40, 40);
        fb.fill_circle(20.0, 20.0, 10.0, RED);
        assert_eq!(fb.pixel(20, 20), Some(RED));
        assert_eq!(fb.pixel(11, 20), Some(RED));
        assert_eq!(fb.pixel(11, 11), Some(BLACK));
        // Roughly π r².
        let n = lit(&fb) as f32;
        assert!((n - 314.0).abs() < 20.0, "{n}");
    }

    #[test]
    fn triangle_fill_either_winding() {
        for (b, c) in [((0.0, 20.0), (20.0, 20.0)), ((20.0, 20.0), (0.0, 20.0))] {
            let mut fb = Framebuffer::new(30, 30);
            fb.fill_triangle((10.0, 0.0), b, c, RED);
            assert_eq!(fb.pixel(10, 15), Some(RED));
            assert_eq!(fb.pixel(1, 2), Some(BLACK));
            assert_eq!(fb.pixel(25, 25), Some(BLACK));
        }
    }

    #[test]
    fn degenerate_triangle_draws_nothing() {
        let mut fb = Framebuffer::new(10, 10);
        fb.fill_triangle((0.0, 0.0), (5.0, 5.0), (9.0, 9.0), RED);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn thin_line_hits_both_endpoints() {
        let mut fb = Framebuffer::new(20, 20);
        // A half-pixel brush covers only the pixel it is centred on.
        fb.draw_wide_line(2, 3, 17, 11, 0.5, RED);
        assert_eq!(fb.pixel(2, 3), Some(RED));
        assert_eq!(fb.pixel(17, 11), Some(RED));
        assert_eq!(lit(&fb), 16);
    }

    #[test]
    fn wide_line_is_thicker() {
        let mut fb = Framebuffer::new(20, 20);
        fb.draw_wide_line(2, 10, 17, 10, 2.0, RED);
        assert_eq!(fb.pixel(10, 9), Some(RED));
        assert_eq!(fb.pixel(10, 11), Some(RED));
        assert_eq!(fb.pixel(10, 14), Some(BLACK));
    }

    #[test]
    fn text_is_drawn_and_scaled() {
        let mut fb = Framebuffer::new(40, 20);
        fb.draw_text("1", 0, 0, 1, RED);
        // Glyph '1' has 8 set bits.
        assert_eq!(lit(&fb), 8);
        fb.clear(BLACK);
        fb.draw_text("1", 0, 0, 2, RED);
        assert_eq!(lit(&fb), 32);
        assert_eq!(text_width("12", 3), 24);
    }
}
