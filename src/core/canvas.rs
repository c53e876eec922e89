use glam::{DVec2, Vec2};

use super::font;
use crate::math::Color;

/// 2D drawing operations for canvas
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill entire canvas with color, ignoring blending
    Clear(Color),

    /// Blend a single pixel
    Pixel { x: i32, y: i32, color: Color },

    /// One pixel wide line using Bresenham's algorithm
    Line { from: Vec2, to: Vec2, color: Color },

    /// Line stroked with a round pen of the given width
    ThickLine { from: Vec2, to: Vec2, width: f32, color: Color },

    /// Filled axis-aligned rectangle
    Rect { x: i32, y: i32, width: u32, height: u32, color: Color },

    /// Circle outline using the midpoint algorithm
    Circle { center: Vec2, radius: f32, color: Color },

    /// Filled disc
    FilledCircle { center: Vec2, radius: f32, color: Color },

    /// Filled polygon, even-odd rule
    Polygon { points: Vec<Vec2>, color: Color },

    /// Bitmap text, top-left anchored; `\n` starts a new line
    Text { x: i32, y: i32, text: String, scale: u32, color: Color },
}

/// Canvas state - RGBA pixel buffer with pending draw operations
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: Vec<u8>,
    operations: Vec<DrawOp>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create new, fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width as usize) * (height as usize) * 4],
            operations: Vec::new(),
            width,
            height,
        }
    }

    /// Add draw operation - functional style
    pub fn draw(mut self, op: DrawOp) -> Self {
        self.operations.push(op);
        self
    }

    /// Queue a draw operation in place
    pub fn push(&mut self, op: DrawOp) {
        self.operations.push(op);
    }

    pub fn pending(&self) -> usize {
        self.operations.len()
    }

    /// Execute all pending operations in order
    pub fn execute_ops(mut self) -> Self {
        let operations = std::mem::take(&mut self.operations);
        for op in &operations {
            self.execute_op(op);
        }
        self
    }

    fn execute_op(&mut self, op: &DrawOp) {
        match op {
            DrawOp::Clear(color) => self.clear(*color),
            DrawOp::Pixel { x, y, color } => self.blend_pixel(*x, *y, *color),
            DrawOp::Line { from, to, color } => self.draw_line(*from, *to, 1.0, *color),
            DrawOp::ThickLine { from, to, width, color } => {
                self.draw_line(*from, *to, *width, *color)
            }
            DrawOp::Rect { x, y, width, height, color } => {
                self.draw_rect(*x, *y, *width, *height, *color)
            }
            DrawOp::Circle { center, radius, color } => self.draw_circle(*center, *radius, *color),
            DrawOp::FilledCircle { center, radius, color } => {
                self.draw_filled_circle(*center, *radius, *color)
            }
            DrawOp::Polygon { points, color } => self.fill_polygon(points, *color),
            DrawOp::Text { x, y, text, scale, color } => {
                self.draw_text(*x, *y, text, *scale, *color)
            }
        }
    }

    fn clear(&mut self, color: Color) {
        let rgba = color.to_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Source-over blend of one pixel; out-of-bounds writes are dropped
    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height || color.a == 0 {
            return;
        }

        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let dst = &mut self.pixels[idx..idx + 4];

        if color.a == 255 {
            dst.copy_from_slice(&color.to_array());
            return;
        }

        let alpha = color.a as f32 / 255.0;
        let inv = 1.0 - alpha;
        let mix = |s: u8, d: u8| (s as f32 * alpha + d as f32 * inv).round() as u8;
        dst[0] = mix(color.r, dst[0]);
        dst[1] = mix(color.g, dst[1]);
        dst[2] = mix(color.b, dst[2]);
        dst[3] = (color.a as f32 + dst[3] as f32 * inv).round().min(255.0) as u8;
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x as i64 + width as i64).min(self.width as i64) as i32;
        let y1 = (y as i64 + height as i64).min(self.height as i64) as i32;

        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, color);
            }
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let pad = width.max(1.0);
        let Some((from, to)) = clip_segment(from, to, self.width as f32, self.height as f32, pad)
        else {
            return;
        };

        let (mut x, mut y) = (from.x.round() as i32, from.y.round() as i32);
        let (x2, y2) = (to.x.round() as i32, to.y.round() as i32);

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        let radius = width * 0.5;
        // Translucent thick strokes would compound where pen stamps overlap
        let mut mask = if width > 1.5 && color.a < 255 {
            Some(StrokeMask::around(x, y, x2, y2, radius))
        } else {
            None
        };

        loop {
            if width > 1.5 {
                self.stamp_disc(x as f32, y as f32, radius, color, mask.as_mut());
            } else {
                self.blend_pixel(x, y, color);
            }

            if x == x2 && y == y2 {
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

    /// Stamp a pen disc; `mask` marks pixels already touched by this stroke
    fn stamp_disc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
        mut mask: Option<&mut StrokeMask>,
    ) {
        let r = radius.max(0.5);
        let r_sq = r * r;
        let min_x = (cx - r).floor() as i32;
        let max_x = (cx + r).ceil() as i32;
        let min_y = (cy - r).floor() as i32;
        let max_y = (cy + r).ceil() as i32;

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let ddx = px as f32 - cx;
                let ddy = py as f32 - cy;
                if ddx * ddx + ddy * ddy > r_sq {
                    continue;
                }
                if px < 0 || py < 0 || px as u32 >= self.width || py as u32 >= self.height {
                    continue;
                }
                if let Some(mask) = mask.as_deref_mut() {
                    if !mask.claim(px, py) {
                        continue;
                    }
                }
                self.blend_pixel(px, py, color);
            }
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let cx = center.x.round() as i32;
        let cy = center.y.round() as i32;
        let radius = radius.round().max(0.0) as i32;
        let (mut x, mut y) = (radius, 0i32);
        let mut p = 1 - radius;

        while x >= y {
            let points = [
                (cx + x, cy + y), (cx - x, cy + y),
                (cx + x, cy - y), (cx - x, cy - y),
                (cx + y, cy + x), (cx - y, cy + x),
                (cx + y, cy - x), (cx - y, cy - x),
            ];
            for (px, py) in points {
                self.blend_pixel(px, py, color);
            }

            y += 1;
            if p <= 0 {
                p += 2 * y + 1;
            } else {
                x -= 1;
                p += 2 * (y - x) + 1;
            }
        }
    }

    fn draw_filled_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !center.is_finite() {
            return;
        }
        self.stamp_disc(center.x, center.y, radius, color, None);
    }

    /// Scanline fill sampling pixel centres
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
            return;
        }

        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor().max(0.0) as i32;
        let max_y = points
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max)
            .ceil()
            .min(self.height as f32) as i32;

        let mut crossings: Vec<f32> = Vec::new();
        for py in min_y..max_y {
            let sample_y = py as f32 + 0.5;
            crossings.clear();

            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= sample_y) != (b.y <= sample_y) {
                    let t = (sample_y - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(|l, r| l.total_cmp(r));

            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil().max(0.0) as i32;
                let end = (span[1] - 0.5).floor().min(self.width as f32 - 1.0) as i32;
                for px in start..=end {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Color) {
        let scale = scale.max(1) as i32;

        for (line_idx, line) in text.lines().enumerate() {
            let line_y = y + line_idx as i32 * font::LINE_ADVANCE as i32 * scale;
            let mut cursor_x = x;

            for ch in line.chars() {
                let rows = font::glyph_3x5(ch);
                for (ry, bits) in rows.iter().enumerate() {
                    for rx in 0..font::GLYPH_WIDTH as i32 {
                        if bits & (1u8 << (2 - rx)) == 0 {
                            continue;
                        }
                        let px = cursor_x + rx * scale;
                        let py = line_y + ry as i32 * scale;
                        self.draw_rect(px, py, scale as u32, scale as u32, color);
                    }
                }
                cursor_x += font::ADVANCE as i32 * scale;
            }
        }
    }

    /// Get pixel buffer
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Colour at `(x, y)`, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = &self.pixels[idx..idx + 4];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }

    /// Get canvas dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Pixels already covered by one stroke, limited to the stroke's bounding box
struct StrokeMask {
    x0: i32,
    y0: i32,
    width: usize,
    touched: Vec<bool>,
}

impl StrokeMask {
    fn around(x1: i32, y1: i32, x2: i32, y2: i32, radius: f32) -> Self {
        let reach = radius.ceil() as i32 + 1;
        let x0 = x1.min(x2) - reach;
        let y0 = y1.min(y2) - reach;
        let width = ((x1.max(x2) + reach) - x0 + 1) as usize;
        let height = ((y1.max(y2) + reach) - y0 + 1) as usize;
        Self {
            x0,
            y0,
            width,
            touched: vec![false; width * height],
        }
    }

    /// Marks `(x, y)` and reports whether it was untouched
    fn claim(&mut self, x: i32, y: i32) -> bool {
        let (dx, dy) = (x - self.x0, y - self.y0);
        if dx < 0 || dy < 0 || dx as usize >= self.width {
            return true;
        }
        match self.touched.get_mut(dy as usize * self.width + dx as usize) {
            Some(slot) if *slot => false,
            Some(slot) => {
                *slot = true;
                true
            }
            None => true,
        }
    }
}

/// Liang-Barsky clip of a segment to the canvas grown by `pad` on every side.
///
/// Runs in f64 and snaps the clipped coordinate onto the edge it crossed so that
/// far off-canvas endpoints keep their on-canvas part intact.
fn clip_segment(from: Vec2, to: Vec2, width: f32, height: f32, pad: f32) -> Option<(Vec2, Vec2)> {
    if !from.is_finite() || !to.is_finite() {
        return None;
    }

    let (from, to) = (from.as_dvec2(), to.as_dvec2());
    let pad = pad as f64;
    let (min, max) = (DVec2::splat(-pad), DVec2::new(width as f64 + pad, height as f64 + pad));
    let d = to - from;

    // (p, q, axis, edge value)
    let edges = [
        (-d.x, from.x - min.x, 0, min.x),
        (d.x, max.x - from.x, 0, max.x),
        (-d.y, from.y - min.y, 1, min.y),
        (d.y, max.y - from.y, 1, max.y),
    ];

    let mut enter = (0.0f64, None);
    let mut exit = (1.0f64, None);

    for (p, q, axis, edge) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > exit.0 {
                return None;
            }
            if t > enter.0 {
                enter = (t, Some((axis, edge)));
            }
        } else {
            if t < enter.0 {
                return None;
            }
            if t < exit.0 {
                exit = (t, Some((axis, edge)));
            }
        }
    }

    let place = |(t, snap): (f64, Option<(usize, f64)>)| {
        let mut point = from + d * t;
        if let Some((axis, edge)) = snap {
            point[axis] = edge;
        }
        point.as_vec2()
    };

    Some((place(enter), place(exit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn canvas_creation() {
        let canvas = Canvas::new(100, 100);
        assert_eq!(canvas.dimensions(), (100, 100));
        assert_eq!(canvas.pixels().len(), 100 * 100 * 4);
    }

    #[test]
    fn canvas_clear() {
        let canvas = Canvas::new(10, 10).draw(DrawOp::Clear(RED)).execute_ops();

        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(9, 9), Some(RED));
    }

    #[test]
    fn canvas_rect_clips_negative_origin() {
        let canvas = Canvas::new(10, 10)
            .draw(DrawOp::Rect { x: -3, y: -3, width: 5, height: 5, color: RED })
            .execute_ops();

        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn canvas_line_endpoints() {
        let canvas = Canvas::new(50, 50)
            .draw(DrawOp::Line { from: Vec2::new(10.0, 10.0), to: Vec2::new(20.0, 20.0), color: RED })
            .execute_ops();

        assert_eq!(canvas.pixel(10, 10), Some(RED));
        assert_eq!(canvas.pixel(15, 15), Some(RED));
        assert_eq!(canvas.pixel(20, 20), Some(RED));
    }

    #[test]
    fn huge_line_is_clipped() {
        let canvas = Canvas::new(20, 20)
            .draw(DrawOp::Line {
                from: Vec2::new(-1.0e6, 10.0),
                to: Vec2::new(1.0e6, 10.0),
                color: RED,
            })
            .execute_ops();

        assert_eq!(canvas.pixel(0, 10), Some(RED));
        assert_eq!(canvas.pixel(19, 10), Some(RED));
    }

    #[test]
    fn non_finite_line_is_skipped() {
        let canvas = Canvas::new(5, 5)
            .draw(DrawOp::Line { from: Vec2::new(f32::NAN, 0.0), to: Vec2::ONE, color: RED })
            .execute_ops();
        assert!(canvas.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn thick_line_covers_width() {
        let canvas = Canvas::new(20, 20)
            .draw(DrawOp::ThickLine {
                from: Vec2::new(2.0, 10.0),
                to: Vec2::new(17.0, 10.0),
                width: 5.0,
                color: RED,
            })
            .execute_ops();

        assert_eq!(canvas.pixel(10, 8), Some(RED));
        assert_eq!(canvas.pixel(10, 12), Some(RED));
        assert_eq!(canvas.pixel(10, 15), Some(Color::TRANSPARENT));
    }

    #[test]
    fn translucent_thick_line_blends_once() {
        let canvas = Canvas::new(20, 20)
            .draw(DrawOp::Clear(Color::BLACK))
            .draw(DrawOp::ThickLine {
                from: Vec2::new(2.0, 10.0),
                to: Vec2::new(17.0, 10.0),
                width: 4.0,
                color: Color::WHITE.with_alpha(0.5),
            })
            .execute_ops();

        assert_eq!(canvas.pixel(10, 10).map(|c| c.r), Some(128));
    }

    #[test]
    fn alpha_blends_over_background() {
        let canvas = Canvas::new(4, 4)
            .draw(DrawOp::Clear(Color::BLACK))
            .draw(DrawOp::Pixel { x: 1, y: 1, color: Color::WHITE.with_alpha(0.5) })
            .execute_ops();

        let px = canvas.pixel(1, 1).unwrap();
        assert_eq!((px.r, px.a), (128, 255));
    }

    #[test]
    fn polygon_fill_square() {
        let square = vec![
            Vec2::new(2.0, 2.0),
            Vec2::new(8.0, 2.0),
            Vec2::new(8.0, 8.0),
            Vec2::new(2.0, 8.0),
        ];
        let canvas = Canvas::new(10, 10)
            .draw(DrawOp::Polygon { points: square, color: RED })
            .execute_ops();

        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(7, 7), Some(RED));
        assert_eq!(canvas.pixel(8, 8), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(1, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn filled_circle_center() {
        let canvas = Canvas::new(50, 50)
            .draw(DrawOp::FilledCircle { center: Vec2::new(25.0, 25.0), radius: 5.0, color: RED })
            .execute_ops();

        assert_eq!(canvas.pixel(25, 25), Some(RED));
        assert_eq!(canvas.pixel(25, 22), Some(RED));
        assert_eq!(canvas.pixel(25, 32), Some(Color::TRANSPARENT));
    }

    #[test]
    fn circle_outline_top_point() {
        let canvas = Canvas::new(50, 50)
            .draw(DrawOp::Circle { center: Vec2::new(25.0, 25.0), radius: 10.0, color: RED })
            .execute_ops();

        assert_eq!(canvas.pixel(25, 15), Some(RED));
        assert_eq!(canvas.pixel(25, 25), Some(Color::TRANSPARENT));
    }

    #[test]
    fn text_draws_glyph_bits() {
        let canvas = Canvas::new(10, 10)
            .draw(DrawOp::Text { x: 0, y: 0, text: "1".into(), scale: 1, color: Color::WHITE })
            .execute_ops();

        // '1' = 010 / 110 / 010 / 010 / 111
        assert_eq!(canvas.pixel(1, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(0, 4), Some(Color::WHITE));
    }

    #[test]
    fn out_of_bounds_pixel_is_ignored() {
        let canvas = Canvas::new(10, 10)
            .draw(DrawOp::Pixel { x: 100, y: -4, color: RED })
            .execute_ops();
        assert_eq!(canvas.pixels().len(), 400);
        assert_eq!(canvas.pixel(100, 100), None);
    }
}
