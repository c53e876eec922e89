use glam::{DVec2, Vec2};

use super::ticks::{format_tick, nice_ticks};
use super::{padded_range, px_per_point, LineStyle};
use crate::core::{font, Canvas, DisplayContext, DrawOp};
use crate::math::Color;

/// Fraction of the canvas kept clear around the data
const MARGIN: f64 = 0.06;

#[derive(Debug, Clone)]
struct Line2D {
    points: Vec<DVec2>,
    style: LineStyle,
}

/// Flat axes with optional equal aspect and hidden frame
#[derive(Debug, Clone)]
pub struct Axes2D {
    lines: Vec<Line2D>,
    facecolor: Color,
    foreground: Color,
    equal_aspect: bool,
    axis_visible: bool,
    title: Option<String>,
}

impl Default for Axes2D {
    fn default() -> Self {
        Self::new()
    }
}

impl Axes2D {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            facecolor: Color::WHITE,
            foreground: Color::BLACK,
            equal_aspect: false,
            axis_visible: true,
            title: None,
        }
    }

    pub fn facecolor(mut self, color: Color) -> Self {
        self.facecolor = color;
        self
    }

    pub fn equal_aspect(mut self, equal: bool) -> Self {
        self.equal_aspect = equal;
        self
    }

    pub fn axis(mut self, visible: bool) -> Self {
        self.axis_visible = visible;
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn plot(&mut self, points: Vec<DVec2>, style: LineStyle) {
        self.lines.push(Line2D { points, style });
    }

    /// Bounds of all finite points, widened when degenerate
    pub fn data_bounds(&self) -> (DVec2, DVec2) {
        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);
        for p in self.lines.iter().flat_map(|l| &l.points).filter(|p| p.is_finite()) {
            min = min.min(*p);
            max = max.max(*p);
        }
        let (x0, x1) = padded_range(min.x, max.x);
        let (y0, y1) = padded_range(min.y, max.y);
        (DVec2::new(x0, y0), DVec2::new(x1, y1))
    }

    pub fn render(&self, ctx: &DisplayContext) -> Canvas {
        let mut canvas = Canvas::new(ctx.width, ctx.height);
        canvas.push(DrawOp::Clear(self.facecolor));

        let (min, max) = self.data_bounds();
        let span = max - min;
        let w = ctx.width as f64;
        let h = ctx.height as f64;
        let avail = DVec2::new(w * (1.0 - 2.0 * MARGIN), h * (1.0 - 2.0 * MARGIN));

        let mut scale = avail / span;
        if self.equal_aspect {
            scale = DVec2::splat(scale.x.min(scale.y));
        }
        let center = (min + max) * 0.5;
        let to_screen = |p: DVec2| -> Vec2 {
            let d = (p - center) * scale;
            Vec2::new((w / 2.0 + d.x) as f32, (h / 2.0 - d.y) as f32)
        };

        if self.axis_visible {
            self.draw_frame(&mut canvas, ctx, min, max, &to_screen);
        }

        let ppt = px_per_point(ctx);
        for line in &self.lines {
            let color = line.style.stroke_color();
            let width = line.style.width * ppt;
            for pair in line.points.windows(2) {
                canvas.push(DrawOp::ThickLine {
                    from: to_screen(pair[0]),
                    to: to_screen(pair[1]),
                    width,
                    color,
                });
            }
        }

        if let Some(title) = &self.title {
            let scale = ctx.text_scale();
            let x = (ctx.width as i32 - font::text_width(title, scale) as i32) / 2;
            canvas.push(DrawOp::Text {
                x,
                y: (4 * scale) as i32,
                text: title.clone(),
                scale,
                color: self.foreground,
            });
        }

        canvas.execute_ops()
    }

    fn draw_frame(
        &self,
        canvas: &mut Canvas,
        ctx: &DisplayContext,
        min: DVec2,
        max: DVec2,
        to_screen: &dyn Fn(DVec2) -> Vec2,
    ) {
        let corners = [
            DVec2::new(min.x, min.y),
            DVec2::new(max.x, min.y),
            DVec2::new(max.x, max.y),
            DVec2::new(min.x, max.y),
        ];
        for i in 0..4 {
            canvas.push(DrawOp::Line {
                from: to_screen(corners[i]),
                to: to_screen(corners[(i + 1) % 4]),
                color: self.foreground,
            });
        }

        let scale = ctx.text_scale();
        let tick_len = 4.0 * scale as f32;
        for x in nice_ticks(min.x, max.x, 5) {
            let base = to_screen(DVec2::new(x, min.y));
            canvas.push(DrawOp::Line { from: base, to: base + Vec2::new(0.0, tick_len), color: self.foreground });
            let label = format_tick(x);
            canvas.push(DrawOp::Text {
                x: base.x as i32 - font::text_width(&label, scale) as i32 / 2,
                y: (base.y + tick_len * 1.5) as i32,
                text: label,
                scale,
                color: self.foreground,
            });
        }
        for y in nice_ticks(min.y, max.y, 5) {
            let base = to_screen(DVec2::new(min.x, y));
            canvas.push(DrawOp::Line { from: base, to: base - Vec2::new(tick_len, 0.0), color: self.foreground });
            let label = format_tick(y);
            canvas.push(DrawOp::Text {
                x: (base.x - tick_len * 1.5) as i32 - font::text_width(&label, scale) as i32,
                y: base.y as i32 - (font::GLYPH_HEIGHT * scale) as i32 / 2,
                text: label,
                scale,
                color: self.foreground,
            });
        }
    }
}
