use std::ops::Range;

use glam::{DVec3, Vec2};

use super::ticks::{format_tick, nice_ticks};
use super::view::View;
use super::{marker_radius, padded_range, px_per_point, LineStyle, MarkerStyle};
use crate::core::{font, Canvas, DisplayContext, DrawOp};
use crate::math::Color;

const PANE_SIDE: Color = Color::rgb(242, 242, 242);
const PANE_FLOOR: Color = Color::rgb(230, 230, 230);
const PANE_EDGE: Color = Color::rgb(200, 200, 200);
const GRID: Color = Color::rgb(176, 176, 176);
const TICKS_PER_AXIS: usize = 5;

/// Something drawn inside 3D axes, in data coordinates
#[derive(Debug, Clone)]
pub enum Artist3D {
    /// Polyline with one style
    Line { points: Vec<DVec3>, style: LineStyle },

    /// Polyline split into index ranges, each stroked in its own colour
    Segments {
        points: Vec<DVec3>,
        ranges: Vec<Range<usize>>,
        colors: Vec<Color>,
        style: LineStyle,
    },

    /// Per-point coloured markers, drawn back to front
    Scatter {
        points: Vec<DVec3>,
        colors: Vec<Color>,
        style: MarkerStyle,
    },
}

impl Artist3D {
    fn points(&self) -> &[DVec3] {
        match self {
            Artist3D::Line { points, .. }
            | Artist3D::Segments { points, .. }
            | Artist3D::Scatter { points, .. } => points,
        }
    }
}

/// Axis-aligned box axes with matplotlib-style panes, grid and orthographic view
#[derive(Debug, Clone)]
pub struct Axes3D {
    artists: Vec<Artist3D>,
    limits: [Option<(f64, f64)>; 3],
    box_aspect: DVec3,
    labels: [Option<String>; 3],
    title: Option<String>,
    legend: Vec<(String, Color)>,
    grid_alpha: Option<f32>,
    axis_visible: bool,
    view: View,
    facecolor: Color,
    foreground: Color,
}

impl Default for Axes3D {
    fn default() -> Self {
        Self::new()
    }
}

impl Axes3D {
    pub fn new() -> Self {
        Self {
            artists: Vec::new(),
            limits: [None; 3],
            box_aspect: DVec3::new(4.0, 4.0, 3.0),
            labels: [None, None, None],
            title: None,
            legend: Vec::new(),
            grid_alpha: Some(1.0),
            axis_visible: true,
            view: View::default(),
            facecolor: Color::WHITE,
            foreground: Color::BLACK,
        }
    }

    pub fn plot(&mut self, points: Vec<DVec3>, style: LineStyle) {
        self.artists.push(Artist3D::Line { points, style });
    }

    /// Stroke `points[ranges[k]]` in `colors[k]`; each range also joins the next range's first point
    pub fn plot_segments(
        &mut self,
        points: Vec<DVec3>,
        ranges: Vec<Range<usize>>,
        colors: Vec<Color>,
        style: LineStyle,
    ) {
        self.artists.push(Artist3D::Segments {
            points,
            ranges,
            colors,
            style,
        });
    }

    /// Markers coloured per point; a shorter colour list is cycled
    pub fn scatter(&mut self, points: Vec<DVec3>, colors: Vec<Color>, style: MarkerStyle) {
        self.artists.push(Artist3D::Scatter {
            points,
            colors,
            style,
        });
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.limits[0] = Some((lo, hi));
    }

    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        self.limits[1] = Some((lo, hi));
    }

    pub fn set_zlim(&mut self, lo: f64, hi: f64) {
        self.limits[2] = Some((lo, hi));
    }

    pub fn set_box_aspect(&mut self, aspect: DVec3) {
        self.box_aspect = aspect.max(DVec3::splat(f64::EPSILON));
    }

    pub fn set_labels(&mut self, x: &str, y: &str, z: &str) {
        self.labels = [Some(x.to_string()), Some(y.to_string()), Some(z.to_string())];
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_legend(&mut self, entries: Vec<(String, Color)>) {
        self.legend = entries;
    }

    /// Grid line opacity; `None` hides the grid
    pub fn grid(&mut self, alpha: Option<f32>) {
        self.grid_alpha = alpha;
    }

    pub fn axis(&mut self, visible: bool) {
        self.axis_visible = visible;
    }

    pub fn view_init(&mut self, elev: f64, azim: f64) {
        self.view = View::new(elev, azim);
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_facecolor(&mut self, color: Color) {
        self.facecolor = color;
    }

    pub fn artists(&self) -> &[Artist3D] {
        &self.artists
    }

    /// Explicit limits, or the finite data extent of every artist
    pub fn limits(&self) -> [(f64, f64); 3] {
        let mut lo = DVec3::splat(f64::INFINITY);
        let mut hi = DVec3::splat(f64::NEG_INFINITY);
        for p in self.artists.iter().flat_map(|a| a.points()).filter(|p| p.is_finite()) {
            lo = lo.min(*p);
            hi = hi.max(*p);
        }

        let mut out = [(0.0, 0.0); 3];
        for (axis, slot) in out.iter_mut().enumerate() {
            let (l, h) = self.limits[axis].unwrap_or((lo[axis], hi[axis]));
            *slot = padded_range(l, h);
        }
        out
    }

    pub fn render(&self, ctx: &DisplayContext, view: View) -> Canvas {
        let mut canvas = Canvas::new(ctx.width, ctx.height);
        canvas.push(DrawOp::Clear(self.facecolor));

        let projector = Projector::new(self, ctx, view);

        if self.axis_visible {
            self.draw_panes(&mut canvas, &projector, ctx);
        }

        for artist in &self.artists {
            draw_artist(&mut canvas, &projector, ctx, artist);
        }

        if !self.legend.is_empty() {
            self.draw_legend(&mut canvas, ctx);
        }

        if let Some(title) = &self.title {
            let scale = ctx.text_scale();
            for (i, line) in title.lines().enumerate() {
                let x = (ctx.width as i32 - font::text_width(line, scale) as i32) / 2;
                canvas.push(DrawOp::Text {
                    x,
                    y: ((4 + i as u32 * font::LINE_ADVANCE) * scale) as i32,
                    text: line.to_string(),
                    scale,
                    color: self.foreground,
                });
            }
        }

        canvas.execute_ops()
    }

    fn draw_panes(&self, canvas: &mut Canvas, projector: &Projector, ctx: &DisplayContext) {
        let eye = projector.view.eye();
        let half = projector.half;
        // Panes sit on the far side of each axis from the viewer
        let back = DVec3::new(
            -half.x * eye.x.signum(),
            -half.y * eye.y.signum(),
            -half.z * eye.z.signum(),
        );
        let front = -back;

        for axis in 0..3 {
            let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
            let corner = |su: f64, sv: f64| {
                let mut p = DVec3::ZERO;
                p[axis] = back[axis];
                p[u] = su * half[u];
                p[v] = sv * half[v];
                projector.screen(p)
            };
            let quad = vec![corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0)];
            let fill = if axis == 2 { PANE_FLOOR } else { PANE_SIDE };
            canvas.push(DrawOp::Polygon {
                points: quad.clone(),
                color: fill,
            });
            for i in 0..4 {
                canvas.push(DrawOp::Line {
                    from: quad[i],
                    to: quad[(i + 1) % 4],
                    color: PANE_EDGE,
                });
            }
        }

        let ticks: Vec<Vec<f64>> = projector
            .limits
            .iter()
            .map(|&(lo, hi)| nice_ticks(lo, hi, TICKS_PER_AXIS))
            .collect();

        if let Some(alpha) = self.grid_alpha {
            let color = GRID.with_alpha(alpha);
            for axis in 0..3 {
                for &value in &ticks[axis] {
                    let c = projector.normalise_axis(axis, value);
                    // One line across each of the two back panes that contain this axis
                    for other in (0..3).filter(|&o| o != axis) {
                        let free = 3 - axis - other;
                        let mut from = DVec3::ZERO;
                        from[axis] = c;
                        from[other] = back[other];
                        from[free] = -half[free];
                        let mut to = from;
                        to[free] = half[free];
                        canvas.push(DrawOp::Line {
                            from: projector.screen(from),
                            to: projector.screen(to),
                            color,
                        });
                    }
                }
            }
        }

        let scale = ctx.text_scale();
        let centre = projector.screen(DVec3::ZERO);
        for axis in 0..3 {
            // Tick labels run along the front floor edge for x/y and the leftmost vertical edge for z
            let mut anchor = DVec3::ZERO;
            if axis == 2 {
                let edges = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
                let leftmost = edges
                    .iter()
                    .map(|&(sx, sy)| DVec3::new(sx * half.x, sy * half.y, 0.0))
                    .min_by(|a, b| {
                        projector.screen(*a).x.total_cmp(&projector.screen(*b).x)
                    })
                    .unwrap_or(DVec3::ZERO);
                anchor = leftmost;
            } else {
                let other = 1 - axis;
                anchor[other] = front[other];
                anchor[2] = back[2];
            }

            let mut edge_mid = anchor;
            edge_mid[axis] = 0.0;
            let outward = (projector.screen(edge_mid) - centre).normalize_or_zero();

            for &value in &ticks[axis] {
                let mut p = anchor;
                p[axis] = projector.normalise_axis(axis, value);
                let at = projector.screen(p) + outward * (6 * scale) as f32;
                let label = format_tick(value);
                push_centred_text(canvas, at, label, scale, self.foreground);
            }

            if let Some(label) = &self.labels[axis] {
                let at = projector.screen(edge_mid) + outward * (22 * scale) as f32;
                push_centred_text(canvas, at, label.clone(), scale, self.foreground);
            }
        }
    }

    fn draw_legend(&self, canvas: &mut Canvas, ctx: &DisplayContext) {
        let scale = ctx.text_scale();
        let swatch = (font::GLYPH_HEIGHT * scale) as i32;
        let row = (font::LINE_ADVANCE * scale) as i32;
        let widest = self
            .legend
            .iter()
            .map(|(name, _)| font::text_width(name, scale))
            .max()
            .unwrap_or(0) as i32;
        let pad = 3 * scale as i32;
        let width = pad * 3 + swatch + widest;
        let height = pad * 2 + row * self.legend.len() as i32 - (row - swatch);
        let x0 = ctx.width as i32 - width - pad * 2;
        let y0 = pad * 2 + row * 2;

        canvas.push(DrawOp::Rect {
            x: x0,
            y: y0,
            width: width as u32,
            height: height as u32,
            color: Color::WHITE.with_alpha(0.8),
        });
        for (i, (name, color)) in self.legend.iter().enumerate() {
            let y = y0 + pad + i as i32 * row;
            canvas.push(DrawOp::Rect {
                x: x0 + pad,
                y,
                width: swatch as u32,
                height: swatch as u32,
                color: *color,
            });
            canvas.push(DrawOp::Text {
                x: x0 + pad * 2 + swatch,
                y,
                text: name.clone(),
                scale,
                color: self.foreground,
            });
        }
    }
}

fn push_centred_text(canvas: &mut Canvas, at: Vec2, text: String, scale: u32, color: Color) {
    let w = font::text_width(&text, scale) as f32;
    let h = font::text_height(&text, scale) as f32;
    canvas.push(DrawOp::Text {
        x: (at.x - w / 2.0).round() as i32,
        y: (at.y - h / 2.0).round() as i32,
        text,
        scale,
        color,
    });
}

fn draw_artist(canvas: &mut Canvas, projector: &Projector, ctx: &DisplayContext, artist: &Artist3D) {
    let ppt = px_per_point(ctx);
    match artist {
        Artist3D::Line { points, style } => {
            stroke(canvas, projector, points, style.stroke_color(), style.width * ppt);
        }
        Artist3D::Segments {
            points,
            ranges,
            colors,
            style,
        } => {
            for (range, color) in ranges.iter().zip(colors) {
                let end = (range.end + 1).min(points.len());
                let start = range.start.min(end);
                let color = LineStyle { color: *color, ..*style }.stroke_color();
                stroke(canvas, projector, &points[start..end], color, style.width * ppt);
            }
        }
        Artist3D::Scatter {
            points,
            colors,
            style,
        } => {
            if colors.is_empty() {
                return;
            }
            let radius = marker_radius(ctx, style.size).max(0.5);
            let mut order: Vec<(usize, f64)> = points
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_finite())
                .map(|(i, p)| (i, projector.depth(*p)))
                .collect();
            order.sort_by(|a, b| a.1.total_cmp(&b.1));

            for (i, _) in order {
                let center = projector.screen(projector.normalise(points[i]));
                let face = colors[i % colors.len()];
                let face = face.with_alpha(style.alpha * face.a as f32 / 255.0);
                if let Some((edge, width)) = style.edge {
                    let edge_px = (width * ppt).max(1.0);
                    canvas.push(DrawOp::FilledCircle {
                        center,
                        radius: radius + edge_px / 2.0,
                        color: edge.with_alpha(style.alpha),
                    });
                    canvas.push(DrawOp::FilledCircle {
                        center,
                        radius: (radius - edge_px / 2.0).max(0.0),
                        color: face,
                    });
                } else {
                    canvas.push(DrawOp::FilledCircle { center, radius, color: face });
                }
            }
        }
    }
}

/// Stroke a polyline; consecutive points that land on the same pixel collapse into one vertex
fn stroke(canvas: &mut Canvas, projector: &Projector, points: &[DVec3], color: Color, width: f32) {
    let mut last: Option<Vec2> = None;
    let mut drawn = false;

    for p in points {
        if !p.is_finite() {
            last = None;
            continue;
        }
        let at = projector.screen(projector.normalise(*p));
        match last {
            Some(prev) if prev.round() == at.round() => {}
            Some(prev) => {
                canvas.push(DrawOp::ThickLine { from: prev, to: at, width, color });
                drawn = true;
                last = Some(at);
            }
            None => last = Some(at),
        }
    }

    // A polyline inside a single pixel still shows as a dot
    if let (false, Some(at)) = (drawn, last) {
        canvas.push(DrawOp::ThickLine { from: at, to: at, width, color });
    }
}

/// Data space → normalised box → screen pixels for one render
struct Projector {
    view: View,
    limits: [(f64, f64); 3],
    half: DVec3,
    scale: f64,
    origin: DVec3,
}

impl Projector {
    fn new(axes: &Axes3D, ctx: &DisplayContext, view: View) -> Self {
        let half = axes.box_aspect / axes.box_aspect.max_element() * 0.5;
        let title_lines = axes.title.as_deref().map_or(0, |t| t.lines().count()) as f64;
        let title_px = (title_lines * (font::LINE_ADVANCE * ctx.text_scale()) as f64).min(ctx.height as f64 * 0.3);

        let w = ctx.width as f64;
        let h = ctx.height as f64 - title_px;
        // Rotation never moves the box outside its bounding sphere
        let radius = half.length().max(f64::EPSILON);
        let scale = 0.45 * w.min(h) / radius;

        Self {
            view,
            limits: axes.limits(),
            half,
            scale,
            origin: DVec3::new(w / 2.0, title_px + h / 2.0, 0.0),
        }
    }

    fn normalise_axis(&self, axis: usize, value: f64) -> f64 {
        let (lo, hi) = self.limits[axis];
        ((value - lo) / (hi - lo) - 0.5) * 2.0 * self.half[axis]
    }

    fn normalise(&self, p: DVec3) -> DVec3 {
        DVec3::new(
            self.normalise_axis(0, p.x),
            self.normalise_axis(1, p.y),
            self.normalise_axis(2, p.z),
        )
    }

    fn depth(&self, p: DVec3) -> f64 {
        self.view.project(self.normalise(p)).z
    }

    fn screen(&self, boxed: DVec3) -> Vec2 {
        let q = self.view.project(boxed);
        Vec2::new(
            (self.origin.x + q.x * self.scale) as f32,
            (self.origin.y - q.y * self.scale) as f32,
        )
    }
}
