use glam::{DVec2, Vec2};

use super::canvas::{Canvas, DrawOp};
use super::display_context::DisplayContext;
use super::font;
use crate::math::Color;

/// Recorded turtle output, in world units (y up, origin at screen centre)
#[derive(Debug, Clone, PartialEq)]
pub enum TurtleCommand {
    Stroke { from: DVec2, to: DVec2, color: Color, width: f32 },
    Fill { points: Vec<DVec2>, color: Color },
    Write { at: DVec2, text: String, color: Color, scale: u32 },
}

#[derive(Debug, Clone)]
struct FillState {
    insert_at: usize,
    vertices: Vec<DVec2>,
}

/// Imperative cursor: position, heading in degrees (0 = east, counter-clockwise), pen and fill state
#[derive(Debug, Clone)]
pub struct Turtle {
    position: DVec2,
    heading: f64,
    pen_down: bool,
    pen_color: Color,
    pen_size: f32,
    fill_color: Color,
    text_scale: u32,
    fill: Option<FillState>,
    commands: Vec<TurtleCommand>,
}

impl Default for Turtle {
    fn default() -> Self {
        Self::new()
    }
}

impl Turtle {
    pub fn new() -> Self {
        Self {
            position: DVec2::ZERO,
            heading: 0.0,
            pen_down: true,
            pen_color: Color::BLACK,
            pen_size: 1.0,
            fill_color: Color::BLACK,
            text_scale: 2,
            fill: None,
            commands: Vec::new(),
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn commands(&self) -> &[TurtleCommand] {
        &self.commands
    }

    pub fn pencolor(&mut self, color: Color) {
        self.pen_color = color;
    }

    pub fn pensize(&mut self, width: f32) {
        self.pen_size = width.max(0.0);
    }

    pub fn fillcolor(&mut self, color: Color) {
        self.fill_color = color;
    }

    /// Glyph scale used by `write`
    pub fn textscale(&mut self, scale: u32) {
        self.text_scale = scale.max(1);
    }

    pub fn penup(&mut self) {
        self.pen_down = false;
    }

    pub fn pendown(&mut self) {
        self.pen_down = true;
    }

    pub fn left(&mut self, degrees: f64) {
        self.heading = (self.heading + degrees).rem_euclid(360.0);
    }

    pub fn right(&mut self, degrees: f64) {
        self.left(-degrees);
    }

    pub fn setheading(&mut self, degrees: f64) {
        self.heading = degrees.rem_euclid(360.0);
    }

    /// Unit vector along the heading; exact for right angles
    fn direction(&self) -> DVec2 {
        match self.heading {
            h if h == 0.0 => DVec2::X,
            h if h == 90.0 => DVec2::Y,
            h if h == 180.0 => DVec2::NEG_X,
            h if h == 270.0 => DVec2::NEG_Y,
            h => {
                let (sin, cos) = h.to_radians().sin_cos();
                DVec2::new(cos, sin)
            }
        }
    }

    pub fn forward(&mut self, distance: f64) {
        let target = self.position + self.direction() * distance;
        self.goto(target);
    }

    /// Move to `target`, drawing when the pen is down
    pub fn goto(&mut self, target: DVec2) {
        if self.pen_down && self.pen_size > 0.0 {
            self.commands.push(TurtleCommand::Stroke {
                from: self.position,
                to: target,
                color: self.pen_color,
                width: self.pen_size,
            });
        }
        if let Some(fill) = self.fill.as_mut() {
            fill.vertices.push(target);
        }
        self.position = target;
    }

    /// Start recording a fill polygon; it renders beneath strokes drawn after this call
    pub fn begin_fill(&mut self) {
        self.fill = Some(FillState {
            insert_at: self.commands.len(),
            vertices: vec![self.position],
        });
    }

    pub fn end_fill(&mut self) {
        if let Some(fill) = self.fill.take() {
            if fill.vertices.len() >= 3 {
                self.commands.insert(
                    fill.insert_at,
                    TurtleCommand::Fill {
                        points: fill.vertices,
                        color: self.fill_color,
                    },
                );
            }
        }
    }

    /// Write text with its lower-left corner at the current position
    pub fn write(&mut self, text: impl Into<String>) {
        self.commands.push(TurtleCommand::Write {
            at: self.position,
            text: text.into(),
            color: self.pen_color,
            scale: self.text_scale,
        });
    }

    pub fn finish(self, background: Color) -> TurtleDrawing {
        TurtleDrawing {
            commands: self.commands,
            background,
        }
    }
}

/// Finished turtle drawing ready for rasterisation
#[derive(Debug, Clone)]
pub struct TurtleDrawing {
    pub commands: Vec<TurtleCommand>,
    pub background: Color,
}

impl TurtleDrawing {
    /// World origin at the canvas centre, one world unit per pixel, y up
    pub fn to_screen(ctx: &DisplayContext, p: DVec2) -> Vec2 {
        Vec2::new(
            (ctx.width as f64 / 2.0 + p.x) as f32,
            (ctx.height as f64 / 2.0 - p.y) as f32,
        )
    }

    pub fn render(&self, ctx: &DisplayContext) -> Canvas {
        let mut canvas = Canvas::new(ctx.width, ctx.height);
        canvas.push(DrawOp::Clear(self.background));

        for command in &self.commands {
            let op = match command {
                TurtleCommand::Stroke { from, to, color, width } => DrawOp::ThickLine {
                    from: Self::to_screen(ctx, *from),
                    to: Self::to_screen(ctx, *to),
                    width: *width,
                    color: *color,
                },
                TurtleCommand::Fill { points, color } => DrawOp::Polygon {
                    points: points.iter().map(|p| Self::to_screen(ctx, *p)).collect(),
                    color: *color,
                },
                TurtleCommand::Write { at, text, color, scale } => {
                    let anchor = Self::to_screen(ctx, *at);
                    let height = font::text_height(text, *scale) as f32;
                    DrawOp::Text {
                        x: anchor.x.round() as i32,
                        y: (anchor.y - height).round() as i32,
                        text: text.clone(),
                        scale: *scale,
                        color: *color,
                    }
                }
            };
            canvas.push(op);
        }

        canvas.execute_ops()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_returns_to_start() {
        let mut t = Turtle::new();
        for _ in 0..4 {
            t.forward(10.0);
            t.left(90.0);
        }
        assert_eq!(t.position(), DVec2::ZERO);
        assert_eq!(t.heading(), 0.0);
        assert_eq!(t.commands().len(), 4);
    }

    #[test]
    fn pen_up_moves_without_drawing() {
        let mut t = Turtle::new();
        t.penup();
        t.forward(5.0);
        assert!(t.commands().is_empty());
        assert_eq!(t.position(), DVec2::new(5.0, 0.0));
    }

    #[test]
    fn right_turn_wraps_heading() {
        let mut t = Turtle::new();
        t.right(90.0);
        assert_eq!(t.heading(), 270.0);
        t.forward(3.0);
        assert_eq!(t.position(), DVec2::new(0.0, -3.0));
    }

    #[test]
    fn fill_is_inserted_before_its_strokes() {
        let mut t = Turtle::new();
        t.forward(1.0);
        t.begin_fill();
        t.forward(2.0);
        t.left(90.0);
        t.forward(2.0);
        t.end_fill();

        assert!(matches!(t.commands()[0], TurtleCommand::Stroke { .. }));
        assert!(matches!(t.commands()[1], TurtleCommand::Fill { .. }));
        assert_eq!(t.commands().len(), 4);
    }

    #[test]
    fn render_centres_origin() {
        let mut t = Turtle::new();
        t.pencolor(Color::WHITE);
        t.forward(10.0);
        let canvas = t.finish(Color::BLACK).render(&DisplayContext::new(40, 40));

        assert_eq!(canvas.pixel(20, 20), Some(Color::WHITE));
        assert_eq!(canvas.pixel(30, 20), Some(Color::WHITE));
        assert_eq!(canvas.pixel(20, 25), Some(Color::BLACK));
    }
}
