use anyhow::Result;
use glam::DVec2;

use super::{Figure, Sketch};
use crate::core::{DisplayContext, Turtle};
use crate::math::{extend_fibonacci, Color, Palette};

const EXTRA_TERMS: usize = 11;
const SCALE: f64 = 7.0;
const PALETTE: [&str; 5] = ["#ffbe0b", "#fb5607", "#ff006e", "#8338ec", "#3a86ff"];

/// Labelled Fibonacci squares, each a new colour and a thicker pen
pub struct FibSquares;

impl Sketch for FibSquares {
    fn name(&self) -> &'static str {
        "fib-squares"
    }

    fn title(&self) -> &'static str {
        "Coloured Fibonacci squares with term labels"
    }

    fn build(&self, ctx: &DisplayContext) -> Result<Figure> {
        let fib = extend_fibonacci([1, 1], EXTRA_TERMS);
        let palette = Palette::from_hex(&PALETTE)?;

        let mut t = Turtle::new();
        t.textscale(ctx.text_scale());

        for (i, &side) in fib.iter().enumerate() {
            let length = side as f64 * SCALE;
            t.pencolor(palette.get(i));
            t.pensize(2.5 + i as f32 * 0.4);

            for _ in 0..4 {
                t.forward(length);
                t.left(90.0);
            }

            t.penup();
            t.goto(t.position() + DVec2::splat(length / 3.0));
            t.pencolor(Color::WHITE);
            t.write(format!("F{} = {}", i + 1, side));

            t.forward(length);
            t.right(90.0);
            t.pendown();
        }

        Ok(Figure::Turtle(t.finish(Color::BLACK)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TurtleCommand;

    #[test]
    fn every_term_gets_a_square_and_a_label() {
        let Figure::Turtle(drawing) = FibSquares.build(&DisplayContext::new(400, 400)).unwrap() else {
            panic!("expected a turtle drawing");
        };
        let labels: Vec<&str> = drawing
            .commands
            .iter()
            .filter_map(|c| match c {
                TurtleCommand::Write { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let strokes = drawing
            .commands
            .iter()
            .filter(|c| matches!(c, TurtleCommand::Stroke { .. }))
            .count();

        assert_eq!(labels.len(), EXTRA_TERMS + 2);
        assert_eq!(labels[0], "F1 = 1");
        assert_eq!(labels[12], "F13 = 233");
        assert_eq!(strokes, 4 * (EXTRA_TERMS + 2));
    }
}
