use anyhow::Result;

use super::{Figure, Sketch};
use crate::core::{DisplayContext, Turtle};
use crate::math::{extend_fibonacci, Color};

const EXTRA_TERMS: usize = 9;
const SCALE: f64 = 6.0;
const EVEN_FILL: Color = Color::rgb(0xff, 0xd7, 0x00);

/// Filled golden rectangles turning around a shared corner
pub struct GoldenRectangles;

impl Sketch for GoldenRectangles {
    fn name(&self) -> &'static str {
        "golden-rectangles"
    }

    fn title(&self) -> &'static str {
        "Filled golden rectangles on navy"
    }

    fn build(&self, _ctx: &DisplayContext) -> Result<Figure> {
        let fib = extend_fibonacci([1, 1], EXTRA_TERMS);

        let mut t = Turtle::new();
        t.pencolor(Color::GOLD);
        t.pensize(3.0);

        for i in 1..fib.len() {
            let long = fib[i] as f64 * SCALE;
            let short = fib[i - 1] as f64 * SCALE;

            t.fillcolor(if i % 2 == 1 { Color::GOLD } else { EVEN_FILL });
            t.begin_fill();
            for _ in 0..2 {
                t.forward(long);
                t.left(90.0);
                t.forward(short);
                t.left(90.0);
            }
            t.end_fill();

            t.forward(long);
            t.left(90.0);
        }

        Ok(Figure::Turtle(t.finish(Color::NAVY)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TurtleCommand;

    #[test]
    fn one_fill_per_rectangle() {
        let Figure::Turtle(drawing) = GoldenRectangles.build(&DisplayContext::new(400, 400)).unwrap()
        else {
            panic!("expected a turtle drawing");
        };
        let fills = drawing
            .commands
            .iter()
            .filter(|c| matches!(c, TurtleCommand::Fill { .. }))
            .count();
        assert_eq!(fills, EXTRA_TERMS + 1);
        assert!(matches!(drawing.commands[0], TurtleCommand::Fill { .. }));
    }
}
