use anyhow::Result;

use super::{Figure, Sketch};
use crate::core::{DisplayContext, Turtle};
use crate::math::{classic_fibonacci, Color};

const EXTRA_TERMS: usize = 13;
const SCALE: f64 = 6.0;
/// East, north, west, south
const HEADINGS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

/// Fibonacci squares stepping around the compass
pub struct FibClassic;

impl Sketch for FibClassic {
    fn name(&self) -> &'static str {
        "fib-classic"
    }

    fn title(&self) -> &'static str {
        "Classic Fibonacci squares, gold on black"
    }

    fn build(&self, _ctx: &DisplayContext) -> Result<Figure> {
        let fib = classic_fibonacci(EXTRA_TERMS);

        let mut t = Turtle::new();
        t.pencolor(Color::GOLD);
        t.pensize(2.0);

        for (i, &side) in fib.iter().enumerate() {
            let length = side as f64 * SCALE;
            for _ in 0..4 {
                t.forward(length);
                t.left(90.0);
            }

            t.penup();
            t.setheading(HEADINGS[i % HEADINGS.len()]);
            t.forward(length);
            t.pendown();
        }

        Ok(Figure::Turtle(t.finish(Color::BLACK)))
    }
}
