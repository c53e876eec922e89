use anyhow::Result;

use super::{Figure, Sketch};
use crate::core::DisplayContext;
use crate::math::{linspace, revolutions, Color, SpiralGenerator, SpiralParams};
use crate::plot::{Axes2D, LineStyle};

const TURNS: f64 = 12.0;
const SAMPLES: usize = 2000;

/// Flat golden spiral, gold on black
pub struct GoldenSpiral;

impl Sketch for GoldenSpiral {
    fn name(&self) -> &'static str {
        "golden-spiral"
    }

    fn title(&self) -> &'static str {
        "2D golden spiral over twelve turns"
    }

    fn build(&self, _ctx: &DisplayContext) -> Result<Figure> {
        let theta = linspace(0.0, revolutions(TURNS), SAMPLES, true);
        let points = SpiralGenerator::new(SpiralParams::golden(1.0)).points_2d(&theta);

        let mut axes = Axes2D::new()
            .facecolor(Color::BLACK)
            .equal_aspect(true)
            .axis(false);
        axes.plot(points, LineStyle::new(Color::GOLD, 1.8));

        Ok(Figure::Plot2D(axes))
    }
}
