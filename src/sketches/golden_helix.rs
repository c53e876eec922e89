use std::f64::consts::PI;

use anyhow::Result;

use super::{Figure, Sketch};
use crate::core::DisplayContext;
use crate::math::{linspace, Color, SpiralGenerator, SpiralParams};
use crate::plot::{Axes3D, LineStyle};

const HEIGHT_PER_RADIAN: f64 = 0.5;
const SAMPLES: usize = 10_000;

/// Golden spiral lifted into a rising helix
pub struct GoldenHelix;

impl Sketch for GoldenHelix {
    fn name(&self) -> &'static str {
        "golden-helix"
    }

    fn title(&self) -> &'static str {
        "3D golden spiral using the golden ratio and pi"
    }

    fn build(&self, _ctx: &DisplayContext) -> Result<Figure> {
        let theta = linspace(0.0, 20.0 * PI, SAMPLES, true);
        let params = SpiralParams::golden(1.0).with_height(HEIGHT_PER_RADIAN);
        let points = SpiralGenerator::new(params).points_3d(&theta);

        let mut axes = Axes3D::new();
        axes.plot(points, LineStyle::new(Color::GOLDENROD, 2.0));
        axes.set_labels("X", "Y", "Z");
        axes.set_title("3D Golden Spiral using Golden Ratio and Pi");

        Ok(Figure::Plot3D(axes))
    }
}
