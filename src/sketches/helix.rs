use std::f64::consts::PI;

use anyhow::Result;
use glam::DVec3;

use super::{Figure, Sketch};
use crate::core::DisplayContext;
use crate::math::{linspace, Color, SpiralGenerator, SpiralParams};
use crate::plot::{Axes3D, LineStyle};

/// Bare golden helix in a tall box
pub struct Helix;

impl Sketch for Helix {
    fn name(&self) -> &'static str {
        "helix"
    }

    fn title(&self) -> &'static str {
        "Golden helix with a linear rise, axes hidden"
    }

    fn build(&self, _ctx: &DisplayContext) -> Result<Figure> {
        let theta = linspace(0.0, 20.0 * PI, 4000, true);
        let params = SpiralParams::golden(1.0).with_height(0.4);
        let points = SpiralGenerator::new(params).points_3d(&theta);

        let mut axes = Axes3D::new();
        axes.plot(points, LineStyle::new(Color::GOLD, 1.6));
        axes.set_box_aspect(DVec3::new(1.0, 1.0, 1.6));
        axes.axis(false);

        Ok(Figure::Plot3D(axes))
    }
}
