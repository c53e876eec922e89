use std::f64::consts::TAU;

use anyhow::Result;

use super::{Figure, Sketch};
use crate::core::DisplayContext;
use crate::math::{segmented_angles, AngleSegment, Color, SpiralGenerator, SpiralParams, PHI};
use crate::plot::{Axes3D, LineStyle};

const TOTAL_REVOLUTIONS: f64 = 360.0;
const CYCLES: usize = 12;
/// Samples per cycle, one entry per cycle
const POINTS_PER_CYCLE: [usize; CYCLES] = [28, 28, 28, 28, 29, 29, 29, 29, 30, 30, 30, 30];

/// 360 revolutions split into twelve cycles of varying density
pub struct Cycles360;

impl Sketch for Cycles360 {
    fn name(&self) -> &'static str {
        "cycles-360"
    }

    fn title(&self) -> &'static str {
        "3D golden spiral, 360 revolutions in 12 cycles"
    }

    fn build(&self, _ctx: &DisplayContext) -> Result<Figure> {
        let span = TAU * TOTAL_REVOLUTIONS / CYCLES as f64;
        let segments: Vec<AngleSegment> = POINTS_PER_CYCLE
            .iter()
            .map(|&points| AngleSegment::new(span, points))
            .collect();
        let angles = segmented_angles(&segments)?;

        let params = SpiralParams::golden(0.8).with_height(0.12);
        let points = SpiralGenerator::new(params).points_3d(&angles.theta);
        log::debug!("{}: {} points up to theta {:.1}", self.name(), points.len(), angles.max());

        let mut axes = Axes3D::new();
        axes.plot(points, LineStyle::new(Color::GOLDENROD, 1.4).alpha(0.92));
        axes.set_labels("X", "Y", "Z");
        axes.set_title(format!(
            "3D Golden Spiral – {} revolutions in {} cycles\n\
             (28–29–30 points/rev)   •   growth factor φ ≈ {:.8}",
            TOTAL_REVOLUTIONS, CYCLES, PHI
        ));
        axes.view_init(18.0, 135.0);
        axes.grid(Some(0.15));

        Ok(Figure::Plot3D(axes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_point_per_sample() {
        let Figure::Plot3D(axes) = Cycles360.build(&DisplayContext::new(300, 300)).unwrap() else {
            panic!("expected 3D axes");
        };
        let total: usize = POINTS_PER_CYCLE.iter().sum();
        match &axes.artists()[0] {
            crate::plot::Artist3D::Line { points, .. } => assert_eq!(points.len(), total),
            other => panic!("unexpected artist {:?}", other),
        }
    }
}
