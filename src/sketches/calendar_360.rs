use std::f64::consts::{PI, TAU};

use anyhow::Result;

use super::{Figure, Sketch};
use crate::core::DisplayContext;
use crate::math::{
    plasma_gradient, segmented_angles, AngleSegment, Color, SafetyLimits, SpiralGenerator,
    SpiralParams,
};
use crate::plot::{Axes3D, LineStyle, MarkerStyle};

const DAYS_PER_MONTH: [u32; 12] = [28, 28, 29, 30, 29, 30, 28, 29, 30, 28, 30, 29];
const REVOLUTIONS_PER_DAY: f64 = 24.0;
const MAX_THETA: f64 = 60.0 * PI;
const MAX_RADIUS: f64 = 200.0;

/// Month segments of varying density: one revolution per hour, 28 to 30 samples per revolution
pub(super) fn month_segments(days: &[u32], revolutions_per_day: f64) -> Vec<AngleSegment> {
    days.iter()
        .enumerate()
        .map(|(month, &days)| {
            let revolutions = days as f64 * revolutions_per_day;
            let points_per_rev = 28 + (month % 3);
            let points = (revolutions * points_per_rev as f64) as usize + 1;
            AngleSegment::new(revolutions * TAU, points)
        })
        .collect()
}

/// Largest finite radius, widened for axis limits
pub(super) fn radial_extent(radii: &[f64], fallback: f64) -> f64 {
    radii
        .iter()
        .copied()
        .filter(|r| r.is_finite())
        .reduce(f64::max)
        .map_or(fallback, |r| r * 1.15)
}

/// Twelve-month calendar wound onto a capped golden spiral
pub struct Calendar360;

impl Sketch for Calendar360 {
    fn name(&self) -> &'static str {
        "calendar-360"
    }

    fn title(&self) -> &'static str {
        "Calendar golden spiral, 24 revolutions per day, plasma gradient"
    }

    fn build(&self, _ctx: &DisplayContext) -> Result<Figure> {
        let angles = segmented_angles(&month_segments(&DAYS_PER_MONTH, REVOLUTIONS_PER_DAY))?;
        let generator = SpiralGenerator::new(SpiralParams::golden(0.6).with_height(0.09))
            .with_limits(SafetyLimits::new(MAX_THETA, MAX_RADIUS));

        let radii = generator.radii(&angles.theta);
        let points = generator.points_3d(&angles.theta);
        let colors = plasma_gradient(points.len(), 0.1, 0.95);
        log::debug!("{}: {} points, {} months", self.name(), points.len(), angles.segment_count());

        let max_r = radial_extent(&radii, 50.0);
        let max_z = points.iter().map(|p| p.z).fold(0.0, f64::max);

        let mut axes = Axes3D::new();
        axes.plot(points.clone(), LineStyle::new(Color::GOLDENROD, 1.1).alpha(0.92));
        axes.scatter(points, colors, MarkerStyle::new(1.2, 0.6));
        axes.set_labels("X", "Y", "Z (time · height)");

        let total_days: u32 = DAYS_PER_MONTH.iter().sum();
        axes.set_title(format!(
            "Golden spiral – calendar metaphor\n\
             12 months • {} days • ≈ {:.1} years of hours\n\
             (28/29/30 days per month • {} rev/day • golden ratio growth)\n\
             Radius capped at {:.1} units",
            total_days,
            total_days as f64 / 365.25,
            REVOLUTIONS_PER_DAY,
            MAX_RADIUS
        ));
        axes.view_init(22.0, -58.0);
        axes.set_xlim(-max_r, max_r);
        axes.set_ylim(-max_r, max_r);
        axes.set_zlim(0.0, max_z * 1.1);
        axes.grid(Some(0.12));

        Ok(Figure::Plot3D(axes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_sample_counts_follow_density_cycle() {
        let segments = month_segments(&DAYS_PER_MONTH[..3], REVOLUTIONS_PER_DAY);
        assert_eq!(segments[0].points, 28 * 24 * 28 + 1);
        assert_eq!(segments[1].points, 28 * 24 * 29 + 1);
        assert_eq!(segments[2].points, 29 * 24 * 30 + 1);
    }

    #[test]
    fn extent_ignores_non_finite_radii() {
        assert!((radial_extent(&[1.0, f64::NAN, 200.0], 50.0) - 230.0).abs() < 1e-9);
        assert_eq!(radial_extent(&[f64::NAN], 50.0), 50.0);
    }
}
