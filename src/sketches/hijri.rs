use std::f64::consts::{PI, TAU};

use anyhow::Result;

use super::calendar_360::{month_segments, radial_extent};
use super::{Figure, Sketch};
use crate::core::{Animation, DisplayContext, FrameInfo};
use crate::math::{
    nearest_index, segmented_angles, tab20_sample, Color, SafetyLimits, SpiralGenerator,
    SpiralParams, PHI,
};
use crate::plot::{Axes3D, LineStyle, MarkerStyle, View};

const MONTHS: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qa'dah",
    "Dhu al-Hijjah",
];
const DAYS_PER_MONTH: [u32; 12] = [29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30];
/// Roughly one lunar day
const REVOLUTIONS_PER_DAY: f64 = 23.75;
const MAX_THETA: f64 = 80.0 * PI;
const MAX_RADIUS: f64 = 300.0;

const FRAMES: u64 = 400;
const FRAME_INTERVAL_MS: u64 = 40;

/// Camera of the rotating animation at `frame`
pub fn hijri_view(frame: u64) -> View {
    let f = frame as f64;
    View::new(20.0 + 8.0 * (f * 0.04).sin(), -60.0 + f * 0.9)
}

/// Angles of the samples nearest to each day start, probed once per revolution up to the largest angle
pub(crate) fn day_marker_angles(theta: &[f64], revolutions_per_day: f64) -> Vec<f64> {
    let last_rev = theta.iter().copied().fold(0.0, f64::max) / TAU;
    let step = 1.0;

    let mut markers = Vec::new();
    let mut rev = 0.0;
    while rev < last_rev {
        if rev % revolutions_per_day < step / 2.0 {
            if let Some(idx) = nearest_index(theta, rev * TAU) {
                markers.push(theta[idx]);
            }
        }
        rev += step;
    }
    markers
}

/// Hijri year on a capped golden spiral, one colour band per month, with a rotating camera
pub struct Hijri;

impl Sketch for Hijri {
    fn name(&self) -> &'static str {
        "hijri"
    }

    fn title(&self) -> &'static str {
        "Hijri calendar golden spiral with day markers, rotating"
    }

    fn build(&self, _ctx: &DisplayContext) -> Result<Figure> {
        let angles = segmented_angles(&month_segments(&DAYS_PER_MONTH, REVOLUTIONS_PER_DAY))?;
        let generator = SpiralGenerator::new(SpiralParams::golden(0.7).with_height(0.085))
            .with_limits(SafetyLimits::new(MAX_THETA, MAX_RADIUS));

        let radii = generator.radii(&angles.theta);
        let points = generator.points_3d(&angles.theta);
        let max_r = radial_extent(&radii, 50.0);
        let max_z = points.iter().map(|p| p.z).fold(0.0, f64::max);

        let month_colors: Vec<Color> = (0..MONTHS.len())
            .map(|m| tab20_sample(m as f64 / (MONTHS.len() - 1) as f64))
            .collect();
        let ranges = (0..angles.segment_count()).map(|m| angles.segment_range(m)).collect();

        let clamped = generator.clamped_angles(&angles.theta);
        let day_theta = day_marker_angles(&clamped, REVOLUTIONS_PER_DAY);
        let day_points = generator.points_3d(&day_theta);
        log::debug!(
            "{}: {} points, {} day markers",
            self.name(),
            points.len(),
            day_points.len()
        );

        let mut axes = Axes3D::new();
        axes.plot_segments(
            points,
            ranges,
            month_colors.clone(),
            LineStyle::new(Color::GOLDENROD, 1.4).alpha(0.88),
        );
        axes.scatter(
            day_points,
            vec![Color::WHITE],
            MarkerStyle::new(20.0, 0.7).edge(Color::LIME, 0.8),
        );
        axes.set_labels("X", "Y", "Z (Time)");

        let total_days: u32 = DAYS_PER_MONTH.iter().sum();
        axes.set_title(format!(
            "Golden Spiral – Hijri Calendar Metaphor\n\
             12 months • {} days • {:.2} rev/day\n\
             Growth factor φ ≈ {:.8} • radius capped at {:.1}",
            total_days, REVOLUTIONS_PER_DAY, PHI, MAX_RADIUS
        ));
        axes.set_xlim(-max_r, max_r);
        axes.set_ylim(-max_r, max_r);
        axes.set_zlim(0.0, max_z * 1.1);
        axes.grid(Some(0.1));
        axes.set_legend(
            MONTHS
                .iter()
                .map(|name| name.to_string())
                .zip(month_colors)
                .collect(),
        );
        axes.view_init(20.0, -60.0);

        Ok(Figure::Plot3D(axes))
    }

    fn animation(&self) -> Option<Animation> {
        Some(Animation::new(FRAMES, FRAME_INTERVAL_MS))
    }

    fn view_at(&self, frame: &FrameInfo) -> Option<View> {
        Some(hijri_view(frame.number))
    }
}
