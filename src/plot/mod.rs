//! Minimal 2D/3D axes that rasterise onto a [`Canvas`](crate::core::Canvas)

pub mod axes2d;
pub mod axes3d;
pub mod ticks;
pub mod view;

pub use axes2d::Axes2D;
pub use axes3d::{Artist3D, Axes3D};
pub use view::{OrbitCamera, View};

use crate::core::DisplayContext;
use crate::math::Color;

/// Stroke colour, width in points, and opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
    pub alpha: f32,
}

impl LineStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            alpha: 1.0,
        }
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn stroke_color(&self) -> Color {
        self.color.with_alpha(self.alpha * self.color.a as f32 / 255.0)
    }
}

/// Marker area in points², opacity, and optional outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub size: f32,
    pub alpha: f32,
    pub edge: Option<(Color, f32)>,
}

impl MarkerStyle {
    pub fn new(size: f32, alpha: f32) -> Self {
        Self {
            size,
            alpha,
            edge: None,
        }
    }

    pub fn edge(mut self, color: Color, width: f32) -> Self {
        self.edge = Some((color, width));
        self
    }
}

/// Pixels per typographic point, treating the short side as an 8 inch figure edge
pub fn px_per_point(ctx: &DisplayContext) -> f32 {
    ctx.min_side() as f32 / (8.0 * 72.0)
}

/// Marker radius in pixels for an area given in points²
pub fn marker_radius(ctx: &DisplayContext, size: f32) -> f32 {
    size.max(0.0).sqrt() * 0.5 * px_per_point(ctx)
}

/// Data range with degenerate spans widened so it can be normalised
pub fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    if hi - lo <= f64::EPSILON * hi.abs().max(1.0) {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}
