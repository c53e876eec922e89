use glam::{DVec2, DVec3};

use super::golden::growth_per_radian;

/// Constants of the logarithmic spiral `r = a * e^(b * theta)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralParams {
    /// Radius at theta = 0
    pub a: f64,
    /// Growth rate per radian
    pub b: f64,
    /// z rise per radian for 3D variants
    pub height_per_radian: f64,
}

impl SpiralParams {
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            a,
            b,
            height_per_radian: 0.0,
        }
    }

    /// Golden spiral: the radius grows by φ every full turn
    pub fn golden(a: f64) -> Self {
        Self::new(a, growth_per_radian())
    }

    pub fn with_height(mut self, height_per_radian: f64) -> Self {
        self.height_per_radian = height_per_radian;
        self
    }
}

/// Overflow guards applied while evaluating the radius law
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SafetyLimits {
    /// Angles beyond this are not fed to `exp`
    pub max_theta: Option<f64>,
    /// Hard cap on the radius
    pub max_radius: Option<f64>,
}

impl SafetyLimits {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(max_theta: f64, max_radius: f64) -> Self {
        Self {
            max_theta: Some(max_theta),
            max_radius: Some(max_radius),
        }
    }

    fn substitute(&self, r: f64) -> f64 {
        let ceiling = self.max_radius.unwrap_or(f64::MAX);
        let r = if r.is_nan() {
            0.0
        } else if r == f64::INFINITY {
            ceiling
        } else if r == f64::NEG_INFINITY {
            0.0
        } else {
            r
        };

        match self.max_radius {
            // NaN ceiling leaves r uncapped; a negative one pins it to 0
            Some(max) => r.min(max).max(0.0),
            None => r,
        }
    }

    /// `theta` held at the angle ceiling; NaN passes through
    fn clamp_angle(&self, theta: f64) -> f64 {
        match self.max_theta {
            Some(max_theta) if theta > max_theta => max_theta,
            _ => theta,
        }
    }
}

/// Maps angle samples onto a logarithmic spiral
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralGenerator {
    pub params: SpiralParams,
    pub limits: SafetyLimits,
}

impl SpiralGenerator {
    pub fn new(params: SpiralParams) -> Self {
        Self {
            params,
            limits: SafetyLimits::none(),
        }
    }

    pub fn with_limits(mut self, limits: SafetyLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Angle actually evaluated for `theta`: never beyond the angle ceiling
    pub fn clamped_angle(&self, theta: f64) -> f64 {
        self.limits.clamp_angle(theta)
    }

    /// Every angle held at the ceiling, order and length preserved
    pub fn clamped_angles(&self, theta: &[f64]) -> Vec<f64> {
        theta.iter().map(|&t| self.clamped_angle(t)).collect()
    }

    /// Radius at `theta`; past the angle ceiling this is the radius ceiling, or the
    /// law at the angle ceiling when no radius ceiling is set.
    /// Never returns NaN or infinity when a radius ceiling is set.
    pub fn radius(&self, theta: f64) -> f64 {
        let SpiralParams { a, b, .. } = self.params;

        let r = match (self.limits.max_theta, self.limits.max_radius) {
            (Some(max_theta), Some(max_radius)) if theta > max_theta => max_radius,
            _ => a * (b * self.clamped_angle(theta)).exp(),
        };

        self.limits.substitute(r)
    }

    pub fn height(&self, theta: f64) -> f64 {
        self.params.height_per_radian * self.clamped_angle(theta)
    }

    pub fn point_2d(&self, theta: f64) -> DVec2 {
        let r = self.radius(theta);
        let theta = self.clamped_angle(theta);
        DVec2::new(r * theta.cos(), r * theta.sin())
    }

    /// x, y and z all follow the clamped angle, so they stay index-aligned
    pub fn point_3d(&self, theta: f64) -> DVec3 {
        let r = self.radius(theta);
        let theta = self.clamped_angle(theta);
        DVec3::new(r * theta.cos(), r * theta.sin(), self.height(theta))
    }

    pub fn radii(&self, theta: &[f64]) -> Vec<f64> {
        theta.iter().map(|&t| self.radius(t)).collect()
    }

    /// One point per angle, in input order
    pub fn points_2d(&self, theta: &[f64]) -> Vec<DVec2> {
        theta.iter().map(|&t| self.point_2d(t)).collect()
    }

    /// One point per angle, in input order
    pub fn points_3d(&self, theta: &[f64]) -> Vec<DVec3> {
        theta.iter().map(|&t| self.point_3d(t)).collect()
    }
}
