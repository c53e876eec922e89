use std::f64::consts::{PI, TAU};

use glam::{DVec2, DVec3};
use golden_spirals::math::{
    classic_fibonacci, extend_fibonacci, growth_per_radian, linspace, nearest_index,
    segmented_angles, AngleSegment, SafetyLimits, SpiralGenerator, SpiralParams, PHI,
};

fn golden(a: f64) -> SpiralGenerator {
    SpiralGenerator::new(SpiralParams::golden(a))
}

// ============================================================================
// Radius law
// ============================================================================

#[test]
fn test_radius_at_zero_is_scale() {
    let generator = SpiralGenerator::new(SpiralParams::golden(0.7).with_height(0.085));
    assert_eq!(generator.radius(0.0), 0.7);
    assert_eq!(generator.point_2d(0.0), DVec2::new(0.7, 0.0));
    assert_eq!(generator.point_3d(0.0), DVec3::new(0.7, 0.0, 0.0));
}

#[test]
fn test_one_turn_grows_by_phi() {
    let r = golden(1.0).radius(TAU);
    assert!((r - PHI).abs() < 1e-6, "r(2π) = {}", r);
    assert!((growth_per_radian() - PHI.ln() / TAU).abs() < 1e-15);
}

#[test]
fn test_radius_is_monotonic() {
    let theta = linspace(0.0, 200.0 * PI, 5000, true);
    for generator in [
        golden(1.0),
        golden(0.6).with_limits(SafetyLimits::new(60.0 * PI, 200.0)),
    ] {
        let radii = generator.radii(&theta);
        assert!(radii.windows(2).all(|w| w[0] <= w[1]));
    }
}

// ============================================================================
// Safety limits
// ============================================================================

#[test]
fn test_past_angle_ceiling_radius_is_capped() {
    let generator = golden(0.6).with_limits(SafetyLimits::new(60.0 * PI, 200.0));
    for theta in [60.0 * PI + 1e-9, 1e3, 1e6, 1e300, f64::INFINITY] {
        assert_eq!(generator.radius(theta), 200.0);
    }
}

#[test]
fn test_radius_cap_applies_before_angle_ceiling() {
    // 0.6·e^(bθ) passes 200 well before 60π
    let generator = golden(0.6).with_limits(SafetyLimits::new(60.0 * PI, 200.0));
    assert_eq!(generator.radius(59.0 * PI), 200.0);
    assert!(generator.radius(10.0) < 200.0);
}

#[test]
fn test_non_finite_inputs_are_substituted() {
    let generator = golden(1.0).with_limits(SafetyLimits::new(10.0, 50.0));
    assert_eq!(generator.radius(f64::NAN), 0.0);
    assert_eq!(generator.radius(f64::NEG_INFINITY), 0.0);

    let unlimited = golden(1.0);
    assert_eq!(unlimited.radius(1e6), f64::MAX);
}

#[test]
fn test_angle_ceiling_without_radius_cap_freezes_radius() {
    let limits = SafetyLimits {
        max_theta: Some(TAU),
        max_radius: None,
    };
    let generator = golden(1.0).with_limits(limits);
    assert_eq!(generator.radius(100.0), generator.radius(TAU));
}

#[test]
fn test_points_keep_order_length_and_height() {
    let theta = linspace(0.0, 80.0 * PI + 40.0, 300, true);
    let generator = SpiralGenerator::new(SpiralParams::golden(0.7).with_height(0.085))
        .with_limits(SafetyLimits::new(80.0 * PI, 300.0));
    let points = generator.points_3d(&theta);

    assert_eq!(points.len(), theta.len());
    for (p, t) in points.iter().zip(&theta) {
        assert_eq!(p.z, 0.085 * t.min(80.0 * PI));
        assert!(p.is_finite());
        assert!(p.truncate().length() <= 300.0 + 1e-9);
    }
}

#[test]
fn test_coordinates_hold_at_angle_ceiling() {
    let theta = linspace(70.0 * PI, 90.0 * PI, 200, true);
    let generator = SpiralGenerator::new(SpiralParams::golden(0.7).with_height(0.085))
        .with_limits(SafetyLimits::new(80.0 * PI, 300.0));
    let points = generator.points_3d(&theta);

    let ceiling = points[points.len() - 1];
    assert!((ceiling.z - 0.085 * 80.0 * PI).abs() < 1e-9);
    assert!((ceiling.x - 300.0).abs() < 1e-9);
    let beyond: Vec<_> = points.iter().zip(&theta).filter(|(_, t)| **t > 80.0 * PI).collect();
    assert!(!beyond.is_empty());
    assert!(beyond.iter().all(|(p, _)| (**p - ceiling).length() < 1e-9));

    // the angle sequence itself is untouched
    assert!(theta.windows(2).all(|w| w[0] < w[1]));
}

// ============================================================================
// Angle segments
// ============================================================================

#[test]
fn test_segment_junction_is_not_duplicated() {
    let angles = segmented_angles(&[AngleSegment::new(TAU, 8), AngleSegment::new(TAU, 8)]).unwrap();

    assert_eq!(angles.len(), 16);
    assert_eq!(angles.boundaries, vec![0, 8, 16]);
    assert!(angles.theta.windows(2).all(|w| w[0] < w[1]));
    assert!((angles.theta[8] - TAU).abs() < 1e-12);
    assert!(angles.max() < 2.0 * TAU);
}

#[test]
fn test_unequal_segments_keep_their_ranges() {
    let angles = segmented_angles(&[
        AngleSegment::new(3.0, 3),
        AngleSegment::new(1.0, 0),
        AngleSegment::new(2.0, 4),
    ])
    .unwrap();

    assert_eq!(angles.segment_count(), 3);
    assert_eq!(angles.segment_range(1), 3..3);
    assert_eq!(angles.segment_range(2), 3..7);
    assert_eq!(angles.theta[3], 4.0);
}

#[test]
fn test_invalid_span_is_an_error() {
    assert!(segmented_angles(&[AngleSegment::new(0.0, 4)]).is_err());
    assert!(segmented_angles(&[AngleSegment::new(f64::NAN, 4)]).is_err());
}

#[test]
fn test_nearest_index_picks_closest_sample() {
    let theta = [0.0, 1.0, 2.0, 4.0];
    assert_eq!(nearest_index(&theta, -3.0), Some(0));
    assert_eq!(nearest_index(&theta, 2.9), Some(2));
    assert_eq!(nearest_index(&theta, 3.0), Some(2));
    assert_eq!(nearest_index(&theta, 9.0), Some(3));
    assert_eq!(nearest_index(&[], 1.0), None);
}

// ============================================================================
// Fibonacci
// ============================================================================

#[test]
fn test_fibonacci_extension() {
    assert_eq!(extend_fibonacci([1, 1], 5), vec![1, 1, 2, 3, 5, 8, 13]);
    assert_eq!(extend_fibonacci([1, 1], 0), vec![1, 1]);
    assert_eq!(&classic_fibonacci(6)[..], &[1, 1, 2, 3, 5, 8]);
}

#[test]
fn test_fibonacci_stops_before_overflow() {
    let fib = extend_fibonacci([1, 1], 500);
    assert!(fib.len() < 502);
    assert!(fib.windows(3).all(|w| w[0] + w[1] == w[2]));
}
