use std::ops::Range;

use anyhow::{bail, Result};

/// Evenly spaced samples over `[start, end]` (or `[start, end)` without the endpoint)
pub fn linspace(start: f64, end: f64, n: usize, endpoint: bool) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let divisions = if endpoint { n - 1 } else { n } as f64;
            let step = (end - start) / divisions;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// One run of angle samples covering `span` radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSegment {
    pub span: f64,
    pub points: usize,
}

impl AngleSegment {
    pub fn new(span: f64, points: usize) -> Self {
        Self { span, points }
    }
}

/// Concatenated angle samples with the index where each segment starts
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedAngles {
    pub theta: Vec<f64>,
    /// `boundaries[k]..boundaries[k + 1]` is segment `k`; starts at 0, ends at `theta.len()`
    pub boundaries: Vec<usize>,
}

impl SegmentedAngles {
    pub fn len(&self) -> usize {
        self.theta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.boundaries.len().saturating_sub(1)
    }

    pub fn segment_range(&self, segment: usize) -> Range<usize> {
        self.boundaries[segment]..self.boundaries[segment + 1]
    }

    /// Largest sample, 0.0 when empty
    pub fn max(&self) -> f64 {
        self.theta.last().copied().unwrap_or(0.0)
    }
}

/// Sample each segment endpoint-exclusive starting where the previous one ended.
///
/// The running angle advances by the full span even when a segment has no points,
/// so the junction sample is never duplicated and the output is strictly increasing.
pub fn segmented_angles(segments: &[AngleSegment]) -> Result<SegmentedAngles> {
    let total: usize = segments.iter().map(|s| s.points).sum();
    let mut theta = Vec::with_capacity(total);
    let mut boundaries = Vec::with_capacity(segments.len() + 1);
    boundaries.push(0);

    let mut current = 0.0;
    for (idx, segment) in segments.iter().enumerate() {
        if !segment.span.is_finite() || segment.span <= 0.0 {
            bail!("angle segment {} has invalid span {}", idx, segment.span);
        }

        theta.extend(linspace(current, current + segment.span, segment.points, false));
        current += segment.span;
        boundaries.push(theta.len());
    }

    Ok(SegmentedAngles { theta, boundaries })
}

/// Index of the sample closest to `value` in an ascending slice (lower index on ties)
pub fn nearest_index(sorted: &[f64], value: f64) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }

    let upper = sorted.partition_point(|&t| t < value);
    if upper == 0 {
        return Some(0);
    }
    if upper == sorted.len() {
        return Some(sorted.len() - 1);
    }

    let lower = upper - 1;
    if (value - sorted[lower]).abs() <= (sorted[upper] - value).abs() {
        Some(lower)
    } else {
        Some(upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn linspace_with_endpoint() {
        assert_eq!(linspace(0.0, 1.0, 5, true), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn linspace_without_endpoint() {
        assert_eq!(linspace(0.0, 1.0, 4, false), vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0, true).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1, true), vec![3.0]);
        assert_eq!(linspace(3.0, 9.0, 1, false), vec![3.0]);
    }

    #[test]
    fn segments_record_boundaries() {
        let angles = segmented_angles(&[
            AngleSegment::new(TAU, 4),
            AngleSegment::new(TAU, 6),
            AngleSegment::new(TAU, 5),
        ])
        .unwrap();

        assert_eq!(angles.boundaries, vec![0, 4, 10, 15]);
        assert_eq!(angles.segment_count(), 3);
        assert_eq!(angles.segment_range(1), 4..10);
        assert_eq!(angles.theta[4], TAU);
    }

    #[test]
    fn empty_segment_still_advances() {
        let angles = segmented_angles(&[
            AngleSegment::new(1.0, 2),
            AngleSegment::new(1.0, 0),
            AngleSegment::new(1.0, 2),
        ])
        .unwrap();

        assert_eq!(angles.theta, vec![0.0, 0.5, 2.0, 2.5]);
        assert_eq!(angles.segment_range(1), 2..2);
    }

    #[test]
    fn rejects_bad_spans() {
        assert!(segmented_angles(&[AngleSegment::new(0.0, 3)]).is_err());
        assert!(segmented_angles(&[AngleSegment::new(-1.0, 3)]).is_err());
        assert!(segmented_angles(&[AngleSegment::new(f64::NAN, 3)]).is_err());
    }

    #[test]
    fn nearest_index_picks_closest() {
        let samples = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(nearest_index(&samples, -5.0), Some(0));
        assert_eq!(nearest_index(&samples, 1.2), Some(1));
        assert_eq!(nearest_index(&samples, 1.5), Some(1));
        assert_eq!(nearest_index(&samples, 1.7), Some(2));
        assert_eq!(nearest_index(&samples, 10.0), Some(3));
        assert_eq!(nearest_index(&[], 1.0), None);
    }
}
