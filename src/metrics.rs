//! Per-segment geometry and whole-throw summary statistics.

use kurbo::Point;
use serde::Serialize;

use crate::detect::TurningPoint;
use crate::geom::sample_bounds;
use crate::segment::Segment;
use crate::trajectory::Trajectory;

/// Geometry of the samples covered by one segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentMetrics {
    /// Frames elapsed between the segment's endpoints.
    pub frame_span: u32,
    pub sample_count: usize,
    /// Horizontal extent of the arc.
    pub width: f64,
    /// Vertical extent of the arc.
    pub height: f64,
    /// Center of the arc's bounding box.
    pub center: (f64, f64),
}

/// Which way the throw's segments mostly lean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TiltDirection {
    Rising,
    Falling,
    Level,
}

/// Aggregate over all segments of one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub segment_count: usize,
    /// Mean of the signed angles.
    pub average_angle: f64,
    /// Mean of the absolute angles.
    pub mean_abs_angle: f64,
    /// `1 - cv` of the absolute angles, clamped to `[0, 1]`.
    /// 1 = every segment leans by the same amount.
    pub consistency: f64,
    pub dominant_tilt: TiltDirection,
    /// Mean arc width over all segments.
    pub average_width: f64,
    /// Mean arc height over all segments.
    pub average_height: f64,
    /// Mean number of frames per segment.
    pub average_frame_span: f64,
}

pub fn segment_metrics(
    segment: &Segment,
    turning_points: &[TurningPoint],
    trajectory: &Trajectory,
) -> SegmentMetrics {
    let (from, to) = segment.endpoints(turning_points);
    let samples = segment.samples(trajectory);
    let bounds = sample_bounds(samples)
        .unwrap_or_else(|| kurbo::Rect::from_points(from.position(), to.position()));
    let Point { x: cx, y: cy } = bounds.center();
    SegmentMetrics {
        frame_span: to.frame.saturating_sub(from.frame),
        sample_count: samples.len(),
        width: bounds.width(),
        height: bounds.height(),
        center: (cx, cy),
    }
}

/// Summarize an analysis. `metrics` is parallel to `segments`.
pub fn summarize(segments: &[Segment], metrics: &[SegmentMetrics]) -> Summary {
    let n = segments.len();
    if n == 0 {
        return Summary {
            segment_count: 0,
            average_angle: 0.0,
            mean_abs_angle: 0.0,
            consistency: 0.0,
            dominant_tilt: TiltDirection::Level,
            average_width: 0.0,
            average_height: 0.0,
            average_frame_span: 0.0,
        };
    }

    let angles: Vec<f64> = segments.iter().map(|s| s.angle_degrees).collect();
    let average_angle = angles.iter().sum::<f64>() / n as f64;
    let magnitudes: Vec<f64> = angles.iter().map(|a| a.abs()).collect();
    let mean_abs_angle = magnitudes.iter().sum::<f64>() / n as f64;

    let consistency = if n >= 2 && mean_abs_angle > 0.0 {
        let cv = std_dev(&magnitudes) / mean_abs_angle;
        (1.0 - cv).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let rising = angles.iter().filter(|&&a| a > 0.0).count();
    let falling = angles.iter().filter(|&&a| a < 0.0).count();
    let dominant_tilt = match rising.cmp(&falling) {
        std::cmp::Ordering::Greater => TiltDirection::Rising,
        std::cmp::Ordering::Less => TiltDirection::Falling,
        std::cmp::Ordering::Equal => TiltDirection::Level,
    };

    let mean_of = |f: fn(&SegmentMetrics) -> f64| {
        if metrics.is_empty() {
            0.0
        } else {
            metrics.iter().map(f).sum::<f64>() / metrics.len() as f64
        }
    };

    Summary {
        segment_count: n,
        average_angle,
        mean_abs_angle,
        consistency,
        dominant_tilt,
        average_width: mean_of(|m| m.width),
        average_height: mean_of(|m| m.height),
        average_frame_span: mean_of(|m| f64::from(m.frame_span)),
    }
}

/// Sample standard deviation. Needs at least two values.
fn std_dev(values: &[f64]) -> f64 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}
