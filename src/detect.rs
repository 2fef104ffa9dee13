//! Turning-point detection.
//!
//! Seen from the side, the hammer swings left and right like a spring.
//! A turning point is the sample just before the horizontal direction of
//! motion reverses. Only the x coordinate takes part in detection; y is
//! carried along for the angle computed later.
//!
//! One forward pass, one rule, two knobs (see [`DetectionConfig`]):
//! a movement counts only if `|dx| > min_delta_x`, and a reversal is only
//! evaluated once `min_frame_gap` samples have passed since the last
//! accepted turning point.

use kurbo::Point;
use serde::Serialize;

use crate::config::DetectionConfig;
use crate::error::AnalysisError;
use crate::trajectory::{Sample, Trajectory};

/// Classification of a turning point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TurningPointKind {
    /// First sample of the trajectory.
    Start,
    /// x was increasing and starts decreasing (rightmost point of a swing).
    Maximum,
    /// x was decreasing and starts increasing (leftmost point of a swing).
    Minimum,
}

/// A sample at which the swing reverses, or the first sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TurningPoint {
    /// Index of the originating sample in the sorted trajectory.
    pub sequence_index: usize,
    pub frame: u32,
    pub x: f64,
    pub y: f64,
    pub kind: TurningPointKind,
}

impl TurningPoint {
    fn at(sequence_index: usize, sample: &Sample, kind: TurningPointKind) -> Self {
        Self {
            sequence_index,
            frame: sample.frame,
            x: sample.x,
            y: sample.y,
            kind,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Right,
    Left,
}

impl Direction {
    fn of(dx: f64) -> Self {
        if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    /// Kind of the turning point that ends motion in this direction.
    fn reversal(self) -> TurningPointKind {
        match self {
            Direction::Right => TurningPointKind::Maximum,
            Direction::Left => TurningPointKind::Minimum,
        }
    }
}

/// Find the turning points of a trajectory.
///
/// The first sample is always returned as [`TurningPointKind::Start`].
/// After that, kinds strictly alternate between maximum and minimum.
/// Motion that has not reversed by the last sample produces no trailing
/// turning point. A trajectory without any significant x movement yields
/// only the start point.
pub fn detect_turning_points(
    trajectory: &Trajectory,
    config: &DetectionConfig,
) -> Result<Vec<TurningPoint>, AnalysisError> {
    config.validate()?;
    let samples = trajectory.samples();
    if samples.len() < 2 {
        return Err(AnalysisError::insufficient("samples", 2, samples.len()));
    }

    let mut points = vec![TurningPoint::at(0, &samples[0], TurningPointKind::Start)];

    // Exactly zero never counts, even with a zero threshold.
    let significant = |dx: f64| dx.abs() > config.min_delta_x;

    let initial = (1..samples.len()).find_map(|i| {
        let dx = samples[i].x - samples[i - 1].x;
        significant(dx).then_some((i, Direction::of(dx)))
    });
    let Some((established_at, mut direction)) = initial else {
        tracing::debug!(
            samples = samples.len(),
            min_delta_x = config.min_delta_x,
            "no significant horizontal movement"
        );
        return Ok(points);
    };
    tracing::debug!(frame = samples[established_at].frame, ?direction, "initial direction");

    // Counted from the start point, as if it had been accepted like any
    // other turning point.
    let mut since_last = established_at - 1;
    for i in established_at + 1..samples.len() {
        let dx = samples[i].x - samples[i - 1].x;
        if significant(dx) && since_last >= config.min_frame_gap {
            let next = Direction::of(dx);
            if next != direction {
                let tp = TurningPoint::at(i - 1, &samples[i - 1], direction.reversal());
                tracing::debug!(index = tp.sequence_index, frame = tp.frame, kind = ?tp.kind, "turning point");
                points.push(tp);
                direction = next;
                since_last = 0;
                continue;
            }
        }
        since_last += 1;
    }

    Ok(points)
}
