//! Shared geometry utilities.

use kurbo::{Point, Rect, Vec2};

use crate::trajectory::Sample;

/// Signed inclination of the chord `from → to`, in degrees.
///
/// Magnitude is `atan2(|dy|, |dx|)`, so always in `[0, 90]`. Image
/// coordinates grow downward: the angle is positive when the chord rises
/// (`from.y > to.y`) and negative otherwise. A vertical chord is ±90°.
pub fn signed_angle_degrees(from: Point, to: Point) -> f64 {
    let d = to - from;
    let magnitude = Vec2::new(d.x.abs(), d.y.abs()).atan2().to_degrees();
    if from.y > to.y || magnitude == 0.0 {
        magnitude
    } else {
        -magnitude
    }
}

/// Axis-aligned bounds of a run of samples, or `None` when empty.
pub fn sample_bounds(samples: &[Sample]) -> Option<Rect> {
    let (first, rest) = samples.split_first()?;
    let start = Rect::from_points(first.position(), first.position());
    Some(rest.iter().fold(start, |r, s| r.union_pt(s.position())))
}
