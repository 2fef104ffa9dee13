//! Segmentation of turning points into swing arcs ("ellipses").
//!
//! Segments are chained: the last turning point of one segment is the
//! first turning point of the next, so together they cover the whole
//! turning-point sequence without gaps.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::config::Stride;
use crate::detect::TurningPoint;
use crate::error::AnalysisError;
use crate::geom::signed_angle_degrees;
use crate::trajectory::{Sample, Trajectory};

/// One arc of motion between two turning points.
///
/// `from`, `midpoint` and `to` index into the turning-point sequence the
/// segment was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub from: usize,
    /// Middle turning point of a [`Stride::Triples`] segment. Only used
    /// for presentation.
    pub midpoint: Option<usize>,
    pub to: usize,
    /// Signed inclination of the chord from `from` to `to`
    /// (positive = rising, image y grows downward).
    pub angle_degrees: f64,
    /// Trajectory sample indices covered by the arc, endpoints included.
    pub sample_range: RangeInclusive<usize>,
}

impl Segment {
    fn between(
        turning_points: &[TurningPoint],
        from: usize,
        midpoint: Option<usize>,
        to: usize,
    ) -> Self {
        let start = &turning_points[from];
        let end = &turning_points[to];
        Self {
            from,
            midpoint,
            to,
            angle_degrees: signed_angle_degrees(start.position(), end.position()),
            sample_range: start.sequence_index..=end.sequence_index,
        }
    }

    /// Start and end turning points.
    pub fn endpoints<'a>(
        &self,
        turning_points: &'a [TurningPoint],
    ) -> (&'a TurningPoint, &'a TurningPoint) {
        (&turning_points[self.from], &turning_points[self.to])
    }

    /// The samples drawn for this arc.
    pub fn samples<'a>(&self, trajectory: &'a Trajectory) -> &'a [Sample] {
        trajectory.slice(self.sample_range.clone())
    }
}

/// Group consecutive turning points into segments.
///
/// With [`Stride::Pairs`] every adjacent pair `(i, i+1)` becomes a segment.
/// With [`Stride::Triples`] segments are `(i, i+1, i+2)` for `i = 0, 2, 4, …`
/// and the angle is measured from the first to the last point; a trailing
/// turning point that cannot complete a triple is left out.
pub fn build_segments(
    turning_points: &[TurningPoint],
    stride: Stride,
) -> Result<Vec<Segment>, AnalysisError> {
    let needed = stride.point_count();
    if turning_points.len() < needed {
        return Err(AnalysisError::insufficient(
            "turning points",
            needed,
            turning_points.len(),
        ));
    }

    let segments: Vec<Segment> = match stride {
        Stride::Pairs => (0..turning_points.len() - 1)
            .map(|i| Segment::between(turning_points, i, None, i + 1))
            .collect(),
        Stride::Triples => (0..turning_points.len() - 2)
            .step_by(2)
            .map(|i| Segment::between(turning_points, i, Some(i + 1), i + 2))
            .collect(),
    };

    for (n, seg) in segments.iter().enumerate() {
        let (a, b) = seg.endpoints(turning_points);
        tracing::debug!(
            segment = n + 1,
            from_frame = a.frame,
            to_frame = b.frame,
            angle = seg.angle_degrees,
            "segment"
        );
    }
    Ok(segments)
}
