//! hammertrack: turning points and swing arcs of a tracked hammer throw.
//!
//! Takes the hammer positions reported by a video tracker (frame, x, y in
//! normalized image coordinates), finds the turning points where the
//! horizontal motion reverses, and groups consecutive turning points into
//! arcs ("ellipses") with a signed inclination angle.
//!
//! # Example
//!
//! ```
//! use hammertrack::{analyze, AnalysisConfig, Sample, Trajectory};
//!
//! let trajectory: Trajectory = [(0, 0.0, 0.5), (1, 0.5, 0.45), (2, 1.0, 0.4), (3, 0.5, 0.5)]
//!     .into_iter()
//!     .map(|(f, x, y)| Sample::new(f, x, y))
//!     .collect();
//! let analysis = analyze(&trajectory, &AnalysisConfig::default())?;
//! assert_eq!(analysis.turning_points.len(), 2);
//! assert!(analysis.segments[0].angle_degrees > 0.0);
//! # Ok::<(), hammertrack::AnalysisError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod geom;

pub mod detect;
pub mod error;
pub mod metrics;
pub mod report;
pub mod segment;
pub mod trajectory;

// Re-export kurbo so downstream users get the same Point type
// returned by `Sample::position` and `TurningPoint::position`.
pub use kurbo;

pub use config::{AnalysisConfig, DetectionConfig, Stride};
pub use detect::{detect_turning_points, TurningPoint, TurningPointKind};
pub use error::AnalysisError;
pub use geom::signed_angle_degrees;
pub use metrics::{SegmentMetrics, Summary, TiltDirection};
pub use segment::{build_segments, Segment};
pub use trajectory::{Sample, Trajectory};

use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

/// Everything computed for one trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub config: AnalysisConfig,
    pub sample_count: usize,
    /// First and last frame of the trajectory.
    pub frame_range: (u32, u32),
    pub turning_points: Vec<TurningPoint>,
    pub segments: Vec<Segment>,
    /// Geometry of each segment, parallel to `segments`.
    pub segment_metrics: Vec<SegmentMetrics>,
    pub summary: Summary,
}

impl Analysis {
    /// Index of the first segment whose endpoint frames enclose `frame`.
    pub fn segment_containing(&self, frame: u32) -> Option<usize> {
        self.segments.iter().position(|s| {
            let (from, to) = s.endpoints(&self.turning_points);
            (from.frame..=to.frame).contains(&frame)
        })
    }
}

/// Full pipeline: trajectory → turning points → segments → metrics.
///
/// Fails with [`AnalysisError::InsufficientData`] when the trajectory has
/// fewer than two samples or yields fewer turning points than the stride
/// needs; callers usually report the latter as "no motion detected".
pub fn analyze(trajectory: &Trajectory, config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    let t_start = Instant::now();
    config.validate()?;

    let turning_points = detect_turning_points(trajectory, &config.detection)?;
    let segments = build_segments(&turning_points, config.stride)?;

    let segment_metrics: Vec<SegmentMetrics> = segments
        .iter()
        .map(|s| metrics::segment_metrics(s, &turning_points, trajectory))
        .collect();
    let summary = metrics::summarize(&segments, &segment_metrics);
    let frame_range = trajectory.frame_range().unwrap_or_default();

    tracing::info!(
        samples = trajectory.len(),
        turning_points = turning_points.len(),
        segments = segments.len(),
        average_angle = summary.average_angle,
        elapsed_us = t_start.elapsed().as_micros() as u64,
        "analysis complete"
    );

    Ok(Analysis {
        config: *config,
        sample_count: trajectory.len(),
        frame_range,
        turning_points,
        segments,
        segment_metrics,
        summary,
    })
}

/// Analyze several trajectories with the same configuration, in parallel.
/// Results are returned in input order.
pub fn analyze_all(
    trajectories: &[Trajectory],
    config: &AnalysisConfig,
) -> Vec<Result<Analysis, AnalysisError>> {
    trajectories
        .par_iter()
        .map(|t| analyze(t, config))
        .collect()
}
