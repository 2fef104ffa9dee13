//! Frame-sorted hammer positions.
//!
//! A [`Trajectory`] is the only input of the analysis. Samples come from an
//! external tracker as `Frame,X,Y` rows with coordinates normalized to
//! `[0, 1]` and `y` growing downward. Frames may be missing (detection
//! gaps), so consecutive samples are not necessarily consecutive frames.

use std::ops::RangeInclusive;
use std::path::Path;

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// One frame's observed hammer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub frame: u32,
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(frame: u32, x: f64, y: f64) -> Self {
        Self { frame, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Samples sorted ascending by frame.
///
/// Construction always sorts (stably), so the detection code can rely on
/// frame order regardless of how the rows were supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    pub fn new(mut samples: Vec<Sample>) -> Self {
        samples.sort_by_key(|s| s.frame);
        let duplicates = samples
            .windows(2)
            .filter(|w| w[0].frame == w[1].frame)
            .count();
        if duplicates > 0 {
            tracing::warn!(duplicates, "trajectory contains repeated frame numbers");
        }
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First and last frame number, if any.
    pub fn frame_range(&self) -> Option<(u32, u32)> {
        Some((self.samples.first()?.frame, self.samples.last()?.frame))
    }

    /// Samples between two sequence indices, inclusive. Out-of-range bounds
    /// are clamped.
    pub fn slice(&self, range: RangeInclusive<usize>) -> &[Sample] {
        if self.samples.is_empty() {
            return &[];
        }
        let last = self.samples.len() - 1;
        let start = (*range.start()).min(last);
        let end = (*range.end()).min(last);
        if start > end {
            return &[];
        }
        &self.samples[start..=end]
    }

    /// Parse `Frame,X,Y` text as logged by the tracker.
    ///
    /// The header row is optional. Blank lines and lines starting with `#`
    /// are skipped. Line numbers in errors are 1-based.
    pub fn parse_csv(text: &str) -> Result<Self, AnalysisError> {
        let mut samples = Vec::new();
        let mut seen_row = false;
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let first_row = !seen_row;
            seen_row = true;
            if first_row && is_header(line) {
                continue;
            }
            samples.push(parse_row(line, idx + 1)?);
        }
        Ok(Self::new(samples))
    }

    /// Read and parse a CSV file (see [`Trajectory::parse_csv`]).
    pub fn load_csv(path: &Path) -> Result<Self, AnalysisError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_csv(&text)
    }
}

impl FromIterator<Sample> for Trajectory {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A header row has no numeric field at all, e.g. `Frame,X,Y`.
fn is_header(line: &str) -> bool {
    line.split(',')
        .all(|field| field.trim().parse::<f64>().is_err())
}

fn parse_row(line: &str, line_no: usize) -> Result<Sample, AnalysisError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(AnalysisError::Parse {
            line: line_no,
            message: format!("expected 3 fields (frame,x,y), found {}", fields.len()),
        });
    }
    let frame = fields[0].parse::<u32>().map_err(|e| AnalysisError::Parse {
        line: line_no,
        message: format!("bad frame number {:?}: {}", fields[0], e),
    })?;
    let coord = |s: &str, axis: &str| {
        s.parse::<f64>().map_err(|e| AnalysisError::Parse {
            line: line_no,
            message: format!("bad {} coordinate {:?}: {}", axis, s, e),
        })
    };
    Ok(Sample::new(frame, coord(fields[1], "x")?, coord(fields[2], "y")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_by_frame() {
        let t = Trajectory::new(vec![
            Sample::new(5, 0.5, 0.0),
            Sample::new(1, 0.1, 0.0),
            Sample::new(3, 0.3, 0.0),
        ]);
        let frames: Vec<u32> = t.samples().iter().map(|s| s.frame).collect();
        assert_eq!(frames, vec![1, 3, 5]);
        assert_eq!(t.frame_range(), Some((1, 5)));
    }

    #[test]
    fn parse_with_header_and_gaps() {
        let text = "Frame,X,Y\n0,0.78,0.40\n\n2, 0.74 ,0.41\n# dropped frame 1\n9,0.46,0.54\n";
        let t = Trajectory::parse_csv(text).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.samples()[1], Sample::new(2, 0.74, 0.41));
        assert_eq!(t.frame_range(), Some((0, 9)));
    }

    #[test]
    fn parse_without_header() {
        let t = Trajectory::parse_csv("3,0.5,0.5\n1,0.25,0.5").unwrap();
        assert_eq!(t.samples()[0].frame, 1);
    }

    #[test]
    fn parse_reports_line_numbers() {
        let err = Trajectory::parse_csv("Frame,X,Y\n0,0.1,0.2\n1,abc,0.2\n").unwrap_err();
        match err {
            AnalysisError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("x coordinate"), "{}", message);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_first_row_is_not_taken_for_a_header() {
        for text in ["-1,0.5,0.5\n0,0.5,0.5\n", "l0,0.5,0.5\n0,0.5,0.5\n"] {
            let err = Trajectory::parse_csv(text).unwrap_err();
            assert!(
                matches!(err, AnalysisError::Parse { line: 1, .. }),
                "{text:?}: {err}"
            );
        }
        let t = Trajectory::parse_csv("frame, x, y\n0,0.5,0.5\n").unwrap();
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        let err = Trajectory::parse_csv("0,0.1\n").unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 1, .. }));
    }

    #[test]
    fn empty_text_is_empty_trajectory() {
        let t = Trajectory::parse_csv("Frame,X,Y\n").unwrap();
        assert!(t.is_empty());
        assert_eq!(t.frame_range(), None);
    }

    #[test]
    fn slice_is_inclusive_and_clamped() {
        let t: Trajectory = (0..5).map(|f| Sample::new(f, f as f64, 0.0)).collect();
        assert_eq!(t.slice(1..=3).len(), 3);
        assert_eq!(t.slice(3..=10).len(), 2);
        assert!(t.slice(4..=2).is_empty());
    }
}
