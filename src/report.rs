//! Plain-text report of an analysis.

use std::fmt;

use crate::detect::TurningPointKind;
use crate::metrics::TiltDirection;
use crate::Analysis;

/// An [`Analysis`] labelled with where its samples came from.
pub struct Report<'a> {
    pub source: &'a str,
    pub analysis: &'a Analysis,
}

impl<'a> Report<'a> {
    pub fn new(source: &'a str, analysis: &'a Analysis) -> Self {
        Self { source, analysis }
    }
}

fn kind_label(kind: TurningPointKind) -> &'static str {
    match kind {
        TurningPointKind::Start => "START",
        TurningPointKind::Maximum => "MAX",
        TurningPointKind::Minimum => "MIN",
    }
}

fn tilt_label(tilt: TiltDirection) -> &'static str {
    match tilt {
        TiltDirection::Rising => "rising",
        TiltDirection::Falling => "falling",
        TiltDirection::Level => "level",
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.analysis;
        let det = &a.config.detection;

        writeln!(f)?;
        writeln!(f, "  Analysis of {}", self.source)?;
        writeln!(f)?;
        writeln!(
            f,
            "  Samples     {}  (frames {}\u{2013}{})",
            a.sample_count, a.frame_range.0, a.frame_range.1,
        )?;
        writeln!(
            f,
            "  Config      min \u{0394}x {}  \u{00b7}  min gap {}  \u{00b7}  stride {}",
            det.min_delta_x,
            det.min_frame_gap,
            a.config.stride.point_count(),
        )?;

        writeln!(f)?;
        writeln!(f, "  Turning points ({})", a.turning_points.len())?;
        for (i, tp) in a.turning_points.iter().enumerate() {
            writeln!(
                f,
                "    TP{:<3} frame {:>5}  ({:.3}, {:.3})  {}",
                i,
                tp.frame,
                tp.x,
                tp.y,
                kind_label(tp.kind),
            )?;
        }

        writeln!(f)?;
        writeln!(f, "  Segments ({})", a.segments.len())?;
        for (i, (seg, m)) in a.segments.iter().zip(&a.segment_metrics).enumerate() {
            let (from, to) = seg.endpoints(&a.turning_points);
            let via = match seg.midpoint {
                Some(mid) => format!(" \u{2192} TP{}", mid),
                None => String::new(),
            };
            writeln!(
                f,
                "    #{:<3} TP{}{} \u{2192} TP{}  frames {}\u{2013}{}  {:>7.2}\u{00b0}  {} samples, {:.3} \u{00d7} {:.3}",
                i + 1,
                seg.from,
                via,
                seg.to,
                from.frame,
                to.frame,
                seg.angle_degrees,
                m.sample_count,
                m.width,
                m.height,
            )?;
        }

        let s = &a.summary;
        writeln!(f)?;
        writeln!(
            f,
            "  Summary     avg {:.2}\u{00b0}  \u{00b7}  mean |angle| {:.2}\u{00b0}  \u{00b7}  consistency {:.2}  \u{00b7}  {}",
            s.average_angle,
            s.mean_abs_angle,
            s.consistency,
            tilt_label(s.dominant_tilt),
        )?;
        writeln!(
            f,
            "              avg arc {:.3} \u{00d7} {:.3}  \u{00b7}  avg span {:.1} frames",
            s.average_width, s.average_height, s.average_frame_span,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analyze, AnalysisConfig, Sample, Trajectory};

    #[test]
    fn report_lists_points_and_segments() {
        let t: Trajectory = [(0, 0.1, 0.5), (1, 0.9, 0.4), (2, 0.2, 0.6), (3, 0.8, 0.5)]
            .into_iter()
            .map(|(f, x, y)| Sample::new(f, x, y))
            .collect();
        let a = analyze(&t, &AnalysisConfig::default()).unwrap();
        let text = Report::new("throw.csv", &a).to_string();
        assert!(text.contains("Analysis of throw.csv"));
        assert!(text.contains("Turning points (3)"));
        assert!(text.contains("MAX"));
        assert!(text.contains("MIN"));
        assert!(text.contains("Segments (2)"));
        assert!(text.contains("Summary"));
    }
}
