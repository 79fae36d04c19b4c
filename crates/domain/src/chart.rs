//! History chart description, independent of the charting library.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format used by the server for history rows.
pub const SERVER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One historical reading embedded in the detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: String,
    pub temperature: f64,
}

/// Page-supplied reference values drawn as constant lines.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Thresholds {
    pub set_temp: Option<f64>,
    pub alarm_threshold: Option<f64>,
}

/// A parsed point of the primary series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub at: DateTime<Utc>,
    pub temperature: f64,
}

/// Which reference value a constant line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    SetPoint,
    Alarm,
}

impl ReferenceKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SetPoint => "설정 온도",
            Self::Alarm => "알람 온도",
        }
    }

    /// Line colour as a `#rrggbb` hex string.
    #[must_use]
    pub fn colour(self) -> &'static str {
        match self {
            Self::SetPoint => "#28a745",
            Self::Alarm => "#dc3545",
        }
    }
}

/// A horizontal line spanning the whole x-domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceLine {
    pub kind: ReferenceKind,
    pub value: f64,
}

/// Label of the primary series.
pub const PRIMARY_LABEL: &str = "현재 온도";

/// Colour of the primary series.
pub const PRIMARY_COLOUR: &str = "#007bff";

/// Everything needed to draw the history chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub points: Vec<ChartPoint>,
    pub reference_lines: Vec<ReferenceLine>,
    /// Number of input points dropped because their timestamp did not parse.
    pub skipped: usize,
}

impl ChartSpec {
    /// Build a chart from raw history.
    ///
    /// Returns `None` when no drawable point remains, so that an empty
    /// history never produces an empty chart.
    #[must_use]
    pub fn build(history: &[HistoryPoint], thresholds: Thresholds) -> Option<Self> {
        let mut points = Vec::with_capacity(history.len());
        let mut skipped = 0;
        for point in history {
            match parse_timestamp(&point.timestamp) {
                Some(at) => points.push(ChartPoint {
                    at,
                    temperature: point.temperature,
                }),
                None => skipped += 1,
            }
        }
        if points.is_empty() {
            return None;
        }

        let reference_lines = [
            (ReferenceKind::SetPoint, thresholds.set_temp),
            (ReferenceKind::Alarm, thresholds.alarm_threshold),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.map(|value| ReferenceLine { kind, value }))
        .collect();

        Some(Self {
            points,
            reference_lines,
            skipped,
        })
    }

    /// Value of the given reference line, if drawn.
    #[must_use]
    pub fn reference(&self, kind: ReferenceKind) -> Option<f64> {
        self.reference_lines
            .iter()
            .find(|line| line.kind == kind)
            .map(|line| line.value)
    }
}

/// Parse a server timestamp (`YYYY-MM-DD HH:MM:SS`, or RFC 3339).
///
/// Server timestamps carry no zone; they are placed on the UTC axis as-is so
/// labels show the same wall-clock time as the history table.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, SERVER_TIMESTAMP_FORMAT) {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ts: &str, temperature: f64) -> HistoryPoint {
        HistoryPoint {
            timestamp: ts.to_string(),
            temperature,
        }
    }

    #[test]
    fn should_return_none_when_history_is_empty() {
        let thresholds = Thresholds {
            set_temp: Some(-20.0),
            alarm_threshold: Some(-15.0),
        };
        assert!(ChartSpec::build(&[], thresholds).is_none());
    }

    #[test]
    fn should_return_none_when_no_timestamp_parses() {
        let history = [point("yesterday", 1.0)];
        assert!(ChartSpec::build(&history, Thresholds::default()).is_none());
    }

    #[test]
    fn should_draw_both_reference_lines_when_supplied() {
        let history = [
            point("2024-05-01 10:00:00", -19.5),
            point("2024-05-01 11:00:00", -18.0),
        ];
        let spec = ChartSpec::build(
            &history,
            Thresholds {
                set_temp: Some(-20.0),
                alarm_threshold: Some(-15.0),
            },
        )
        .unwrap();

        assert_eq!(spec.points.len(), 2);
        assert_eq!(spec.reference(ReferenceKind::SetPoint), Some(-20.0));
        assert_eq!(spec.reference(ReferenceKind::Alarm), Some(-15.0));
    }

    #[test]
    fn should_omit_reference_line_without_threshold() {
        let history = [point("2024-05-01 10:00:00", -19.5)];
        let spec = ChartSpec::build(
            &history,
            Thresholds {
                set_temp: Some(-20.0),
                alarm_threshold: None,
            },
        )
        .unwrap();

        assert_eq!(spec.reference_lines.len(), 1);
        assert!(spec.reference(ReferenceKind::Alarm).is_none());
    }

    #[test]
    fn should_count_skipped_points() {
        let history = [
            point("2024-05-01 10:00:00", -19.5),
            point("not a time", -18.0),
        ];
        let spec = ChartSpec::build(&history, Thresholds::default()).unwrap();
        assert_eq!(spec.points.len(), 1);
        assert_eq!(spec.skipped, 1);
    }

    #[test]
    fn should_parse_rfc3339_timestamps() {
        let parsed = parse_timestamp("2024-05-01T10:00:00+09:00").unwrap();
        assert_eq!(parsed, parse_timestamp("2024-05-01 01:00:00").unwrap());
    }
}
