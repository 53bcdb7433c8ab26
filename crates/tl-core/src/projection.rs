//! Maps event times onto the shared session axis as percentages.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::{Occurrence, SessionWindow};

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Projection errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionError {
    /// The window has no positive span, so percentages are undefined.
    #[error("session window spans {span_ms}ms; projection needs a positive span")]
    DegenerateWindow { span_ms: i64 },
}

/// Horizontal placement of a marker, in percent of the session span.
///
/// Values are not clamped: events before the session start have a negative
/// position and events after its end exceed 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub position_pct: f64,
    pub width_pct: f64,
}

impl Placement {
    /// End of the marker, in percent.
    pub fn end_pct(&self) -> f64 {
        self.position_pct + self.width_pct
    }

    /// Copy clipped to the visible `[0, 100]` range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let start = self.position_pct.clamp(0.0, 100.0);
        let end = self.end_pct().clamp(0.0, 100.0).max(start);
        Self {
            position_pct: start,
            width_pct: end - start,
        }
    }
}

/// Projects an occurrence onto the session window.
///
/// Points always have zero width.
#[allow(clippy::cast_precision_loss)]
pub fn project<'a>(
    window: &SessionWindow,
    occurrence: impl Into<Occurrence<'a>>,
) -> Result<Placement, ProjectionError> {
    let occurrence = occurrence.into();
    let span_ms = window.span_ms();
    if span_ms <= 0 {
        return Err(ProjectionError::DegenerateWindow { span_ms });
    }
    let span = span_ms as f64;

    let offset_ms = (occurrence.start() - window.start()).num_milliseconds();
    let position_pct = offset_ms as f64 / span * 100.0;

    let width_pct = match occurrence {
        Occurrence::Interval(interval) => interval.duration_ms() as f64 / span * 100.0,
        Occurrence::Point(_) => 0.0,
    };

    Ok(Placement {
        position_pct,
        width_pct,
    })
}

/// Minutes within the current hour between two instants.
///
/// Only the minutes component of the difference is kept, so a 75-minute span
/// reports 15. Use [`elapsed_minutes`] for the total.
pub fn duration_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let diff_ms = (end - start).num_milliseconds();
    (diff_ms % MS_PER_HOUR).div_euclid(MS_PER_MINUTE)
}

/// Total whole minutes elapsed between two instants.
pub fn elapsed_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_milliseconds().div_euclid(MS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TimedInterval, TimedPoint};
    use chrono::{Duration, TimeZone};

    const EPS: f64 = 1e-9;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 2, h, m, s).unwrap()
    }

    fn ten_minute_window() -> SessionWindow {
        SessionWindow::new(at(10, 0, 0), at(10, 10, 0)).unwrap()
    }

    #[test]
    fn mic_interval_in_the_middle() {
        let mic = TimedInterval::new(at(10, 5, 0), at(10, 6, 0));
        let placement = project(&ten_minute_window(), &mic).unwrap();
        assert!((placement.position_pct - 50.0).abs() < EPS);
        assert!((placement.width_pct - 10.0).abs() < EPS);
    }

    #[test]
    fn error_point_at_start_has_zero_width() {
        let error = TimedPoint {
            start: at(10, 0, 0),
            message: "mic failure".to_string(),
        };
        let placement = project(&ten_minute_window(), &error).unwrap();
        assert!(placement.position_pct.abs() < EPS);
        assert!(placement.width_pct.abs() < EPS);
    }

    #[test]
    fn zero_span_window_is_degenerate() {
        let window = SessionWindow::new(at(10, 0, 0), at(10, 0, 0)).unwrap();
        let mic = TimedInterval::new(at(10, 0, 0), at(10, 1, 0));
        let err = project(&window, &mic).unwrap_err();
        assert_eq!(err, ProjectionError::DegenerateWindow { span_ms: 0 });
    }

    #[test]
    fn events_outside_window_are_not_clamped() {
        let window = ten_minute_window();
        let before = TimedInterval::new(at(9, 59, 0), at(10, 1, 0));
        let placement = project(&window, &before).unwrap();
        assert!((placement.position_pct + 10.0).abs() < EPS);
        assert!((placement.width_pct - 20.0).abs() < EPS);

        let after = TimedPoint {
            start: at(10, 15, 0),
            message: String::new(),
        };
        let placement = project(&window, &after).unwrap();
        assert!((placement.position_pct - 150.0).abs() < EPS);
    }

    #[test]
    fn inner_occurrences_stay_within_bounds() {
        let window = SessionWindow::new(at(9, 0, 0), at(9, 47, 13)).unwrap();
        let mut start = window.start();
        while start < window.end() {
            let end = (start + Duration::seconds(97)).min(window.end());
            let placement = project(&window, &TimedInterval::new(start, end)).unwrap();
            assert!(placement.position_pct >= 0.0);
            assert!(placement.position_pct <= 100.0 + EPS);
            assert!(placement.end_pct() <= 100.0 + EPS);
            start += Duration::seconds(61);
        }
    }

    #[test]
    fn projection_is_idempotent() {
        let window = SessionWindow::new(at(10, 0, 0), at(10, 7, 0)).unwrap();
        let mic = TimedInterval::new(at(10, 1, 13), at(10, 3, 59));
        let first = project(&window, &mic).unwrap();
        let second = project(&window, &mic).unwrap();
        assert_eq!(first.position_pct.to_bits(), second.position_pct.to_bits());
        assert_eq!(first.width_pct.to_bits(), second.width_pct.to_bits());
    }

    #[test]
    fn clamped_clips_to_visible_range() {
        let placement = Placement {
            position_pct: -10.0,
            width_pct: 20.0,
        };
        let clipped = placement.clamped();
        assert!(clipped.position_pct.abs() < EPS);
        assert!((clipped.width_pct - 10.0).abs() < EPS);

        let beyond = Placement {
            position_pct: 120.0,
            width_pct: 5.0,
        }
        .clamped();
        assert!((beyond.position_pct - 100.0).abs() < EPS);
        assert!(beyond.width_pct.abs() < EPS);
    }

    #[test]
    fn duration_minutes_keeps_minutes_within_hour() {
        assert_eq!(duration_minutes(at(10, 0, 0), at(10, 10, 0)), 10);
        assert_eq!(duration_minutes(at(10, 0, 0), at(11, 15, 0)), 15);
        assert_eq!(duration_minutes(at(10, 0, 0), at(10, 0, 59)), 0);
        assert_eq!(duration_minutes(at(10, 0, 0), at(11, 0, 0)), 0);
    }

    #[test]
    fn elapsed_minutes_counts_total() {
        assert_eq!(elapsed_minutes(at(10, 0, 0), at(11, 15, 0)), 75);
        assert_eq!(elapsed_minutes(at(10, 0, 0), at(10, 9, 59)), 9);
    }
}
