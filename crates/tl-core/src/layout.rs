//! One rendering pass over a session.
//!
//! Builds the header labels once, then every participant row in parallel.
//! A marker that cannot be projected carries its error instead of a
//! placement; the rest of its row and all other rows are unaffected.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::axis::{self, AxisError, AxisLabel, DEFAULT_STEP_MINUTES};
use crate::event_kind::EventKind;
use crate::format::{display_name, format_date_time, format_duration, tooltip_text};
use crate::model::{Occurrence, Participant, Session, SessionWindow};
use crate::projection::{self, Placement, ProjectionError};
use crate::types::ParticipantId;

/// Which duration computation feeds the displayed duration text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationMode {
    /// Whole elapsed minutes.
    #[default]
    Total,
    /// Minutes within the current hour; sessions of an hour or more wrap.
    WithinHour,
}

impl DurationMode {
    pub fn minutes(self, start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
        match self {
            Self::Total => projection::elapsed_minutes(start, end),
            Self::WithinHour => projection::duration_minutes(start, end),
        }
    }
}

/// Knobs for a rendering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub step_minutes: u32,
    /// Offset used for every displayed clock time.
    pub offset: FixedOffset,
    pub duration_mode: DurationMode,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            step_minutes: DEFAULT_STEP_MINUTES,
            offset: Utc.fix(),
            duration_mode: DurationMode::default(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("failed to generate axis labels: {0}")]
    Axis(#[from] AxisError),
}

/// Session-wide strings shown in every row's details panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub start: String,
    pub end: String,
    pub duration: String,
}

/// A single event drawn on a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventMarker {
    pub kind: EventKind,
    /// Index within this kind's list for the participant.
    pub index: usize,
    pub start: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    pub icon: &'static str,
    pub tooltip: String,
    #[serde(flatten)]
    pub outcome: MarkerOutcome,
}

/// Where a marker landed, or why it could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerOutcome {
    Placed { placement: Placement },
    Failed { error: ProjectionError },
}

impl EventMarker {
    fn new(
        window: &SessionWindow,
        kind: EventKind,
        index: usize,
        occurrence: Occurrence<'_>,
    ) -> Self {
        let message = match occurrence {
            Occurrence::Point(point) => Some(point.message.as_str()),
            Occurrence::Interval(_) => None,
        };
        let outcome = match projection::project(window, occurrence) {
            Ok(placement) => MarkerOutcome::Placed { placement },
            Err(error) => MarkerOutcome::Failed { error },
        };
        Self {
            kind,
            index,
            start: occurrence.start(),
            end: occurrence.end(),
            icon: kind.icon(),
            tooltip: tooltip_text(kind, message),
            outcome,
        }
    }

    /// The projection outcome for this marker.
    pub const fn projected(&self) -> Result<Placement, ProjectionError> {
        match self.outcome {
            MarkerOutcome::Placed { placement } => Ok(placement),
            MarkerOutcome::Failed { error } => Err(error),
        }
    }

    pub const fn placement(&self) -> Option<Placement> {
        match self.outcome {
            MarkerOutcome::Placed { placement } => Some(placement),
            MarkerOutcome::Failed { .. } => None,
        }
    }

    pub const fn is_placed(&self) -> bool {
        matches!(self.outcome, MarkerOutcome::Placed { .. })
    }
}

/// Everything needed to draw one participant's row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantRow {
    pub participant_id: ParticipantId,
    /// Heading, e.g. `Alice (P1)`.
    pub display_name: String,
    /// `{session start} | Duration {n} Mins`.
    pub summary_line: String,
    pub markers: Vec<EventMarker>,
}

impl ParticipantRow {
    fn build(participant: &Participant, window: &SessionWindow, summary: &SessionSummary) -> Self {
        let markers: Vec<EventMarker> = participant
            .occurrences()
            .map(|(kind, index, occurrence)| EventMarker::new(window, kind, index, occurrence))
            .collect();

        for marker in &markers {
            let MarkerOutcome::Failed { error } = marker.outcome else {
                continue;
            };
            tracing::warn!(
                participant_id = %participant.participant_id,
                kind = %marker.kind,
                index = marker.index,
                error = %error,
                "event could not be placed on the timeline"
            );
        }

        Self {
            participant_id: participant.participant_id.clone(),
            display_name: display_name(&participant.name, &participant.participant_id),
            summary_line: format!("{} | Duration {}", summary.start, summary.duration),
            markers,
        }
    }

    /// Placements of the participant's login/logout spans.
    pub fn presence_spans(&self) -> impl Iterator<Item = Placement> + '_ {
        self.markers
            .iter()
            .filter(|m| m.kind == EventKind::Timelog)
            .filter_map(EventMarker::placement)
    }

    /// Markers of one kind, in input order.
    pub fn markers_of(&self, kind: EventKind) -> impl Iterator<Item = &EventMarker> + '_ {
        self.markers.iter().filter(move |m| m.kind == kind)
    }
}

/// The computed timeline for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub window: SessionWindow,
    pub labels: Vec<AxisLabel>,
    /// Width of each header column, in percent.
    pub label_width_pct: f64,
    pub summary: SessionSummary,
    pub rows: Vec<ParticipantRow>,
}

impl TimelineLayout {
    /// Runs a full rendering pass. Only an invalid window or step fails the
    /// pass; per-event failures are recorded on their markers.
    pub fn build(session: &Session, options: &LayoutOptions) -> Result<Self, LayoutError> {
        let window = session.window;
        let labels = axis::generate_labels_with_offset(
            window.start(),
            window.end(),
            options.step_minutes,
            options.offset,
        )?;

        let summary = SessionSummary {
            start: format_date_time(window.start(), options.offset),
            end: format_date_time(window.end(), options.offset),
            duration: format_duration(options.duration_mode.minutes(window.start(), window.end())),
        };

        let rows: Vec<ParticipantRow> = session
            .participants
            .par_iter()
            .map(|participant| ParticipantRow::build(participant, &window, &summary))
            .collect();

        let layout = Self {
            window,
            label_width_pct: axis::label_width_pct(labels.len()),
            labels,
            summary,
            rows,
        };
        tracing::debug!(
            labels = layout.labels.len(),
            rows = layout.rows.len(),
            failed_markers = layout.failed_markers(),
            "built timeline layout"
        );
        Ok(layout)
    }

    /// Finds a row by participant ID, ignoring case.
    pub fn row(&self, participant_id: &str) -> Option<&ParticipantRow> {
        self.rows
            .iter()
            .find(|row| row.participant_id.matches(participant_id))
    }

    /// Number of markers that could not be placed.
    pub fn failed_markers(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| &row.markers)
            .filter(|m| !m.is_placed())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_session;
    use chrono::TimeZone;

    const EPS: f64 = 1e-9;

    const DOC: &str = r#"{
        "participantArray": [
            {
                "participantId": "p1",
                "name": "alice",
                "timelog": [
                    { "start": "2024-04-02T10:00:00Z", "end": "2024-04-02T10:04:00Z" },
                    { "start": "2024-04-02T10:06:00Z", "end": "2024-04-02T10:10:00Z" }
                ],
                "events": {
                    "mic": [ { "start": "2024-04-02T10:05:00Z", "end": "2024-04-02T10:06:00Z" } ],
                    "webcam": [ { "start": "2024-04-02T10:01:00Z", "end": "2024-04-02T10:03:00Z" } ],
                    "errors": [ { "start": "2024-04-02T10:00:00Z", "message": "mic permission denied" } ]
                }
            },
            {
                "participantId": "q7",
                "name": "bob",
                "timelog": [ { "start": "2024-04-02T10:02:00Z", "end": "2024-04-02T10:08:00Z" } ],
                "events": { "mic": [], "webcam": [] }
            }
        ],
        "start": "2024-04-02T10:00:00Z",
        "end": "2024-04-02T10:10:00Z"
    }"#;

    fn layout() -> TimelineLayout {
        let session = parse_session(DOC).unwrap();
        TimelineLayout::build(&session, &LayoutOptions::default()).unwrap()
    }

    #[test]
    fn header_labels_and_widths() {
        let layout = layout();
        let texts: Vec<&str> = layout.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["10:00", "10:02", "10:04", "10:06", "10:08", "10:10"]);
        assert!((layout.label_width_pct - 100.0 / 6.0).abs() < EPS);
    }

    #[test]
    fn rows_keep_input_order() {
        let layout = layout();
        let names: Vec<&str> = layout.rows.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["Alice (P1)", "Bob (Q7)"]);
    }

    #[test]
    fn summary_strings() {
        let layout = layout();
        assert_eq!(layout.summary.start, "2 April 2024, 10:00");
        assert_eq!(layout.summary.end, "2 April 2024, 10:10");
        assert_eq!(layout.summary.duration, "10 Mins");
        assert_eq!(
            layout.rows[0].summary_line,
            "2 April 2024, 10:00 | Duration 10 Mins"
        );
    }

    #[test]
    fn markers_follow_draw_order_with_placements() {
        let layout = layout();
        let row = layout.row("P1").unwrap();
        let kinds: Vec<EventKind> = row.markers.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Timelog,
                EventKind::Timelog,
                EventKind::Mic,
                EventKind::Webcam,
                EventKind::Error,
            ]
        );

        let mic = row.markers_of(EventKind::Mic).next().unwrap();
        let placement = mic.projected().unwrap();
        assert!((placement.position_pct - 50.0).abs() < EPS);
        assert!((placement.width_pct - 10.0).abs() < EPS);
        assert_eq!(mic.tooltip, "mic event");

        let error = row.markers_of(EventKind::Error).next().unwrap();
        assert_eq!(error.tooltip, "mic permission denied");
        assert!(error.projected().unwrap().width_pct.abs() < EPS);
    }

    #[test]
    fn presence_spans_come_from_timelog() {
        let layout = layout();
        let spans: Vec<Placement> = layout.rows[0].presence_spans().collect();
        assert_eq!(spans.len(), 2);
        assert!((spans[1].position_pct - 60.0).abs() < EPS);
        assert!((spans[1].width_pct - 40.0).abs() < EPS);
    }

    #[test]
    fn degenerate_window_fails_markers_not_pass() {
        let json = r#"{
            "participantArray": [
                { "participantId": "p1", "name": "a",
                  "events": { "mic": [ { "start": "2024-04-02T10:00:00Z", "end": "2024-04-02T10:01:00Z" } ] } }
            ],
            "start": "2024-04-02T10:00:00Z",
            "end": "2024-04-02T10:00:00Z"
        }"#;
        let session = parse_session(json).unwrap();
        let layout = TimelineLayout::build(&session, &LayoutOptions::default()).unwrap();

        assert_eq!(layout.labels.len(), 1);
        assert_eq!(layout.rows.len(), 1);
        assert_eq!(layout.failed_markers(), 1);
        assert_eq!(
            layout.rows[0].markers[0].projected().unwrap_err(),
            ProjectionError::DegenerateWindow { span_ms: 0 }
        );
    }

    #[test]
    fn row_lookup_returns_first_duplicate() {
        let json = r#"{
            "participantArray": [
                { "participantId": "p1", "name": "first" },
                { "participantId": "P1", "name": "second" }
            ],
            "start": "2024-04-02T10:00:00Z",
            "end": "2024-04-02T10:10:00Z"
        }"#;
        let session = parse_session(json).unwrap();
        let layout = TimelineLayout::build(&session, &LayoutOptions::default()).unwrap();
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.row("p1").unwrap().display_name, "First (P1)");
        assert_eq!(layout.rows[1].display_name, "Second (P1)");
    }

    #[test]
    fn zero_step_fails_pass() {
        let session = parse_session(DOC).unwrap();
        let options = LayoutOptions {
            step_minutes: 0,
            ..LayoutOptions::default()
        };
        let err = TimelineLayout::build(&session, &options).unwrap_err();
        assert_eq!(err, LayoutError::Axis(AxisError::InvalidStep));
    }

    #[test]
    fn duration_mode_selects_helper() {
        let start = Utc.with_ymd_and_hms(2024, 4, 2, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 4, 2, 11, 15, 0).unwrap();
        assert_eq!(DurationMode::Total.minutes(start, end), 75);
        assert_eq!(DurationMode::WithinHour.minutes(start, end), 15);
    }

    #[test]
    fn offset_applies_to_labels_and_summary() {
        let session = parse_session(DOC).unwrap();
        let options = LayoutOptions {
            offset: FixedOffset::east_opt(3600).unwrap(),
            ..LayoutOptions::default()
        };
        let layout = TimelineLayout::build(&session, &options).unwrap();
        assert_eq!(layout.labels[0].text, "11:00");
        assert_eq!(layout.summary.start, "2 April 2024, 11:00");
    }

    #[test]
    fn json_output_omits_absent_fields() {
        let layout = layout();
        let error = &layout.rows[0].markers[4];
        let json = serde_json::to_value(error).unwrap();
        assert_eq!(json["kind"], "error");
        assert!(json.get("end").is_none());
        assert!(json.get("error").is_none());
        assert_eq!(json["placement"]["width_pct"], 0.0);
    }
}
