//! Session domain model: the window, participants and their timed events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event_kind::EventKind;
use crate::types::ParticipantId;

/// A range whose start lies after its end.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid range: start {start} is after end {end}")]
pub struct InvalidRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// The shared time axis every row is plotted against.
///
/// Always satisfies `start <= end`. A zero-length window is valid here but
/// cannot be projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SessionWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidRange> {
        if start > end {
            return Err(InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Span of the window in milliseconds.
    pub fn span_ms(&self) -> i64 {
        (self.end - self.start).num_milliseconds()
    }
}

/// An event with a duration. May extend past the session window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimedInterval {
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration_ms(&self) -> i64 {
        (self.end - self.start).num_milliseconds()
    }
}

/// An instantaneous event, such as an error report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedPoint {
    pub start: DateTime<Utc>,
    pub message: String,
}

/// Anything that can be projected onto the session axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence<'a> {
    Interval(&'a TimedInterval),
    Point(&'a TimedPoint),
}

impl Occurrence<'_> {
    pub const fn start(&self) -> DateTime<Utc> {
        match self {
            Self::Interval(interval) => interval.start,
            Self::Point(point) => point.start,
        }
    }

    /// End instant, if the occurrence has one.
    pub const fn end(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Interval(interval) => Some(interval.end),
            Self::Point(_) => None,
        }
    }
}

impl<'a> From<&'a TimedInterval> for Occurrence<'a> {
    fn from(interval: &'a TimedInterval) -> Self {
        Self::Interval(interval)
    }
}

impl<'a> From<&'a TimedPoint> for Occurrence<'a> {
    fn from(point: &'a TimedPoint) -> Self {
        Self::Point(point)
    }
}

/// Per-participant device and error events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantEvents {
    #[serde(default)]
    pub mic: Vec<TimedInterval>,
    #[serde(default)]
    pub webcam: Vec<TimedInterval>,
    #[serde(default)]
    pub errors: Vec<TimedPoint>,
}

/// One attendee of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub participant_id: ParticipantId,
    pub name: String,
    /// Login/logout intervals.
    #[serde(default)]
    pub timelog: Vec<TimedInterval>,
    #[serde(default)]
    pub events: ParticipantEvents,
}

impl Participant {
    /// Every occurrence on this participant's row, in draw order, tagged with
    /// its kind and index within that kind.
    pub fn occurrences(&self) -> impl Iterator<Item = (EventKind, usize, Occurrence<'_>)> {
        let timelog = self
            .timelog
            .iter()
            .enumerate()
            .map(|(i, o)| (EventKind::Timelog, i, Occurrence::from(o)));
        let mic = self
            .events
            .mic
            .iter()
            .enumerate()
            .map(|(i, o)| (EventKind::Mic, i, Occurrence::from(o)));
        let webcam = self
            .events
            .webcam
            .iter()
            .enumerate()
            .map(|(i, o)| (EventKind::Webcam, i, Occurrence::from(o)));
        let errors = self
            .events
            .errors
            .iter()
            .enumerate()
            .map(|(i, o)| (EventKind::Error, i, Occurrence::from(o)));
        timelog.chain(mic).chain(webcam).chain(errors)
    }
}

/// A fully normalized session: the window plus its participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub window: SessionWindow,
    pub participants: Vec<Participant>,
}

impl Session {
    /// Finds a participant by ID, ignoring case.
    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.participant_id.matches(id))
    }
}
