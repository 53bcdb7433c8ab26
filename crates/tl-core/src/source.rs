//! Session document loading and normalization.
//!
//! The document shape is
//! `{ "participantArray": [...], "start": "<ISO-8601>", "end": "<ISO-8601>" }`.
//! Optional lists (`timelog`, `events.mic`, `events.webcam`, `events.errors`)
//! may be missing or `null`; both normalize to empty. Nothing past this
//! module sees an optional list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::model::{
    InvalidRange, Participant, ParticipantEvents, Session, SessionWindow, TimedInterval,
    TimedPoint,
};
use crate::types::{ParticipantId, ValidationError};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid timestamp at {field}: {value:?}")]
    InvalidTimestamp {
        field: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("invalid session window: {0}")]
    InvalidRange(#[from] InvalidRange),
    #[error("invalid value at {field}: {source}")]
    Validation {
        field: String,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSession {
    #[serde(default)]
    participant_array: Option<Vec<RawParticipant>>,
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParticipant {
    participant_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    timelog: Option<Vec<RawInterval>>,
    #[serde(default)]
    events: Option<RawEvents>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEvents {
    #[serde(default)]
    mic: Option<Vec<RawInterval>>,
    #[serde(default)]
    webcam: Option<Vec<RawInterval>>,
    #[serde(default)]
    errors: Option<Vec<RawPoint>>,
}

#[derive(Debug, Deserialize)]
struct RawInterval {
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    start: String,
    #[serde(default)]
    message: Option<String>,
}

/// Parses a session document from a JSON string.
pub fn parse_session(json: &str) -> Result<Session, SourceError> {
    let raw: RawSession = serde_json::from_str(json)?;
    normalize(raw)
}

/// Reads and parses a session document from disk.
pub fn load_from_path(path: &Path) -> Result<Session, SourceError> {
    let json = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let session = parse_session(&json)?;
    tracing::debug!(
        path = %path.display(),
        participants = session.participants.len(),
        "loaded session"
    );
    Ok(session)
}

fn normalize(raw: RawSession) -> Result<Session, SourceError> {
    let start = parse_timestamp(&raw.start, "start")?;
    let end = parse_timestamp(&raw.end, "end")?;
    let window = SessionWindow::new(start, end)?;

    let participants = raw
        .participant_array
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, p)| normalize_participant(p, &format!("participantArray[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    for participant in &participants {
        if !seen.insert(participant.participant_id.as_str().to_lowercase()) {
            tracing::warn!(
                participant_id = %participant.participant_id,
                "duplicate participant ID in session"
            );
        }
    }

    Ok(Session {
        window,
        participants,
    })
}

fn normalize_participant(raw: RawParticipant, path: &str) -> Result<Participant, SourceError> {
    let participant_id =
        ParticipantId::new(raw.participant_id).map_err(|source| SourceError::Validation {
            field: format!("{path}.participantId"),
            source,
        })?;

    let timelog = normalize_intervals(raw.timelog, &format!("{path}.timelog"))?;
    let events = raw.events.unwrap_or_default();
    let events = ParticipantEvents {
        mic: normalize_intervals(events.mic, &format!("{path}.events.mic"))?,
        webcam: normalize_intervals(events.webcam, &format!("{path}.events.webcam"))?,
        errors: normalize_points(events.errors, &format!("{path}.events.errors"))?,
    };

    Ok(Participant {
        participant_id,
        name: raw.name,
        timelog,
        events,
    })
}

fn normalize_intervals(
    raw: Option<Vec<RawInterval>>,
    path: &str,
) -> Result<Vec<TimedInterval>, SourceError> {
    raw.unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, interval)| {
            Ok(TimedInterval::new(
                parse_timestamp(&interval.start, &format!("{path}[{i}].start"))?,
                parse_timestamp(&interval.end, &format!("{path}[{i}].end"))?,
            ))
        })
        .collect()
}

fn normalize_points(
    raw: Option<Vec<RawPoint>>,
    path: &str,
) -> Result<Vec<TimedPoint>, SourceError> {
    raw.unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, point)| {
            Ok(TimedPoint {
                start: parse_timestamp(&point.start, &format!("{path}[{i}].start"))?,
                message: point.message.unwrap_or_default(),
            })
        })
        .collect()
}

fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>, SourceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| SourceError::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
            source,
        })
}
