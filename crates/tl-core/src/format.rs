//! Human-readable strings shown in row headers and tooltips.

use chrono::{DateTime, FixedOffset, Utc};

use crate::event_kind::EventKind;
use crate::types::ParticipantId;

/// Formats an instant as `D Month YYYY, HH:mm`, e.g. `2 April 2024, 11:31`.
pub fn format_date_time(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant
        .with_timezone(&offset)
        .format("%-d %B %Y, %H:%M")
        .to_string()
}

/// Formats a minute count as shown in row summaries.
pub fn format_duration(minutes: i64) -> String {
    format!("{minutes} Mins")
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Row heading, e.g. `Alice (P1)`.
pub fn display_name(name: &str, id: &ParticipantId) -> String {
    format!("{} ({})", capitalize_first(name), id.display_form())
}

/// Hover text for a marker: the event's own message, or a generic label.
pub fn tooltip_text(kind: EventKind, message: Option<&str>) -> String {
    match message {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => format!("{kind} event"),
    }
}
