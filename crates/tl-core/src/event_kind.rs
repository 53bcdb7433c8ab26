//! Event kind enum as the single source of truth for event kind strings.

use serde::Serialize;
use std::fmt;

/// Kinds of markers drawn on a participant row.
///
/// Variant order is the draw order within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Timelog,
    Mic,
    Webcam,
    Error,
}

impl EventKind {
    /// All kinds, in draw order.
    pub const ALL: [Self; 4] = [Self::Timelog, Self::Mic, Self::Webcam, Self::Error];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Timelog => "timelog",
            Self::Mic => "mic",
            Self::Webcam => "webcam",
            Self::Error => "error",
        }
    }

    /// Icon shown on the marker.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Timelog => "🔵",
            Self::Mic => "🎤",
            Self::Webcam => "📷",
            Self::Error => "⚠️",
        }
    }

    /// Single-column glyph for terminal charts.
    #[must_use]
    pub const fn glyph(&self) -> char {
        match self {
            Self::Timelog => 'o',
            Self::Mic => 'M',
            Self::Webcam => 'W',
            Self::Error => '!',
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_json_use_canonical_strings() {
        let shown: Vec<String> = EventKind::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(shown, ["timelog", "mic", "webcam", "error"]);
        assert_eq!(
            serde_json::to_string(&EventKind::Webcam).unwrap(),
            "\"webcam\""
        );
    }

    #[test]
    fn all_is_sorted_draw_order() {
        let mut sorted = EventKind::ALL;
        sorted.sort();
        assert_eq!(sorted, EventKind::ALL);
    }

    #[test]
    fn glyphs_are_distinct() {
        let glyphs: std::collections::HashSet<char> =
            EventKind::ALL.iter().map(EventKind::glyph).collect();
        assert_eq!(glyphs.len(), EventKind::ALL.len());
    }
}
