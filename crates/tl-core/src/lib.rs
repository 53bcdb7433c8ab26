//! Core timeline layout logic for session timelines.
//!
//! This crate contains:
//! - Axis labels: the evenly spaced `HH:mm` header ruler
//! - Projection: mapping event times to percentages of the session span
//! - Source: loading and normalizing session documents
//! - Layout: a full rendering pass with per-event failure isolation

pub mod axis;
pub mod event_kind;
pub mod format;
pub mod layout;
pub mod model;
pub mod projection;
pub mod source;
pub mod types;

pub use axis::{
    AxisError, AxisLabel, DEFAULT_STEP_MINUTES, generate_labels, generate_labels_with_offset,
    label_width_pct,
};
pub use event_kind::EventKind;
pub use layout::{
    DurationMode, EventMarker, LayoutError, LayoutOptions, MarkerOutcome, ParticipantRow,
    SessionSummary, TimelineLayout,
};
pub use model::{
    InvalidRange, Occurrence, Participant, ParticipantEvents, Session, SessionWindow,
    TimedInterval, TimedPoint,
};
pub use projection::{
    Placement, ProjectionError, duration_minutes, elapsed_minutes, project,
};
pub use source::{SourceError, load_from_path, parse_session};
pub use types::{ParticipantId, ValidationError};
