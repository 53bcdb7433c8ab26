//! Header ruler labels.
//!
//! Labels start at the session start and advance by a fixed step while the
//! running instant is still at or before the session end. The end instant is
//! never synthesized as an extra label: a span that is not a multiple of the
//! step ends on the last step boundary before it.

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::InvalidRange;

/// Default spacing between ruler labels.
pub const DEFAULT_STEP_MINUTES: u32 = 2;

/// Label generation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AxisError {
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),

    /// A zero step would never reach the end of the range.
    #[error("label step must be at least one minute")]
    InvalidStep,
}

/// One tick on the header ruler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisLabel {
    /// Zero-padded 24-hour `HH:mm`.
    pub text: String,
    /// Position in the sequence; also chronological order.
    pub index: usize,
    /// The instant this label marks.
    pub at: DateTime<Utc>,
}

/// Generates labels formatted in UTC.
pub fn generate_labels(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step_minutes: u32,
) -> Result<Vec<AxisLabel>, AxisError> {
    generate_labels_with_offset(start, end, step_minutes, Utc.fix())
}

/// Generates labels formatted in a fixed UTC offset.
pub fn generate_labels_with_offset(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step_minutes: u32,
    offset: FixedOffset,
) -> Result<Vec<AxisLabel>, AxisError> {
    if start > end {
        return Err(InvalidRange { start, end }.into());
    }
    if step_minutes == 0 {
        return Err(AxisError::InvalidStep);
    }

    let step = Duration::minutes(i64::from(step_minutes));
    let mut labels = Vec::new();
    let mut current = start;
    while current <= end {
        labels.push(AxisLabel {
            text: current.with_timezone(&offset).format("%H:%M").to_string(),
            index: labels.len(),
            at: current,
        });
        current += step;
    }

    tracing::trace!(count = labels.len(), step_minutes, "generated axis labels");
    Ok(labels)
}

/// Width of each header column when `count` labels share the full width.
#[allow(clippy::cast_precision_loss)]
pub fn label_width_pct(count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    100.0 / count as f64
}
