//! Chart command: draws the timeline in the terminal.
//!
//! Each row is a lane of fixed width. The baseline is `─`, login/logout spans
//! are `━`, and each marker's glyph sits at its start column. Later kinds are
//! drawn over earlier ones, so errors stay visible.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use tl_core::{EventKind, ParticipantRow, Placement, TimelineLayout};

const TITLE: &str = "Participant-wise Session Timeline";
const BASELINE: char = '─';
const PRESENCE: char = '━';
const MIN_WIDTH: usize = 10;

/// Maps a percentage onto a column in `[0, width)`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn column(pct: f64, width: usize) -> usize {
    let fraction = pct.clamp(0.0, 100.0) / 100.0;
    ((fraction * (width - 1) as f64).round() as usize).min(width - 1)
}

/// Whether any part of the placement falls inside the window.
fn visible(placement: &Placement) -> bool {
    placement.end_pct() >= 0.0 && placement.position_pct <= 100.0
}

#[allow(clippy::cast_precision_loss)]
fn render_header(layout: &TimelineLayout, width: usize) -> String {
    let mut cells = vec![' '; width];
    let span_ms = layout.window.span_ms();
    let mut next_free = 0;

    for label in &layout.labels {
        let len = label.text.chars().count();
        if len > width {
            continue;
        }
        let pct = if span_ms > 0 {
            (label.at - layout.window.start()).num_milliseconds() as f64 / span_ms as f64 * 100.0
        } else {
            0.0
        };
        let col = column(pct, width).min(width - len);
        // Skip labels that would collide with the previous one
        if col < next_free {
            continue;
        }
        for (offset, ch) in label.text.chars().enumerate() {
            cells[col + offset] = ch;
        }
        next_free = col + len + 1;
    }

    cells.into_iter().collect::<String>().trim_end().to_string()
}

fn render_lane(row: &ParticipantRow, width: usize) -> String {
    let mut cells = vec![BASELINE; width];

    for span in row.presence_spans().filter(visible) {
        let span = span.clamped();
        let from = column(span.position_pct, width);
        let to = column(span.end_pct(), width);
        cells[from..=to].fill(PRESENCE);
    }

    for marker in &row.markers {
        let Some(placement) = marker.placement() else {
            continue;
        };
        if visible(&placement) {
            cells[column(placement.clamped().position_pct, width)] = marker.kind.glyph();
        }
    }

    cells.into_iter().collect()
}

fn legend() -> String {
    EventKind::ALL
        .iter()
        .map(|kind| format!("{} {kind}", kind.glyph()))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Renders the whole chart as text.
pub fn render_chart(layout: &TimelineLayout, width: usize, show_participants: bool) -> String {
    let width = width.max(MIN_WIDTH);
    let mut output = String::new();

    writeln!(output, "{TITLE}").unwrap();
    writeln!(output, "{}", render_header(layout, width)).unwrap();

    if !show_participants {
        return output;
    }

    for row in &layout.rows {
        writeln!(output).unwrap();
        writeln!(output, "{}", row.display_name).unwrap();
        writeln!(output, "{}", row.summary_line).unwrap();
        writeln!(output, "{}", render_lane(row, width)).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "{}", legend()).unwrap();

    let failed = layout.failed_markers();
    if failed > 0 {
        writeln!(output, "{failed} event(s) could not be placed on the timeline").unwrap();
    }

    output
}

/// Runs the chart command.
pub fn run<W: Write>(
    writer: &mut W,
    layout: &TimelineLayout,
    width: usize,
    show_participants: bool,
) -> Result<()> {
    write!(writer, "{}", render_chart(layout, width, show_participants))?;
    Ok(())
}
