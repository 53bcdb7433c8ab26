//! Details command: the per-participant "View details" panel.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::FixedOffset;
use tl_core::{EventMarker, TimelineLayout};

fn clock(marker: &EventMarker, offset: FixedOffset) -> String {
    let start = marker.start.with_timezone(&offset).format("%H:%M");
    match marker.end {
        Some(end) => format!("{start}-{}", end.with_timezone(&offset).format("%H:%M")),
        None => start.to_string(),
    }
}

pub fn run<W: Write>(
    writer: &mut W,
    layout: &TimelineLayout,
    participant_id: &str,
    offset: FixedOffset,
) -> Result<()> {
    let Some(row) = layout.row(participant_id) else {
        bail!("participant not found: {participant_id}");
    };

    writeln!(writer, "{}", row.display_name)?;
    writeln!(writer, "Session Start: {}", layout.summary.start)?;
    writeln!(writer, "Session End: {}", layout.summary.end)?;
    writeln!(writer, "Total Duration: {}", layout.summary.duration)?;

    if row.markers.is_empty() {
        writeln!(writer, "No events recorded.")?;
        return Ok(());
    }

    writeln!(writer, "Events:")?;
    for marker in &row.markers {
        let kind = marker.kind.to_string();
        let placed = match marker.projected() {
            Ok(placement) => format!("{:.1}%", placement.position_pct),
            Err(err) => format!("unplaced: {err}"),
        };
        writeln!(
            writer,
            "- {kind:<8}{:<12}{placed:<8}  {}",
            clock(marker, offset),
            marker.tooltip
        )?;
    }

    Ok(())
}
