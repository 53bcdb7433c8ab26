//! Layout command: prints the computed rendering pass as JSON.
//!
//! This is the hand-off format for presentation layers: header labels with
//! their column width, session summary strings, and per-row markers with
//! either a placement or the reason it could not be placed.

use std::io::Write;

use anyhow::Result;
use tl_core::TimelineLayout;

pub fn format_layout_json(layout: &TimelineLayout) -> Result<String> {
    Ok(serde_json::to_string_pretty(layout)?)
}

pub fn run<W: Write>(writer: &mut W, layout: &TimelineLayout) -> Result<()> {
    writeln!(writer, "{}", format_layout_json(layout)?)?;
    Ok(())
}
