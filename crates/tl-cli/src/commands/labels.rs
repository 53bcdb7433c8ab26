//! Labels command: prints the header ruler, one label per line.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tl_core::{LayoutOptions, generate_labels_with_offset};

pub fn run<W: Write>(
    writer: &mut W,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    options: &LayoutOptions,
) -> Result<()> {
    let labels = generate_labels_with_offset(start, end, options.step_minutes, options.offset)
        .context("failed to generate labels")?;

    for label in labels {
        writeln!(writer, "{}", label.text)?;
    }

    Ok(())
}
