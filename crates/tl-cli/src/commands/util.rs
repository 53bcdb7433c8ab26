//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tl_core::{LayoutOptions, Session, TimelineLayout};

/// Parses an ISO 8601 timestamp given on the command line.
pub fn parse_timestamp(s: &str, name: &str) -> Result<DateTime<Utc>> {
    let dt = DateTime::parse_from_rfc3339(s).with_context(|| {
        format!("invalid --{name} timestamp, expected ISO 8601 (e.g., 2024-04-02T10:00:00Z)")
    })?;
    Ok(dt.with_timezone(&Utc))
}

/// Loads a session document.
pub fn load_session(path: &Path) -> Result<Session> {
    tl_core::load_from_path(path)
        .with_context(|| format!("failed to load session from {}", path.display()))
}

/// Loads a session document and runs a rendering pass over it.
pub fn load_layout(path: &Path, options: &LayoutOptions) -> Result<TimelineLayout> {
    let session = load_session(path)?;
    TimelineLayout::build(&session, options).context("failed to lay out timeline")
}
