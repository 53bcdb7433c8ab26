//! Session timeline CLI library.
//!
//! This crate provides the CLI interface for the session timeline.

mod cli;
pub mod commands;
mod config;

pub use cli::{ChartArgs, Cli, Commands, LabelsArgs};
pub use config::{Config, DEFAULT_CHART_WIDTH, UtcOffset};
