//! CLI subcommand implementations.

pub mod chart;
pub mod details;
pub mod labels;
pub mod layout;
pub mod util;
