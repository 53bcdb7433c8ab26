//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Participant-wise session timeline.
///
/// Plots each participant's mic, webcam, error and login/logout events on a
/// shared time axis.
#[derive(Debug, Parser)]
#[command(name = "tl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Minutes between header labels (overrides config).
    #[arg(long, global = true)]
    pub step: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Draw the timeline chart in the terminal.
    Chart(ChartArgs),

    /// Print the header labels, one per line.
    Labels(LabelsArgs),

    /// Show the details panel for one participant.
    Details {
        /// Session document (JSON).
        file: PathBuf,

        /// Participant ID (case-insensitive).
        participant: String,
    },

    /// Print the computed layout as JSON.
    Layout {
        /// Session document (JSON).
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Session document (JSON).
    pub file: PathBuf,

    /// Lane width in columns (overrides config).
    #[arg(long)]
    pub width: Option<usize>,

    /// Only print the header ruler.
    #[arg(long)]
    pub hide_participants: bool,
}

#[derive(Debug, Args)]
pub struct LabelsArgs {
    /// Session document (JSON).
    pub file: Option<PathBuf>,

    /// Range start (ISO 8601), used instead of a session document.
    #[arg(long, requires = "end", conflicts_with = "file")]
    pub start: Option<String>,

    /// Range end (ISO 8601).
    #[arg(long, requires = "start")]
    pub end: Option<String>,
}
