//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tl_core::{DEFAULT_STEP_MINUTES, DurationMode, LayoutOptions};

/// Default lane width of the terminal chart, in columns.
pub const DEFAULT_CHART_WIDTH: usize = 80;

/// A fixed UTC offset written as `±HH:MM` (or `Z`).
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UtcOffset(FixedOffset);

impl UtcOffset {
    pub const fn get(self) -> FixedOffset {
        self.0
    }
}

impl Default for UtcOffset {
    fn default() -> Self {
        Self(Utc.fix())
    }
}

impl TryFrom<String> for UtcOffset {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
            return Ok(Self::default());
        }
        trimmed
            .parse::<FixedOffset>()
            .map(Self)
            .map_err(|e| format!("invalid UTC offset {value:?} (expected ±HH:MM): {e}"))
    }
}

impl From<UtcOffset> for String {
    fn from(offset: UtcOffset) -> Self {
        offset.0.to_string()
    }
}

impl fmt::Debug for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minutes between header labels.
    pub step_minutes: u32,

    /// Lane width of the terminal chart, in columns.
    pub chart_width: usize,

    /// Offset used for every displayed clock time.
    pub utc_offset: UtcOffset,

    /// How the displayed session duration is computed.
    pub duration_mode: DurationMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_minutes: DEFAULT_STEP_MINUTES,
            chart_width: DEFAULT_CHART_WIDTH,
            utc_offset: UtcOffset::default(),
            duration_mode: DurationMode::default(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TL_*)
        figment = figment.merge(Env::prefixed("TL_"));

        figment.extract()
    }

    /// Options for a rendering pass.
    pub const fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            step_minutes: self.step_minutes,
            offset: self.utc_offset.get(),
            duration_mode: self.duration_mode,
        }
    }
}

/// Returns the platform-specific config directory for tl.
///
/// On Linux: `~/.config/tl`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tl"))
}
