use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::grid::GridSize;

const APP_DIR_NAME: &str = "wrap-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Playfield width in pixels.
pub const DEFAULT_SCREEN_WIDTH: u16 = 640;

/// Playfield height in pixels.
pub const DEFAULT_SCREEN_HEIGHT: u16 = 480;

/// Edge length of one square cell in pixels.
pub const DEFAULT_CELL_SIZE: u16 = 20;

/// Simulation ticks per second.
pub const DEFAULT_TICKS_PER_SECOND: u16 = 20;

/// Smallest accepted grid side in cells.
///
/// Food placement retries until it finds a free cell, so the grid must stay
/// far larger than any snake a round reaches.
pub const MIN_GRID_SIDE: u16 = 4;

/// Colors used by the renderer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub border: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
}

/// Black board, cyan border, green snake, red apple.
pub const PALETTE_CLASSIC: Palette = Palette {
    background: Color::Rgb(0, 0, 0),
    border: Color::Rgb(93, 216, 228),
    snake_head: Color::Rgb(160, 255, 160),
    snake_body: Color::Rgb(0, 255, 0),
    food: Color::Rgb(255, 0, 0),
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings. Every field may be omitted from the settings file.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub screen_width: u16,
    pub screen_height: u16,
    pub cell_size: u16,
    pub ticks_per_second: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
        }
    }
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct SettingsOverrides {
    pub screen_width: Option<u16>,
    pub screen_height: Option<u16>,
    pub cell_size: Option<u16>,
    pub ticks_per_second: Option<u16>,
}

impl Settings {
    /// Loads settings from the platform config directory.
    ///
    /// Returns defaults when the file does not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&settings_path())
    }

    /// Loads settings from `path`, falling back to defaults when it is missing.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies command-line overrides on top of these settings.
    #[must_use]
    pub fn with_overrides(self, overrides: SettingsOverrides) -> Self {
        Self {
            screen_width: overrides.screen_width.unwrap_or(self.screen_width),
            screen_height: overrides.screen_height.unwrap_or(self.screen_height),
            cell_size: overrides.cell_size.unwrap_or(self.cell_size),
            ticks_per_second: overrides.ticks_per_second.unwrap_or(self.ticks_per_second),
        }
    }

    /// Grid dimensions in cells; partial cells at the edges are dropped.
    pub fn grid(&self) -> Result<GridSize, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::Invalid("cell size must be at least 1".to_owned()));
        }

        let grid = GridSize {
            width: self.screen_width / self.cell_size,
            height: self.screen_height / self.cell_size,
        };
        if grid.width < MIN_GRID_SIDE || grid.height < MIN_GRID_SIDE {
            return Err(ConfigError::Invalid(format!(
                "a {}x{} screen with {}px cells gives a {}x{} grid, need at least {MIN_GRID_SIDE}x{MIN_GRID_SIDE}",
                self.screen_width, self.screen_height, self.cell_size, grid.width, grid.height
            )));
        }

        Ok(grid)
    }

    /// Wall-clock time between ticks.
    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        if self.ticks_per_second == 0 {
            return Err(ConfigError::Invalid(
                "ticks per second must be at least 1".to_owned(),
            ));
        }

        Ok(Duration::from_millis(1000 / u64::from(self.ticks_per_second)))
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}
