use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::geometry::{screen_size, Size};
use crate::render::CELL_WIDTH;

/// Widest grid whose board still fits a terminal row
pub const MAX_GRID_WIDTH: i32 = (u16::MAX / CELL_WIDTH) as i32;
/// Tallest grid that leaves a terminal row for the status line
pub const MAX_GRID_HEIGHT: i32 = u16::MAX as i32 - 1;

/// Fill and border colors for one kind of block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockColors {
    pub fill: Color,
    pub border: Color,
}

impl BlockColors {
    pub const fn new(fill: Color, border: Color) -> Self {
        Self { fill, border }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },
    #[error("{field} is {value}, above the limit of {max}")]
    TooLarge {
        field: &'static str,
        value: i64,
        max: i64,
    },
}

/// Configuration for one game session
///
/// Built once at startup and handed by value to every state; nothing in the
/// engine mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Pixel size of one grid cell
    pub unit_size: Size,
    /// Number of cells in each direction
    pub grid_size: Size,
    /// Milliseconds between two ticks while playing
    pub tick_interval_ms: u64,
    /// Snake length below which every tick grows the snake
    pub auto_grow_until: usize,
    /// Random draws tried before food placement falls back to a scan
    pub max_food_attempts: usize,

    pub snake_colors: BlockColors,
    pub food_colors: BlockColors,
    pub menu_background: Color,
    pub game_background: Color,
    pub game_over_background: Color,
    pub menu_title_color: Color,
    pub game_over_title_color: Color,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            unit_size: Size::new(20, 20),
            grid_size: Size::new(20, 20),
            tick_interval_ms: 300,
            auto_grow_until: 10,
            max_food_attempts: 1000,
            snake_colors: BlockColors::new(Color::Magenta, Color::Black),
            food_colors: BlockColors::new(Color::Red, Color::Black),
            menu_background: Color::Green,
            game_background: Color::Green,
            game_over_background: Color::Green,
            menu_title_color: Color::Magenta,
            game_over_title_color: Color::Black,
        }
    }
}

impl GameSettings {
    /// Default settings with a custom grid size
    pub fn new(grid_width: i32, grid_height: i32) -> Self {
        Self {
            grid_size: Size::new(grid_width, grid_height),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read settings from a JSON file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn screen_size(&self) -> Size {
        screen_size(self.unit_size, self.grid_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check that every dimension and period is usable
    pub fn validate(&self) -> Result<(), SettingsError> {
        let checks: [(&'static str, i64); 6] = [
            ("unit_size.width", self.unit_size.width as i64),
            ("unit_size.height", self.unit_size.height as i64),
            ("grid_size.width", self.grid_size.width as i64),
            ("grid_size.height", self.grid_size.height as i64),
            ("tick_interval_ms", self.tick_interval_ms as i64),
            ("max_food_attempts", self.max_food_attempts as i64),
        ];

        for (field, value) in checks {
            if value <= 0 {
                return Err(SettingsError::NotPositive { field, value });
            }
        }

        let max_i32 = i32::MAX as i64;
        let limits: [(&'static str, i64, i64); 4] = [
            ("grid_size.width", self.grid_size.width as i64, MAX_GRID_WIDTH as i64),
            ("grid_size.height", self.grid_size.height as i64, MAX_GRID_HEIGHT as i64),
            (
                "unit_size.width * grid_size.width",
                self.unit_size.width as i64 * self.grid_size.width as i64,
                max_i32,
            ),
            (
                "unit_size.height * grid_size.height",
                self.unit_size.height as i64 * self.grid_size.height as i64,
                max_i32,
            ),
        ];

        for (field, value, max) in limits {
            if value > max {
                return Err(SettingsError::TooLarge { field, value, max });
            }
        }

        Ok(())
    }
}
