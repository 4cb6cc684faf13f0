//! Core game model for Snake
//!
//! Geometry, grid math, entities and session settings. Nothing in here does
//! I/O or rendering; the states in [`crate::state`] drive it.

pub mod direction;
pub mod geometry;
pub mod grid;
pub mod settings;
pub mod sprites;

// Re-export commonly used types
pub use direction::Direction;
pub use geometry::{cell_origin, screen_size, wrap_translate, Point, Rect, Size};
pub use grid::Grid;
pub use settings::{BlockColors, GameSettings, SettingsError};
pub use sprites::{spawn_food, Food, Snake, Sprite};
