//! Retro Snake - a snake game on a wrap-around grid
//!
//! This library provides:
//! - Geometry, grid math, entities and settings (game module)
//! - Event wrapping and per-state subscriber registries (input module)
//! - Menu / Playing / GameOver states (state module)
//! - The engine that owns the active state (engine module)
//! - Terminal rendering and the interactive runner (render, modes modules)

pub mod engine;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod state;

pub use engine::Engine;
