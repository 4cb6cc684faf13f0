//! Terminal drawing for the game states

pub mod renderer;

pub use renderer::{Layer, Renderer, CELL_WIDTH};
