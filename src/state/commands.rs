//! Subscribers the states bind into their registries

use crate::game::Direction;
use crate::input::Subscriber;

use super::playing::Board;
use super::Transition;

/// Ask the engine for a state change; valid in every state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSetter(pub Transition);

impl<S> Subscriber<S> for StateSetter {
    fn update(&self, _state: &mut S) -> Option<Transition> {
        Some(self.0)
    }
}

/// Request a new heading for the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionChange(pub Direction);

impl Subscriber<Board> for DirectionChange {
    fn update(&self, board: &mut Board) -> Option<Transition> {
        board.change_direction(self.0);
        None
    }
}

/// Run one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Advance;

impl Subscriber<Board> for Advance {
    fn update(&self, board: &mut Board) -> Option<Transition> {
        board.advance()
    }
}
