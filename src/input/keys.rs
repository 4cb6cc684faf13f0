//! Raw keys bound to each logical command

use crossterm::event::KeyCode;

use crate::game::Direction;

pub const START: KeyCode = KeyCode::Char('s');
pub const RESTART: KeyCode = KeyCode::Char('r');
pub const MENU: KeyCode = KeyCode::Char('m');
pub const QUIT: KeyCode = KeyCode::Char('q');

/// Arrow key for each direction
pub const ARROWS: [(KeyCode, Direction); 4] = [
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
];

/// Label shown to the player for a key
pub fn label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        other => format!("{other:?}"),
    }
}
