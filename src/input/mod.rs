//! # Input Module
//!
//! Keyboard handling for the exploration window.

use crate::game::Direction;
use macroquad::prelude::*;

/// Player input types produced by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Walk one cell (or turn to face a blocked cell)
    Move(Direction),
    /// Next prompt page, or hide the prompt after the last one
    Confirm,
    /// Hide the prompt regardless of remaining pages
    Cancel,
    /// Close the window
    Quit,
}

/// Keys polled every window frame, in priority order.
const BINDINGS: [KeyCode; 12] = [
    KeyCode::Q,
    KeyCode::Escape,
    KeyCode::Space,
    KeyCode::Enter,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
];

/// Input handler for processing player commands.
///
/// Converts macroquad key presses into [`PlayerInput`] values that the scene
/// manager forwards to the engine.
pub struct InputHandler {
    /// Whether WASD also moves the player
    pub wasd_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilewalk::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.wasd_enabled);
    /// ```
    pub fn new() -> Self {
        Self { wasd_enabled: true }
    }

    /// Gets the input for this window frame, if any bound key was pressed.
    pub fn get_input(&self) -> Option<PlayerInput> {
        BINDINGS
            .iter()
            .copied()
            .filter(|key| is_key_pressed(*key))
            .find_map(|key| self.map_key(key))
    }

    /// Maps a single key to its input, honouring `wasd_enabled`.
    ///
    /// # Examples
    ///
    /// ```
    /// use macroquad::prelude::KeyCode;
    /// use tilewalk::{Direction, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(
    ///     input_handler.map_key(KeyCode::Left),
    ///     Some(PlayerInput::Move(Direction::Left))
    /// );
    /// ```
    pub fn map_key(&self, key: KeyCode) -> Option<PlayerInput> {
        let input = match key {
            KeyCode::Q => PlayerInput::Quit,
            KeyCode::Escape => PlayerInput::Cancel,
            KeyCode::Space | KeyCode::Enter => PlayerInput::Confirm,
            KeyCode::Up => PlayerInput::Move(Direction::Up),
            KeyCode::Down => PlayerInput::Move(Direction::Down),
            KeyCode::Left => PlayerInput::Move(Direction::Left),
            KeyCode::Right => PlayerInput::Move(Direction::Right),
            KeyCode::W if self.wasd_enabled => PlayerInput::Move(Direction::Up),
            KeyCode::S if self.wasd_enabled => PlayerInput::Move(Direction::Down),
            KeyCode::A if self.wasd_enabled => PlayerInput::Move(Direction::Left),
            KeyCode::D if self.wasd_enabled => PlayerInput::Move(Direction::Right),
            _ => return None,
        };
        Some(input)
    }
}
