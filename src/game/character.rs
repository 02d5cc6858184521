//! # Characters
//!
//! The player-controlled entity and the sprite sheet layout used to draw it.

use crate::game::{Direction, Position};
use macroquad::prelude::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// A cell on a sprite sheet, counted in sheet cells rather than pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SheetCell {
    pub col: u32,
    pub row: u32,
}

impl SheetCell {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// The sheet cells shown in order while walking one step.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkCycle {
    pub frames: Vec<SheetCell>,
    pub duration: Duration,
}

impl WalkCycle {
    /// Time each sheet cell stays on screen.
    pub fn frame_interval(&self) -> Duration {
        if self.frames.is_empty() {
            return Duration::ZERO;
        }
        self.duration / self.frames.len() as u32
    }
}

/// Sprite sheet layout for a character.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpriteSheet {
    /// Path or URL of the sheet image; `None` means raw rendering only
    pub image: Option<String>,
    /// Pixel size (width, height) of one sheet cell
    pub cell_size: (f32, f32),
    /// Idle cell per facing direction
    pub idle: HashMap<Direction, SheetCell>,
    /// Walk cycle per facing direction
    pub walk: HashMap<Direction, WalkCycle>,
}

impl SpriteSheet {
    /// Idle cell for `direction`, falling back to the sheet origin.
    pub fn idle_cell(&self, direction: Direction) -> SheetCell {
        self.idle.get(&direction).copied().unwrap_or_default()
    }

    /// Walk cycle for `direction`, if it has at least one frame.
    pub fn walk_cycle(&self, direction: Direction) -> Option<&WalkCycle> {
        self.walk
            .get(&direction)
            .filter(|cycle| !cycle.frames.is_empty())
    }
}

/// A character living on a frame grid.
#[derive(Debug, Clone)]
pub struct Character {
    /// Name used for asset keys and position memory
    pub key: String,
    pub position: Position,
    pub direction: Direction,
    /// Fill color in raw rendering
    pub color: Color,
    pub sprite: SpriteSheet,
}

impl Character {
    /// Creates a character facing down with no sprite sheet.
    pub fn new(key: impl Into<String>, position: Position, color: Color) -> Self {
        Self {
            key: key.into(),
            position,
            direction: Direction::Down,
            color,
            sprite: SpriteSheet::default(),
        }
    }

    pub fn with_sprite(mut self, sprite: SpriteSheet) -> Self {
        self.sprite = sprite;
        self
    }

    /// Sheet cell for the current facing while standing still.
    pub fn idle_cell(&self) -> SheetCell {
        self.sprite.idle_cell(self.direction)
    }

    /// Logical name under which the sprite sheet image is cached.
    pub fn asset_key(&self) -> String {
        format!("character-{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::RED;

    #[test]
    fn test_idle_cell_follows_direction() {
        let mut idle = HashMap::new();
        idle.insert(Direction::Up, SheetCell::new(2, 0));
        idle.insert(Direction::Right, SheetCell::new(3, 0));
        let sprite = SpriteSheet {
            idle,
            ..SpriteSheet::default()
        };
        let mut player = Character::new("player", Position::origin(), RED).with_sprite(sprite);

        player.direction = Direction::Up;
        assert_eq!(player.idle_cell(), SheetCell::new(2, 0));
        player.direction = Direction::Right;
        assert_eq!(player.idle_cell(), SheetCell::new(3, 0));
        player.direction = Direction::Left;
        assert_eq!(player.idle_cell(), SheetCell::default());
    }

    #[test]
    fn test_empty_walk_cycle_is_ignored() {
        let mut walk = HashMap::new();
        walk.insert(
            Direction::Down,
            WalkCycle {
                frames: Vec::new(),
                duration: Duration::from_millis(150),
            },
        );
        let sprite = SpriteSheet {
            walk,
            ..SpriteSheet::default()
        };
        assert!(sprite.walk_cycle(Direction::Down).is_none());
        assert!(sprite.walk_cycle(Direction::Up).is_none());
    }

    #[test]
    fn test_frame_interval_splits_duration() {
        let cycle = WalkCycle {
            frames: vec![SheetCell::new(0, 1), SheetCell::new(0, 2), SheetCell::new(0, 3)],
            duration: Duration::from_millis(150),
        };
        assert_eq!(cycle.frame_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_asset_key() {
        let player = Character::new("player", Position::origin(), RED);
        assert_eq!(player.asset_key(), "character-player");
    }
}
