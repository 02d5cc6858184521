//! # World Definitions
//!
//! Serde shapes of the JSON world file and their conversion into frames and
//! characters. Coordinates in action tables are written as `"col:row"` strings
//! and parsed into [`Position`] keys here, once.

use crate::game::{
    Character, Direction, Frame, FrameAction, Position, SheetCell, SpriteSheet, TileCode,
    WalkCycle,
};
use crate::{EngineError, EngineResult};
use macroquad::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Top-level world file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldDefinition {
    pub frames: BTreeMap<String, FrameDefinition>,
    pub player: CharacterDefinition,
}

/// One frame as written in the world file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameDefinition {
    /// Rows of integer tile codes
    pub tiles: Vec<Vec<u8>>,
    /// Spawn point as `[col, row]`
    pub spawn: [i32; 2],
    /// `"col:row"` → action
    #[serde(default)]
    pub actions: BTreeMap<String, FrameAction>,
    /// Tile code → color name or `#rrggbb`
    #[serde(default)]
    pub colors: BTreeMap<u8, String>,
    #[serde(default)]
    pub background: Option<String>,
}

/// The player as written in the world file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDefinition {
    pub key: String,
    pub color: String,
    #[serde(default)]
    pub sprite: Option<SpriteDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDefinition {
    #[serde(default)]
    pub image: Option<String>,
    /// Pixel size `[width, height]` of one sheet cell
    pub cell_size: [f32; 2],
    #[serde(default)]
    pub idle: BTreeMap<Direction, [u32; 2]>,
    #[serde(default)]
    pub walk: BTreeMap<Direction, WalkDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkDefinition {
    pub frames: Vec<[u32; 2]>,
    pub duration_ms: u64,
}

/// Parses a `"col:row"` coordinate key.
///
/// # Examples
///
/// ```
/// use tilewalk::{parse_coordinate_key, Position};
///
/// assert_eq!(parse_coordinate_key("16:2").unwrap(), Position::new(16, 2));
/// assert!(parse_coordinate_key("16,2").is_err());
/// ```
pub fn parse_coordinate_key(key: &str) -> EngineResult<Position> {
    let invalid = || EngineError::InvalidDefinition(format!("bad coordinate key {:?}", key));

    let (col, row) = key.split_once(':').ok_or_else(invalid)?;
    let col = col.trim().parse::<i32>().map_err(|_| invalid())?;
    let row = row.trim().parse::<i32>().map_err(|_| invalid())?;

    Ok(Position::new(col, row))
}

/// Parses a color name (`"grey"`, `"lightgreen"`, ...) or a `#rrggbb` literal.
pub fn parse_color(name: &str) -> EngineResult<Color> {
    let lowered = name.trim().to_ascii_lowercase();

    if let Some(hex) = lowered.strip_prefix('#') {
        return parse_hex_color(hex)
            .ok_or_else(|| EngineError::InvalidDefinition(format!("bad color {:?}", name)));
    }

    let color = match lowered.as_str() {
        "grey" | "gray" => GRAY,
        "lightgrey" | "lightgray" => LIGHTGRAY,
        "darkgrey" | "darkgray" => DARKGRAY,
        "brown" => BROWN,
        "darkbrown" => DARKBROWN,
        "beige" => BEIGE,
        "lightgreen" | "lime" => LIME,
        "green" => GREEN,
        "darkgreen" => DARKGREEN,
        "blue" => BLUE,
        "skyblue" => SKYBLUE,
        "darkblue" => DARKBLUE,
        "red" => RED,
        "maroon" => MAROON,
        "orange" => ORANGE,
        "yellow" => YELLOW,
        "gold" => GOLD,
        "pink" => PINK,
        "purple" => PURPLE,
        "violet" => VIOLET,
        "magenta" => MAGENTA,
        "white" => WHITE,
        "black" => BLACK,
        _ => {
            return Err(EngineError::InvalidDefinition(format!(
                "unknown color {:?}",
                name
            )))
        }
    };

    Ok(color)
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if hex.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::from_rgba(
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
        255,
    ))
}

fn cell([col, row]: [u32; 2]) -> SheetCell {
    SheetCell::new(col, row)
}

impl FrameDefinition {
    /// Builds the frame. `key` only labels error messages.
    pub fn to_frame(&self, key: &str) -> EngineResult<Frame> {
        let context = |e: EngineError| match e {
            EngineError::InvalidDefinition(reason) => {
                EngineError::InvalidDefinition(format!("frame {}: {}", key, reason))
            }
            other => other,
        };

        let cells = self
            .tiles
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, code)| {
                        TileCode::from_code(*code).ok_or_else(|| {
                            EngineError::InvalidDefinition(format!(
                                "unknown tile code {} at {}:{}",
                                code, x, y
                            ))
                        })
                    })
                    .collect::<EngineResult<Vec<_>>>()
            })
            .collect::<EngineResult<Vec<_>>>()
            .map_err(context)?;

        let mut actions = HashMap::new();
        for (coordinate, action) in &self.actions {
            let pos = parse_coordinate_key(coordinate).map_err(context)?;
            actions.insert(pos, action.clone());
        }

        let mut colors = HashMap::new();
        for (code, name) in &self.colors {
            let tile = TileCode::from_code(*code).ok_or_else(|| {
                EngineError::InvalidDefinition(format!("color for unknown tile code {}", code))
            });
            colors.insert(tile.map_err(context)?, parse_color(name).map_err(context)?);
        }

        Frame::new(
            cells,
            Position::new(self.spawn[0], self.spawn[1]),
            actions,
            colors,
            self.background.clone(),
        )
        .map_err(context)
    }
}

impl CharacterDefinition {
    /// Builds the character at the origin; the engine places it on a spawn point.
    pub fn to_character(&self) -> EngineResult<Character> {
        let color = parse_color(&self.color)?;
        let mut character = Character::new(self.key.clone(), Position::origin(), color);

        if let Some(sprite) = &self.sprite {
            character = character.with_sprite(sprite.to_sprite_sheet());
        }

        Ok(character)
    }
}

impl SpriteDefinition {
    pub fn to_sprite_sheet(&self) -> SpriteSheet {
        SpriteSheet {
            image: self.image.clone(),
            cell_size: (self.cell_size[0], self.cell_size[1]),
            idle: self
                .idle
                .iter()
                .map(|(direction, offset)| (*direction, cell(*offset)))
                .collect(),
            walk: self
                .walk
                .iter()
                .map(|(direction, walk)| {
                    (
                        *direction,
                        WalkCycle {
                            frames: walk.frames.iter().copied().map(cell).collect(),
                            duration: Duration::from_millis(walk.duration_ms),
                        },
                    )
                })
                .collect(),
        }
    }
}
