//! # World Module
//!
//! Loading of frames and the player from JSON world files, plus the built-in
//! world shipped with the binary.

pub mod definitions;

pub use definitions::*;

use crate::config::MAIN_FRAME;
use crate::game::{Character, Frame, FrameAction};
use crate::{EngineError, EngineResult};
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// World data bundled with the crate: the outdoor `main` map and the `home` interior.
pub const BUILTIN_WORLD: &str = include_str!("../../assets/world.json");

/// Everything an [`crate::Engine`] needs to start: frames by key and the player.
#[derive(Debug, Clone)]
pub struct World {
    pub frames: HashMap<String, Frame>,
    pub player: Character,
}

impl World {
    /// Creates a world with no frames.
    pub fn new(player: Character) -> Self {
        Self {
            frames: HashMap::new(),
            player,
        }
    }

    /// Adds or replaces the frame under `key`.
    pub fn with_frame(mut self, key: impl Into<String>, frame: Frame) -> Self {
        self.frames.insert(key.into(), frame);
        self
    }

    /// Builds a world from a parsed definition.
    ///
    /// Fails when any frame is malformed, when a load action points at a frame
    /// that does not exist, or when there is no `main` frame.
    pub fn from_definition(definition: &WorldDefinition) -> EngineResult<Self> {
        let mut world = World::new(definition.player.to_character()?);

        for (key, frame) in &definition.frames {
            world.frames.insert(key.clone(), frame.to_frame(key)?);
        }

        if !world.frames.contains_key(MAIN_FRAME) {
            return Err(EngineError::MissingFrame(MAIN_FRAME.to_string()));
        }

        for (key, frame) in &world.frames {
            for (pos, action) in frame.actions() {
                if let FrameAction::LoadFrame(target) = action {
                    if !world.frames.contains_key(target) {
                        return Err(EngineError::InvalidDefinition(format!(
                            "frame {}: action at {} loads unknown frame {}",
                            key, pos, target
                        )));
                    }
                }
            }
        }

        Ok(world)
    }

    /// Parses a world from JSON text.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let definition: WorldDefinition = serde_json::from_str(json)?;
        Self::from_definition(&definition)
    }

    /// Reads and parses a world file.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let world = Self::from_json(&json)?;
        info!("loaded {} frames from {}", world.frames.len(), path.display());
        Ok(world)
    }

    /// The world compiled into the crate.
    pub fn builtin() -> EngineResult<Self> {
        Self::from_json(BUILTIN_WORLD)
    }
}
