//! # Frames
//!
//! A frame is one map: a rectangular grid of tile codes, the actions bound to
//! particular cells, a spawn point and the colors used to draw it without art.

use crate::game::Position;
use crate::{EngineError, EngineResult};
use log::warn;
use macroquad::prelude::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Passability class of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileCode {
    /// Walkable, nothing happens
    Empty,
    /// Impassable terrain
    Block,
    /// Impassable decoration
    Building,
    /// Not entered, but bumping into it runs the bound action
    Action,
}

impl TileCode {
    /// Decodes the integer code used in definition files.
    pub fn from_code(code: u8) -> Option<TileCode> {
        match code {
            0 => Some(TileCode::Empty),
            1 => Some(TileCode::Block),
            2 => Some(TileCode::Building),
            3 => Some(TileCode::Action),
            _ => None,
        }
    }

    /// Integer code used in definition files.
    pub fn code(self) -> u8 {
        match self {
            TileCode::Empty => 0,
            TileCode::Block => 1,
            TileCode::Building => 2,
            TileCode::Action => 3,
        }
    }

    /// Whether a player may stand on this cell.
    pub fn is_walkable(self) -> bool {
        self == TileCode::Empty
    }
}

/// Effect bound to an action cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameAction {
    /// Show these pages in the dialog prompt
    Prompt(Vec<String>),
    /// Switch to the frame with this key
    LoadFrame(String),
}

/// A single map grid with its bindings.
#[derive(Debug, Clone)]
pub struct Frame {
    cells: Vec<Vec<TileCode>>,
    width: i32,
    height: i32,
    actions: HashMap<Position, FrameAction>,
    initial_position: Position,
    colors: HashMap<TileCode, Color>,
    background: Option<String>,
}

impl Frame {
    /// Builds a frame, checking that the grid is rectangular and the spawn is inside it.
    ///
    /// Action cells without a binding are only warned about; bumping into one later
    /// does nothing.
    pub fn new(
        cells: Vec<Vec<TileCode>>,
        initial_position: Position,
        actions: HashMap<Position, FrameAction>,
        colors: HashMap<TileCode, Color>,
        background: Option<String>,
    ) -> EngineResult<Self> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);

        if width == 0 {
            return Err(EngineError::InvalidDefinition(
                "frame grid is empty".to_string(),
            ));
        }

        if let Some(row) = cells.iter().position(|row| row.len() != width) {
            return Err(EngineError::InvalidDefinition(format!(
                "row {} has {} cells, expected {}",
                row,
                cells[row].len(),
                width
            )));
        }

        let frame = Self {
            cells,
            width: width as i32,
            height: height as i32,
            actions,
            initial_position,
            colors,
            background,
        };

        if !frame.contains(initial_position) {
            return Err(EngineError::InvalidDefinition(format!(
                "spawn {} lies outside the {}x{} grid",
                initial_position, frame.width, frame.height
            )));
        }

        for (y, row) in frame.cells.iter().enumerate() {
            for (x, code) in row.iter().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                if *code == TileCode::Action && !frame.actions.contains_key(&pos) {
                    warn!("action cell {} has no binding", pos);
                }
            }
        }

        Ok(frame)
    }

    /// Returns the tile code at `pos`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use tilewalk::{Frame, Position, TileCode};
    ///
    /// let frame = Frame::new(
    ///     vec![vec![TileCode::Empty, TileCode::Block]],
    ///     Position::new(0, 0),
    ///     HashMap::new(),
    ///     HashMap::new(),
    ///     None,
    /// )
    /// .unwrap();
    /// assert_eq!(frame.cell_at(Position::new(1, 0)).unwrap(), TileCode::Block);
    /// assert!(frame.cell_at(Position::new(2, 0)).is_err());
    /// ```
    pub fn cell_at(&self, pos: Position) -> EngineResult<TileCode> {
        if !self.contains(pos) {
            return Err(EngineError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }

        Ok(self.cells[pos.y as usize][pos.x as usize])
    }

    /// Returns the action bound to `pos`, if any.
    pub fn action_at(&self, pos: Position) -> Option<&FrameAction> {
        self.actions.get(&pos)
    }

    /// Grid size as (width, height) in cells.
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Whether `pos` is inside the grid and empty.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.cell_at(pos).map_or(false, TileCode::is_walkable)
    }

    pub fn initial_position(&self) -> Position {
        self.initial_position
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Raw display color for a tile code, if one is mapped.
    pub fn color_of(&self, code: TileCode) -> Option<Color> {
        self.colors.get(&code).copied()
    }

    /// Grid rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileCode]> {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn actions(&self) -> &HashMap<Position, FrameAction> {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::{GRAY, LIME};

    fn sample_frame() -> Frame {
        let e = TileCode::Empty;
        let b = TileCode::Block;
        let a = TileCode::Action;
        let mut actions = HashMap::new();
        actions.insert(
            Position::new(2, 0),
            FrameAction::Prompt(vec!["a sign".to_string()]),
        );
        let mut colors = HashMap::new();
        colors.insert(TileCode::Block, GRAY);
        colors.insert(TileCode::Action, LIME);

        Frame::new(
            vec![vec![e, b, a], vec![e, e, e]],
            Position::new(0, 1),
            actions,
            colors,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_size_is_width_by_height() {
        assert_eq!(sample_frame().size(), (3, 2));
    }

    #[test]
    fn test_cell_at_inside_and_outside() {
        let frame = sample_frame();
        assert_eq!(frame.cell_at(Position::new(1, 0)).unwrap(), TileCode::Block);
        assert_eq!(frame.cell_at(Position::new(2, 1)).unwrap(), TileCode::Empty);
        assert!(matches!(
            frame.cell_at(Position::new(3, 0)),
            Err(EngineError::OutOfBounds { .. })
        ));
        assert!(frame.cell_at(Position::new(0, -1)).is_err());
    }

    #[test]
    fn test_action_at() {
        let frame = sample_frame();
        assert_eq!(
            frame.action_at(Position::new(2, 0)),
            Some(&FrameAction::Prompt(vec!["a sign".to_string()]))
        );
        assert_eq!(frame.action_at(Position::new(0, 0)), None);
    }

    #[test]
    fn test_walkability() {
        let frame = sample_frame();
        assert!(frame.is_walkable(Position::new(0, 0)));
        assert!(!frame.is_walkable(Position::new(1, 0)));
        assert!(!frame.is_walkable(Position::new(2, 0)));
        assert!(!frame.is_walkable(Position::new(-1, 0)));
    }

    #[test]
    fn test_color_lookup_skips_unmapped() {
        let frame = sample_frame();
        assert_eq!(frame.color_of(TileCode::Block), Some(GRAY));
        assert_eq!(frame.color_of(TileCode::Building), None);
    }

    #[test]
    fn test_rejects_ragged_grid() {
        let result = Frame::new(
            vec![vec![TileCode::Empty, TileCode::Empty], vec![TileCode::Empty]],
            Position::origin(),
            HashMap::new(),
            HashMap::new(),
            None,
        );
        assert!(matches!(result, Err(EngineError::InvalidDefinition(_))));
    }

    #[test]
    fn test_rejects_spawn_outside_grid() {
        let result = Frame::new(
            vec![vec![TileCode::Empty]],
            Position::new(1, 0),
            HashMap::new(),
            HashMap::new(),
            None,
        );
        assert!(matches!(result, Err(EngineError::InvalidDefinition(_))));
    }

    #[test]
    fn test_tile_code_round_trip() {
        for code in 0..4 {
            assert_eq!(TileCode::from_code(code).unwrap().code(), code);
        }
        assert_eq!(TileCode::from_code(7), None);
    }
}
