//! # Renderer
//!
//! Composites a frame and its characters onto a [`Surface`]. The renderer keeps
//! the camera offset and the image cache; everything else is passed in per call.

use crate::game::{Character, Frame, Position, SheetCell, TileCode};
use crate::rendering::{compute_camera_offset, Surface};
use log::{error, info};
use macroquad::prelude::{vec2, Color, Rect, Vec2, BLACK};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Alpha used for raw tiles drawn over a background in [`RenderMode::Both`].
const OVERLAY_ALPHA: f32 = 0.5;

/// Color of the facing tick drawn on raw characters.
const TICK_COLOR: Color = BLACK;

/// How a renderer draws tiles and characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Flat colored rectangles, for debug views
    Raw,
    /// Background image and sprites, falling back to raw when an image is missing
    AssetBased,
    /// Background and sprites with a translucent raw overlay
    Both,
}

impl RenderMode {
    pub fn draws_assets(self) -> bool {
        matches!(self, RenderMode::AssetBased | RenderMode::Both)
    }

    pub fn draws_raw(self) -> bool {
        matches!(self, RenderMode::Raw | RenderMode::Both)
    }
}

/// Draws frames and characters onto a surface it owns.
pub struct Renderer<S: Surface> {
    surface: S,
    mode: RenderMode,
    window: (i32, i32),
    camera: Position,
    images: HashMap<String, S::Image>,
}

impl<S: Surface> Renderer<S> {
    /// Creates a raw renderer with a one-cell window. Call [`Renderer::configure`]
    /// before drawing.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            mode: RenderMode::Raw,
            window: (1, 1),
            camera: Position::origin(),
            images: HashMap::new(),
        }
    }

    /// Sets the visible window in cells, the surface size in pixels and the mode.
    pub fn configure(&mut self, window: (i32, i32), pixel_size: (f32, f32), mode: RenderMode) {
        self.window = (window.0.max(1), window.1.max(1));
        self.mode = mode;
        self.surface.resize(pixel_size.0, pixel_size.1);
    }

    /// Loads every `key → url` image. Failures are logged and leave the key
    /// absent, so drawing falls back to raw rendering. Returns how many loaded.
    pub async fn load_assets(&mut self, assets: &BTreeMap<String, String>) -> usize {
        let mut loaded = 0;

        for (key, url) in assets {
            match self.surface.load_image(url).await {
                Ok(image) => {
                    info!("{} image loaded from {}", key, url);
                    self.images.insert(key.clone(), image);
                    loaded += 1;
                }
                Err(e) => {
                    error!("{} image unavailable, drawing raw instead: {}", key, e);
                }
            }
        }

        loaded
    }

    /// Pixel size of one cell: surface size divided by the visible window.
    pub fn tile_dimension(&self) -> Vec2 {
        let dimension = self.surface.dimension();
        vec2(
            dimension.x / self.window.0 as f32,
            dimension.y / self.window.1 as f32,
        )
    }

    /// Moves the camera so `entity` stays inside the centered threshold window.
    pub fn focus(&mut self, entity: Position, grid: (i32, i32)) {
        self.camera = compute_camera_offset(entity, self.window, grid);
    }

    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Draws the frame background, or its raw tiles, at the current camera offset.
    pub fn render_frame(&mut self, frame: &Frame, background_key: &str) {
        let tile = self.tile_dimension();
        let mut drew_background = false;

        if self.mode.draws_assets() && frame.background().is_some() {
            if let Some(image) = self.images.get(background_key) {
                let (width, height) = frame.size();
                let dest = Rect::new(
                    -self.camera.x as f32 * tile.x,
                    -self.camera.y as f32 * tile.y,
                    width as f32 * tile.x,
                    height as f32 * tile.y,
                );
                self.surface.draw_image(image, None, dest);
                drew_background = true;
            }
        }

        if !drew_background {
            self.render_raw_cells(frame, tile, 1.0);
        } else if self.mode.draws_raw() {
            self.render_raw_cells(frame, tile, OVERLAY_ALPHA);
        }
    }

    fn render_raw_cells(&mut self, frame: &Frame, tile: Vec2, alpha: f32) {
        for (y, row) in frame.rows().enumerate() {
            for (x, code) in row.iter().enumerate() {
                if *code == TileCode::Empty {
                    continue;
                }
                let Some(mut color) = frame.color_of(*code) else {
                    continue;
                };
                let screen = Position::new(x as i32, y as i32) - self.camera;
                if !self.is_visible(screen) {
                    continue;
                }

                color.a *= alpha;
                self.surface.fill_rect(self.cell_rect(screen, tile), color);
            }
        }
    }

    /// Draws a character at its position relative to the camera.
    ///
    /// `sprite_override` selects a walk-cycle cell instead of the idle cell.
    pub fn render_entity(&mut self, character: &Character, sprite_override: Option<SheetCell>) {
        let tile = self.tile_dimension();
        let dest = self.cell_rect(character.position - self.camera, tile);

        if self.mode.draws_assets() {
            if let Some(image) = self.images.get(&character.asset_key()) {
                let cell = sprite_override.unwrap_or_else(|| character.idle_cell());
                let (cell_width, cell_height) = character.sprite.cell_size;
                let source = Rect::new(
                    cell.col as f32 * cell_width,
                    cell.row as f32 * cell_height,
                    cell_width,
                    cell_height,
                );
                self.surface.draw_image(image, Some(source), dest);
                return;
            }
        }

        self.surface.fill_rect(dest, character.color);

        let center = dest.center();
        let delta = character.direction.to_delta();
        let tip = center + vec2(delta.x as f32 * tile.x / 2.0, delta.y as f32 * tile.y / 2.0);
        let thickness = (tile.x.min(tile.y) / 8.0).max(1.0);
        self.surface.draw_line(center, tip, thickness, TICK_COLOR);
    }

    fn is_visible(&self, screen: Position) -> bool {
        screen.x >= 0 && screen.y >= 0 && screen.x < self.window.0 && screen.y < self.window.1
    }

    fn cell_rect(&self, screen: Position, tile: Vec2) -> Rect {
        Rect::new(
            screen.x as f32 * tile.x,
            screen.y as f32 * tile.y,
            tile.x,
            tile.y,
        )
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Visible window in cells.
    pub fn window(&self) -> (i32, i32) {
        self.window
    }

    /// Current camera offset (top-left visible cell).
    pub fn camera(&self) -> Position {
        self.camera
    }

    pub fn has_image(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
