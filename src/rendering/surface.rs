//! # Drawing Surfaces
//!
//! The canvas abstraction the renderer paints on. `MacroquadSurface` (in
//! `display`) draws into a window; [`RecordingSurface`] keeps a list of draw
//! commands and is what tests and headless runs use.

use crate::{EngineError, EngineResult};
use macroquad::prelude::{vec2, Color, Rect, Vec2};
use std::collections::HashSet;

/// A 2D drawing target with settable pixel dimensions.
#[allow(async_fn_in_trait)]
pub trait Surface {
    /// Loaded image handle.
    type Image;

    /// Sets the pixel size of the drawable area.
    fn resize(&mut self, width: f32, height: f32);

    /// Pixel size (width, height) of the drawable area.
    fn dimension(&self) -> Vec2;

    /// Clears the whole drawable area.
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);

    /// Draws `image`, or the `source` sub-rectangle of it, scaled into `dest`.
    fn draw_image(&mut self, image: &Self::Image, source: Option<Rect>, dest: Rect);

    /// Loads an image from a path or URL.
    async fn load_image(&self, url: &str) -> EngineResult<Self::Image>;
}

/// Image handle handed out by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedImage {
    pub url: String,
}

/// A single call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        rect: Rect,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        thickness: f32,
        color: Color,
    },
    Image {
        url: String,
        source: Option<Rect>,
        dest: Rect,
    },
}

/// Headless surface that records every draw call.
///
/// `clear` drops the recorded commands, so after a render the list holds exactly
/// what is on the canvas.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Vec2,
    commands: Vec<DrawCommand>,
    missing: HashSet<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `load_image` fail for `url`.
    pub fn with_missing(mut self, url: impl Into<String>) -> Self {
        self.missing.insert(url.into());
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Every filled rectangle, in draw order.
    pub fn filled_rects(&self) -> Vec<(Rect, Color)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    /// Every image draw, in draw order.
    pub fn images(&self) -> Vec<(String, Option<Rect>, Rect)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Image { url, source, dest } => {
                    Some((url.clone(), *source, *dest))
                }
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(Vec2, Vec2)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    type Image = RecordedImage;

    fn resize(&mut self, width: f32, height: f32) {
        self.size = vec2(width, height);
    }

    fn dimension(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    fn draw_image(&mut self, image: &RecordedImage, source: Option<Rect>, dest: Rect) {
        self.commands.push(DrawCommand::Image {
            url: image.url.clone(),
            source,
            dest,
        });
    }

    async fn load_image(&self, url: &str) -> EngineResult<RecordedImage> {
        if self.missing.contains(url) {
            return Err(EngineError::Asset {
                url: url.to_string(),
                reason: "not found".to_string(),
            });
        }
        Ok(RecordedImage {
            url: url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::RED;

    #[test]
    fn test_clear_drops_previous_commands() {
        let mut surface = RecordingSurface::new();
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), RED);
        surface.clear();
        assert_eq!(surface.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_missing_image_fails_to_load() {
        let surface = RecordingSurface::new().with_missing("gone.png");
        assert!(tokio_test::block_on(surface.load_image("gone.png")).is_err());
        let image = tokio_test::block_on(surface.load_image("here.png")).unwrap();
        assert_eq!(image.url, "here.png");
    }
}
