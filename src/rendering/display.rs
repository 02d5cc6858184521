//! # Display Management
//!
//! Window-side rendering with macroquad: a render-target backed [`Surface`] and
//! the layout that puts the scene, the debug view and the prompt box on screen.

use crate::game::{Engine, Prompt};
use crate::rendering::Surface;
use crate::{EngineError, EngineResult};
use macroquad::prelude::*;

/// A canvas backed by a macroquad render target.
///
/// Draw calls land in the target; [`MacroquadSurface::present`] blits it to the
/// window. The target keeps its pixels between window frames, so the scene only
/// needs redrawing when something changed.
pub struct MacroquadSurface {
    target: Option<RenderTarget>,
    size: Vec2,
}

impl Default for MacroquadSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadSurface {
    /// Creates an empty surface. It has no pixels until [`Surface::resize`].
    pub fn new() -> Self {
        Self {
            target: None,
            size: Vec2::ZERO,
        }
    }

    fn activate(&self) {
        if let Some(target) = &self.target {
            let mut camera =
                Camera2D::from_display_rect(Rect::new(0.0, 0.0, self.size.x, self.size.y));
            camera.render_target = Some(target.clone());
            set_camera(&camera);
        }
    }

    /// Draws the surface onto the window with its top-left corner at `origin`.
    pub fn present(&self, origin: Vec2) {
        set_default_camera();
        if let Some(target) = &self.target {
            draw_texture_ex(
                &target.texture,
                origin.x,
                origin.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(self.size),
                    flip_y: true,
                    ..Default::default()
                },
            );
        }
    }
}

impl Surface for MacroquadSurface {
    type Image = Texture2D;

    fn resize(&mut self, width: f32, height: f32) {
        let size = vec2(width.max(1.0), height.max(1.0));
        if self.target.is_some() && size == self.size {
            return;
        }

        let target = render_target(size.x as u32, size.y as u32);
        target.texture.set_filter(FilterMode::Nearest);
        self.target = Some(target);
        self.size = size;
    }

    fn dimension(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.activate();
        clear_background(BLACK);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.activate();
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.activate();
        macroquad::shapes::draw_line(from.x, from.y, to.x, to.y, thickness, color);
    }

    fn draw_image(&mut self, image: &Texture2D, source: Option<Rect>, dest: Rect) {
        self.activate();
        draw_texture_ex(
            image,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                source,
                ..Default::default()
            },
        );
    }

    async fn load_image(&self, url: &str) -> EngineResult<Texture2D> {
        let texture = load_texture(url).await.map_err(|e| EngineError::Asset {
            url: url.to_string(),
            reason: format!("{:?}", e),
        })?;
        texture.set_filter(FilterMode::Nearest);
        Ok(texture)
    }
}

/// Screen layout for the scene, the optional debug view and the prompt box.
pub struct MacroquadDisplay {
    /// Top-left corner of the main scene
    pub scene_origin: Vec2,
    /// Pixel size of the main scene
    pub scene_size: Vec2,
    /// Gap between the scene and the panels next to it
    pub margin: f32,
    /// Height of the prompt box under the scene
    pub prompt_height: f32,
    /// Prompt font size
    pub font_size: f32,
}

impl MacroquadDisplay {
    pub fn new(scene_size: Vec2) -> Self {
        Self {
            scene_origin: vec2(10.0, 10.0),
            scene_size,
            margin: 10.0,
            prompt_height: 90.0,
            font_size: 22.0,
        }
    }

    /// Window size that fits the scene, the prompt box and the debug view.
    pub fn window_size(&self, debug_size: Option<Vec2>) -> Vec2 {
        let mut width = self.scene_origin.x * 2.0 + self.scene_size.x;
        let mut height =
            self.scene_origin.y * 2.0 + self.scene_size.y + self.margin + self.prompt_height;

        if let Some(debug) = debug_size {
            width += self.margin + debug.x;
            height = height.max(self.scene_origin.y * 2.0 + debug.y);
        }

        vec2(width, height)
    }

    /// Presents everything the engine has drawn plus the prompt box.
    pub fn present(&self, engine: &Engine<MacroquadSurface>) {
        set_default_camera();
        clear_background(BLACK);

        engine.renderer().surface().present(self.scene_origin);

        if let Some(debug) = engine.debug_renderer() {
            let origin = vec2(
                self.scene_origin.x + self.scene_size.x + self.margin,
                self.scene_origin.y,
            );
            debug.surface().present(origin);
        }

        self.render_prompt(engine.prompt());
    }

    fn render_prompt(&self, prompt: &Prompt) {
        if !prompt.is_shown() {
            return;
        }

        let x = self.scene_origin.x;
        let y = self.scene_origin.y + self.scene_size.y + self.margin;

        draw_rectangle(
            x,
            y,
            self.scene_size.x,
            self.prompt_height,
            Color::new(0.0, 0.0, 0.0, 0.8),
        );
        draw_rectangle_lines(x, y, self.scene_size.x, self.prompt_height, 2.0, WHITE);

        let line_height = self.font_size * 1.1;
        for (i, line) in prompt.content().lines().enumerate() {
            draw_text(
                line,
                x + 12.0,
                y + 12.0 + self.font_size + i as f32 * line_height,
                self.font_size,
                WHITE,
            );
        }
    }
}
