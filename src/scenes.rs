//! # Scene Management System
//!
//! Owns the engine, the input handler and the window layout, and runs the
//! per-frame loop: poll input, forward it to the engine, advance time, present.

use crate::config::EngineConfig;
use crate::rendering::Surface;
use crate::{
    Engine, EngineResult, InputHandler, MacroquadDisplay, MacroquadSurface, PlayerInput, World,
};
use log::{debug, info};
use macroquad::prelude::*;
use std::time::Duration;

/// The main scene manager that drives an [`Engine`] in a macroquad window
pub struct SceneManager {
    engine: Engine<MacroquadSurface>,
    display: MacroquadDisplay,
    input_handler: InputHandler,
    window_size: Vec2,
}

impl SceneManager {
    /// Builds the engine for `world`, loads its images and sizes the window.
    pub async fn new(
        config: EngineConfig,
        world: World,
        input_handler: InputHandler,
    ) -> EngineResult<Self> {
        let debug_surface = config.debug_view.then(MacroquadSurface::new);
        let display = MacroquadDisplay::new(vec2(config.scene_size.0, config.scene_size.1));

        let mut engine = Engine::new(config, world, MacroquadSurface::new(), debug_surface)?;
        engine.init().await;

        let mut manager = Self {
            engine,
            display,
            input_handler,
            window_size: Vec2::ZERO,
        };
        manager.fit_window();

        Ok(manager)
    }

    /// Runs the main scene loop until the player quits
    pub async fn run(&mut self) -> EngineResult<()> {
        loop {
            if let Some(input) = self.input_handler.get_input() {
                if input == PlayerInput::Quit {
                    info!("quit requested");
                    break;
                }
                self.handle_input(input);
            }

            self.engine
                .update(Duration::from_secs_f32(get_frame_time()));
            self.fit_window();
            self.display.present(&self.engine);

            next_frame().await;
        }
        Ok(())
    }

    fn handle_input(&mut self, input: PlayerInput) {
        match input {
            PlayerInput::Move(direction) => {
                if !self.engine.move_player_in(direction) {
                    debug!("move {} not accepted", direction);
                }
            }
            PlayerInput::Confirm => {
                self.engine.advance_prompt_or_hide();
            }
            PlayerInput::Cancel => self.engine.hide_prompt(),
            PlayerInput::Quit => {}
        }
    }

    /// Grows or shrinks the window when the debug view changes size.
    fn fit_window(&mut self) {
        let debug_size = self
            .engine
            .debug_renderer()
            .map(|renderer| renderer.surface().dimension());
        let size = self.display.window_size(debug_size);

        if size != self.window_size {
            request_new_screen_size(size.x, size.y);
            self.window_size = size;
        }
    }

    pub fn engine(&self) -> &Engine<MacroquadSurface> {
        &self.engine
    }
}
