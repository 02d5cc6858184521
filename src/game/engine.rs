//! # Engine
//!
//! The interaction state machine. The engine owns the frames, the player, the
//! prompt and the renderers, and is the only thing that mutates them.
//!
//! Moves are validated, animated and then resolved against the destination tile:
//! empty cells are entered, walls stop the player, and action cells run their
//! binding (a prompt or a frame switch) without being entered.

use crate::config::{EngineConfig, MAIN_FRAME};
use crate::game::{
    Character, Direction, Frame, FrameAction, Position, Prompt, PromptAdvance, SheetCell,
    TileCode,
};
use crate::rendering::{RenderMode, Renderer, SpriteAnimation, Surface};
use crate::world::World;
use crate::{EngineError, EngineResult};
use log::{debug, error, info, warn};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Logical image name of a frame background.
pub fn frame_asset_key(frame_key: &str) -> String {
    format!("frame-{}", frame_key)
}

/// A move whose walk cycle is still playing.
#[derive(Debug, Clone)]
struct PendingMove {
    animation: SpriteAnimation,
    target: Position,
}

/// Orchestrates movement, prompts, frame transitions and rendering.
pub struct Engine<S: Surface> {
    config: EngineConfig,
    frames: HashMap<String, Frame>,
    current_frame_key: String,
    player: Character,
    renderer: Renderer<S>,
    debug_renderer: Option<Renderer<S>>,
    prompt: Prompt,
    /// frame key → character key → position when that frame was left
    last_positions: HashMap<String, HashMap<String, Position>>,
    walk: Option<PendingMove>,
}

impl<S: Surface> Engine<S> {
    /// Creates an engine on the `main` frame with the player on its spawn point.
    ///
    /// A debug surface enables the raw mirror view.
    pub fn new(
        config: EngineConfig,
        world: World,
        surface: S,
        debug_surface: Option<S>,
    ) -> EngineResult<Self> {
        let World { frames, mut player } = world;

        let main = frames
            .get(MAIN_FRAME)
            .ok_or_else(|| EngineError::MissingFrame(MAIN_FRAME.to_string()))?;
        player.position = main.initial_position();

        let prompt = Prompt::new(config.typing_speed_ms.map(Duration::from_millis));

        Ok(Self {
            config,
            frames,
            current_frame_key: MAIN_FRAME.to_string(),
            player,
            renderer: Renderer::new(surface),
            debug_renderer: debug_surface.map(Renderer::new),
            prompt,
            last_positions: HashMap::new(),
            walk: None,
        })
    }

    /// Sizes the viewports, loads every declared image and draws the first frame.
    pub async fn init(&mut self) {
        self.renderer.configure(
            self.config.window_cells,
            self.config.scene_size,
            self.config.render_mode,
        );
        self.resize_debug_view();

        let assets = self.asset_manifest();
        let loaded = self.renderer.load_assets(&assets).await;
        info!("{} of {} images loaded", loaded, assets.len());

        self.render();
    }

    /// Logical name → path of every image the world declares.
    pub fn asset_manifest(&self) -> BTreeMap<String, String> {
        let mut assets = BTreeMap::new();

        if let Some(image) = &self.player.sprite.image {
            assets.insert(self.player.asset_key(), image.clone());
        }

        for (key, frame) in &self.frames {
            if let Some(background) = frame.background() {
                assets.insert(frame_asset_key(key), background.to_string());
            }
        }

        assets
    }

    /// Moves the player one cell in the direction named by `direction_key`.
    ///
    /// Returns whether the request was accepted. See [`Engine::move_player_in`].
    pub fn move_player(&mut self, direction_key: &str) -> bool {
        match Direction::from_key(direction_key) {
            Ok(direction) => self.move_player_in(direction),
            Err(e) => {
                warn!("move ignored: {}", e);
                false
            }
        }
    }

    /// Moves the player one cell towards `direction`.
    ///
    /// Rejected while a walk is still playing and when the target is off the
    /// grid. Otherwise the player turns to face `direction` right away, even if
    /// the target turns out to be a wall, and the move resolves once the walk
    /// cycle has played (immediately when there is none).
    pub fn move_player_in(&mut self, direction: Direction) -> bool {
        if self.walk.is_some() {
            warn!("move ignored: {}", EngineError::PlayerBusy);
            return false;
        }

        self.hide_prompt();

        let target = self.player.position.step(direction);
        if let Err(e) = self.current_frame().cell_at(target) {
            warn!("move ignored: {}", e);
            return false;
        }

        self.player.direction = direction;

        let animation = self
            .player
            .sprite
            .walk_cycle(direction)
            .map(SpriteAnimation::new)
            .filter(|animation| !animation.is_finished());

        match animation {
            Some(animation) => {
                debug!("walking {} towards {}", direction, target);
                self.walk = Some(PendingMove { animation, target });
                self.render();
            }
            None => self.complete_move(target),
        }

        true
    }

    /// Advances timed animations by `dt`: prompt typing and the walk cycle.
    pub fn update(&mut self, dt: Duration) {
        self.prompt.tick(dt);

        let Some(walk) = self.walk.as_mut() else {
            return;
        };

        walk.animation.advance(dt);
        if walk.animation.is_finished() {
            let target = walk.target;
            self.walk = None;
            self.complete_move(target);
        } else {
            self.render();
        }
    }

    fn complete_move(&mut self, target: Position) {
        match self.current_frame().cell_at(target) {
            Ok(TileCode::Empty) => {
                self.player.position = target;
            }
            Ok(TileCode::Block | TileCode::Building) => {
                debug!("{} is blocked", target);
            }
            Ok(TileCode::Action) => match self.current_frame().action_at(target).cloned() {
                Some(action) => self.dispatch(action),
                None => error!(
                    "no action bound at {} in {} frame",
                    target, self.current_frame_key
                ),
            },
            Err(e) => error!("move target vanished: {}", e),
        }

        self.render();
    }

    fn dispatch(&mut self, action: FrameAction) {
        match action {
            FrameAction::Prompt(pages) => {
                if let Err(e) = self.prompt.show(pages) {
                    error!("prompt not shown: {}", e);
                }
            }
            FrameAction::LoadFrame(key) => {
                self.load_frame(&key);
            }
        }
    }

    /// Shows the next prompt page, hiding the prompt after the last one.
    ///
    /// Returns whether the prompt is still shown.
    pub fn advance_prompt_or_hide(&mut self) -> bool {
        match self.prompt.advance() {
            Ok(PromptAdvance::MoreRemaining) => true,
            Ok(PromptAdvance::Exhausted) => {
                self.prompt.hide();
                false
            }
            Err(e) => {
                warn!("prompt not advanced: {}", e);
                false
            }
        }
    }

    /// Hides the prompt if it is shown.
    pub fn hide_prompt(&mut self) {
        if self.prompt.is_shown() {
            self.prompt.hide();
        }
    }

    /// Switches to the frame `target`.
    ///
    /// Entering any frame other than `main` (or re-entering `main` from itself)
    /// remembers where the player stood and spawns them at the target's initial
    /// position. Returning to `main` from elsewhere puts the player back where
    /// they left it. A walk still playing is dropped.
    pub fn load_frame(&mut self, target: &str) -> bool {
        let Some(frame) = self.frames.get(target) else {
            error!("{} frame not found", target);
            return false;
        };
        let spawn = frame.initial_position();

        if let Some(walk) = self.walk.take() {
            debug!("walk towards {} dropped by frame switch", walk.target);
        }

        let previous = std::mem::replace(&mut self.current_frame_key, target.to_string());

        if target == MAIN_FRAME && previous != MAIN_FRAME {
            let restored = self
                .last_positions
                .get_mut(MAIN_FRAME)
                .and_then(|positions| positions.remove(&self.player.key));
            self.player.position = restored.unwrap_or(spawn);
        } else {
            self.last_positions
                .entry(previous.clone())
                .or_default()
                .insert(self.player.key.clone(), self.player.position);
            self.player.position = spawn;
        }

        info!(
            "frame {} -> {}, player at {}",
            previous, target, self.player.position
        );

        self.resize_debug_view();
        self.render();
        true
    }

    fn resize_debug_view(&mut self) {
        let (width, height) = self.current_frame().size();
        let tile = self.config.debug_tile_size;

        if let Some(debug) = self.debug_renderer.as_mut() {
            debug.configure(
                (width, height),
                (width as f32 * tile, height as f32 * tile),
                RenderMode::Raw,
            );
        }
    }

    /// Redraws the current frame and the player on every viewport.
    pub fn render(&mut self) {
        let frame = &self.frames[&self.current_frame_key];
        let background_key = frame_asset_key(&self.current_frame_key);
        let sprite = self
            .walk
            .as_ref()
            .and_then(|walk| walk.animation.current_frame());

        draw_scene(&mut self.renderer, frame, &background_key, &self.player, sprite);

        if let Some(debug) = self.debug_renderer.as_mut() {
            draw_scene(debug, frame, &background_key, &self.player, sprite);
        }
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn current_frame_key(&self) -> &str {
        &self.current_frame_key
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frames[&self.current_frame_key]
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// Whether a walk cycle is still playing.
    pub fn is_player_moving(&self) -> bool {
        self.walk.is_some()
    }

    /// Position remembered for `entity` when `frame` was last left.
    pub fn remembered_position(&self, frame: &str, entity: &str) -> Option<Position> {
        self.last_positions
            .get(frame)
            .and_then(|positions| positions.get(entity))
            .copied()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer<S> {
        &self.renderer
    }

    pub fn debug_renderer(&self) -> Option<&Renderer<S>> {
        self.debug_renderer.as_ref()
    }
}

fn draw_scene<S: Surface>(
    renderer: &mut Renderer<S>,
    frame: &Frame,
    background_key: &str,
    player: &Character,
    sprite: Option<SheetCell>,
) {
    renderer.clear();
    renderer.focus(player.position, frame.size());
    renderer.render_frame(frame, background_key);
    renderer.render_entity(player, sprite);
}
