//! # Tilewalk
//!
//! A small tile-based exploration engine: one player walks across grid "frames",
//! bumps into walls, reads signs and steps through doors into other frames.
//!
//! ## Architecture Overview
//!
//! - **Frames**: immutable tile grids with action bindings and a spawn point
//! - **Engine**: the interaction state machine (movement, prompts, frame transitions)
//! - **Rendering**: a compositor drawing frames and sprites onto any [`Surface`],
//!   with a clamped camera that follows the player
//! - **World definitions**: JSON map and sprite data loaded through serde
//!
//! The engine never talks to the window directly. Everything it draws goes through
//! the [`Surface`] trait, so the same code runs against macroquad in the binary and
//! against a recording surface in tests.

pub mod game;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod world;

pub use game::*;
pub use input::*;
pub use rendering::*;
pub use world::*;

pub use scenes::SceneManager;

/// Core error type for the tilewalk engine.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A world or frame definition is malformed
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    /// A frame key does not exist in the world
    #[error("Frame not found: {0}")]
    MissingFrame(String),

    /// A coordinate lies outside the current grid
    #[error("Position ({x}, {y}) is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    /// A direction key could not be parsed
    #[error("Unknown direction: {0}")]
    UnknownDirection(String),

    /// The player is still animating the previous move
    #[error("Player is already moving")]
    PlayerBusy,

    /// `show` was called while the prompt is visible
    #[error("Prompt is already shown")]
    PromptAlreadyShown,

    /// `advance` was called while the prompt is hidden
    #[error("Prompt is not shown")]
    PromptHidden,

    /// A prompt needs at least one page
    #[error("Prompt has no pages")]
    EmptyPrompt,

    /// An image could not be loaded
    #[error("Asset {url} failed to load: {reason}")]
    Asset { url: String, reason: String },
}

/// Result type used throughout the tilewalk codebase.
pub type EngineResult<T> = Result<T, EngineError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration.
pub mod config {
    use crate::rendering::RenderMode;
    use serde::{Deserialize, Serialize};

    /// Key of the frame every session starts in and returns to.
    pub const MAIN_FRAME: &str = "main";

    /// Largest scene edge in pixels
    pub const MAX_SCENE_SIZE: f32 = 500.0;

    /// Default number of visible cells per axis
    pub const DEFAULT_WINDOW_CELLS: (i32, i32) = (10, 10);

    /// Pixel size of one cell in the debug view
    pub const DEBUG_TILE_SIZE: f32 = 12.0;

    /// Milliseconds between two revealed prompt characters
    pub const DEFAULT_TYPING_SPEED_MS: u64 = 50;

    /// Viewport, render and prompt settings for an [`crate::Engine`].
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct EngineConfig {
        /// Visible cells (columns, rows) in the main viewport
        pub window_cells: (i32, i32),
        /// Pixel size (width, height) of the main scene
        pub scene_size: (f32, f32),
        /// How the main viewport draws
        pub render_mode: RenderMode,
        /// Whether to mirror the frame onto a raw debug view
        pub debug_view: bool,
        /// Pixel size of one cell in the debug view
        pub debug_tile_size: f32,
        /// Typewriter speed for prompts; `None` shows pages at once
        pub typing_speed_ms: Option<u64>,
    }

    impl EngineConfig {
        /// Configuration used by tests: raw rendering and instant prompts.
        pub fn for_testing() -> Self {
            Self {
                window_cells: DEFAULT_WINDOW_CELLS,
                scene_size: (100.0, 100.0),
                render_mode: RenderMode::Raw,
                debug_view: false,
                debug_tile_size: DEBUG_TILE_SIZE,
                typing_speed_ms: None,
            }
        }
    }

    impl Default for EngineConfig {
        fn default() -> Self {
            Self {
                window_cells: DEFAULT_WINDOW_CELLS,
                scene_size: (MAX_SCENE_SIZE, MAX_SCENE_SIZE),
                render_mode: RenderMode::AssetBased,
                debug_view: false,
                debug_tile_size: DEBUG_TILE_SIZE,
                typing_speed_ms: Some(DEFAULT_TYPING_SPEED_MS),
            }
        }
    }
}
