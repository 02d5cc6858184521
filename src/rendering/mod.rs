//! # Rendering Module
//!
//! Frame and sprite compositing onto abstract drawing surfaces, camera focusing,
//! walk-cycle playback and the macroquad window layer.

pub mod animation;
pub mod camera;
pub mod display;
pub mod renderer;
pub mod surface;

pub use animation::*;
pub use camera::*;
pub use display::*;
pub use renderer::*;
pub use surface::*;
