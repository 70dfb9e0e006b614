//! Astro Dash - a side-scrolling action platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, combat, level generation, game state)
//! - `render`: Read-only scene snapshots for an external renderer
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio, and input polling live outside this crate: the
//! simulation consumes a [`FrameInput`] snapshot per frame and emits
//! [`GameEvent`]s for the presentation layer to map to effects.

pub mod render;
pub mod sim;
pub mod tuning;

pub use sim::{FrameInput, Game, GameEvent, GamePhase};
pub use tuning::Tuning;

/// World and pacing constants
pub mod consts {
    /// Fixed simulation frame rate
    pub const FRAME_RATE: u32 = 60;
    /// Frame duration in seconds
    pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;

    /// Visible window dimensions in world units
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;

    /// Downward acceleration applied each frame
    pub const GRAVITY: f32 = 1.0;
    /// Terminal fall speed in units/frame
    pub const MAX_FALL_SPEED: f32 = 10.0;

    /// How far the player's right edge may lead the camera before it scrolls
    pub const SCROLL_THRESHOLD: f32 = 400.0;
}
