//! Flappy Eagle - a side-scrolling flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacle stream, progression)
//! - `render`: Canvas 2D painter (wasm only)
//! - `audio`: Web Audio sound cues (wasm only)
//! - `hud`: DOM overlays, score readout, level toast (wasm only)
//! - `settings`: Player preferences with LocalStorage persistence

pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod hud;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration applied every playing frame (px/frame²)
    pub const GRAVITY: f32 = 0.4;
    /// Velocity set by a flap - overrides momentum, never adds to it
    pub const FLAP_IMPULSE: f32 = -7.0;

    /// Bird stays at this x; the world scrolls past it
    pub const BIRD_X: f32 = 100.0;
    pub const BIRD_RADIUS: f32 = 20.0;
    /// Hitbox inset on all four sides, keeps near-misses forgiving
    pub const HITBOX_INSET: f32 = 5.0;

    /// Visual tilt while rising (degrees)
    pub const TILT_RISE_DEG: f32 = -25.0;
    /// Tilt added per falling frame (degrees)
    pub const TILT_STEP_DEG: f32 = 2.0;
    /// Nose-down tilt cap (degrees)
    pub const TILT_MAX_DEG: f32 = 70.0;

    /// Pipe dimensions
    pub const PIPE_WIDTH: f32 = 70.0;
    pub const PIPE_GAP: f32 = 160.0;
    /// Frames between spawns - cadence is frame-counted, not wall-clock
    pub const PIPE_SPAWN_INTERVAL: u64 = 70;
    /// The gap never starts closer than this to the top or the ground
    pub const GAP_MARGIN: f32 = 100.0;

    /// Scroll speed per level (px/frame)
    pub const PIPE_SPEED_BASE: f32 = 5.0;
    pub const PIPE_SPEED_LEVEL2: f32 = 6.0;
    pub const PIPE_SPEED_LEVEL3: f32 = 7.0;

    /// Score thresholds where the level steps up
    pub const LEVEL2_SCORE: u32 = 20;
    pub const LEVEL3_SCORE: u32 = 50;

    /// Ground band height at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 20.0;
    /// Grass strip drawn on top of the ground band
    pub const GRASS_HEIGHT: f32 = 10.0;

    /// Parallax scroll speeds (px/frame) while playing
    pub const CLOUD_SPEED: f32 = 0.5;
    pub const HILL_SPEED: f32 = 1.0;
    pub const TREE_SPEED: f32 = 2.0;
    /// Clouds keep drifting slowly on the start screen
    pub const CLOUD_IDLE_SPEED: f32 = 0.2;

    /// Start-screen hover bob: amplitude in px, phase advance per frame
    pub const HOVER_AMPLITUDE: f32 = 10.0;
    pub const HOVER_PHASE_STEP: f32 = 1.0 / 30.0;

    /// How long the level-up toast stays on screen
    pub const LEVEL_TOAST_MS: f64 = 2000.0;
}
