//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, frame-counted timing only
//! - Seeded RNG only
//! - Obstacles processed in spawn order (front of the queue is oldest)
//! - No rendering or platform dependencies

pub mod collision;
pub mod pipes;
pub mod state;
pub mod tick;

pub use collision::{Hitbox, bird_hits_pipe};
pub use pipes::{Pipe, PipeStream};
pub use state::{
    Bird, BoundaryHit, GameEvent, GamePhase, GameState, Progression, Scenery, level_label,
};
pub use tick::{FrameInput, tick};
