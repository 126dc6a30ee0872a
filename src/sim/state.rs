//! Game state and core simulation types
//!
//! Everything the per-frame tick reads or writes lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::pipes::PipeStream;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen: bird hovers at center, no obstacles
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, world frozen until an explicit restart
    GameOver,
}

/// Outcome of one physics step against the playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryHit {
    None,
    /// Clamped at the top edge with velocity zeroed. Not terminal.
    Ceiling,
    /// Settled onto the ground line. Terminal.
    Ground,
}

/// The player-controlled flyer
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// x stays at [`BIRD_X`]; only y moves
    pub pos: Vec2,
    /// Vertical velocity, positive is downward
    pub vel: f32,
    pub radius: f32,
    /// Visual tilt in degrees, derived from velocity. Never affects collision.
    pub tilt: f32,
}

impl Bird {
    pub fn new(center_y: f32) -> Self {
        Self {
            pos: Vec2::new(BIRD_X, center_y),
            vel: 0.0,
            radius: BIRD_RADIUS,
            tilt: 0.0,
        }
    }

    /// Discrete upward impulse. Overrides momentum instead of adding to it.
    pub fn flap(&mut self) {
        self.vel = FLAP_IMPULSE;
        self.tilt = TILT_RISE_DEG;
    }

    /// One frame of physics: gravity, integration, boundary clamps.
    /// Ground contact is the primary loss condition; the ceiling only
    /// stops the climb.
    pub fn advance(&mut self, ground_y: f32) -> BoundaryHit {
        self.vel += GRAVITY;
        self.pos.y += self.vel;
        self.update_tilt();

        if self.pos.y + self.radius >= ground_y {
            self.pos.y = ground_y - self.radius;
            return BoundaryHit::Ground;
        }
        if self.pos.y - self.radius <= 0.0 {
            self.pos.y = self.radius;
            self.vel = 0.0;
            return BoundaryHit::Ceiling;
        }
        BoundaryHit::None
    }

    fn update_tilt(&mut self) {
        if self.vel < 0.0 {
            self.tilt = TILT_RISE_DEG;
        } else if self.vel > 0.0 {
            self.tilt = (self.tilt + TILT_STEP_DEG).min(TILT_MAX_DEG);
        } else {
            self.tilt = 0.0;
        }
    }
}

/// Score, level, and the scroll speed the level implies.
///
/// Speed lives here so that a level-up reaches every live obstacle on the
/// next advance, not just newly spawned ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    pub score: u32,
    /// 1..=3, never decreases within a session
    pub level: u8,
    speed: f32,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            speed: PIPE_SPEED_BASE,
        }
    }

    /// Shared horizontal speed for all live and future obstacles (px/frame)
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Count one cleared obstacle. Returns the new level when this exact
    /// score crosses a threshold; each threshold fires once because score
    /// only ever moves in +1 steps.
    pub fn record_pass(&mut self) -> Option<u8> {
        self.score += 1;
        let promoted = match self.score {
            LEVEL2_SCORE => {
                self.level = 2;
                self.speed = PIPE_SPEED_LEVEL2;
                Some(2)
            }
            LEVEL3_SCORE => {
                self.level = 3;
                self.speed = PIPE_SPEED_LEVEL3;
                Some(3)
            }
            _ => None,
        };
        debug_assert!((1..=3).contains(&self.level));
        promoted
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

/// Toast text shown when a level is reached
pub fn level_label(level: u8) -> &'static str {
    match level {
        2 => "Level 2: Medium",
        3 => "Level 3: Hard",
        _ => "Level 1: Easy",
    }
}

/// Parallax layer offsets and the start-screen bob phase.
///
/// Pure data: the renderer turns these into pixels, nothing here draws.
/// Offsets are the x of the leftmost tile; each layer tiles at playfield
/// width and wraps back to 0 once a full tile has scrolled past.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scenery {
    pub clouds_x: f32,
    pub hills_x: f32,
    pub trees_x: f32,
    pub hover_phase: f32,
}

impl Scenery {
    /// Scroll all layers one playing frame
    pub fn scroll(&mut self, width: f32) {
        self.clouds_x = wrap(self.clouds_x - CLOUD_SPEED, width);
        self.hills_x = wrap(self.hills_x - HILL_SPEED, width);
        self.trees_x = wrap(self.trees_x - TREE_SPEED, width);
    }

    /// Start-screen drift: clouds only, plus the hover bob phase
    pub fn drift(&mut self, width: f32) {
        self.clouds_x = wrap(self.clouds_x - CLOUD_IDLE_SPEED, width);
        self.hover_phase += HOVER_PHASE_STEP;
    }

    /// Vertical bob offset for the start-screen bird
    pub fn hover_offset(&self) -> f32 {
        self.hover_phase.sin() * HOVER_AMPLITUDE
    }
}

fn wrap(x: f32, width: f32) -> f32 {
    if x <= -width { 0.0 } else { x }
}

/// One-shot outputs of a tick, consumed by the shell (audio, HUD, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Left the start screen
    Started,
    Flapped,
    /// An obstacle fully cleared the left edge
    Scored { score: u32 },
    LevelUp { level: u8 },
    /// Terminal collision, with the final score
    Crashed { score: u32 },
    /// Full reset back to the start screen
    Reset,
}

/// Complete world state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gap sampling draws from this; advances across spawns and restarts
    pub rng: Pcg32,
    /// Playfield size in px
    pub width: f32,
    pub height: f32,
    /// Frame counter. Advances only while playing; drives spawn cadence.
    pub frame: u64,
    pub phase: GamePhase,
    pub bird: Bird,
    pub pipes: PipeStream,
    pub progress: Progression,
    pub scenery: Scenery,
}

impl GameState {
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width,
            height,
            frame: 0,
            phase: GamePhase::Start,
            bird: Bird::new(height / 2.0),
            pipes: PipeStream::new(),
            progress: Progression::new(),
            scenery: Scenery::default(),
        }
    }

    /// y of the ground line the bird lands on
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }

    /// Full restart: bird centered, queue emptied, score/level/speed/frames
    /// back to base, phase to Start. Scenery offsets and the RNG carry over
    /// so each run sees fresh gaps.
    pub fn reset(&mut self) {
        self.bird = Bird::new(self.height / 2.0);
        self.pipes.clear();
        self.progress = Progression::new();
        self.frame = 0;
        self.phase = GamePhase::Start;
    }

    /// Playfield follows the window; entities keep their positions.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}
