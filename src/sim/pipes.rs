//! The obstacle stream: a FIFO queue of pipes and the policies governing
//! their birth, motion, and death.
//!
//! Pipes enter at the tail (right edge of the playfield) and leave at the
//! head (fully past the left edge), so horizontal order never changes and
//! only the head is ever removed.

use std::collections::VecDeque;

use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::bird_hits_pipe;
use super::state::{Bird, Progression};
use crate::consts::*;

/// One pipe pair: solid above and below a fixed-height gap
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge; decreases by the shared speed every playing frame
    pub x: f32,
    /// Top of the passable gap
    pub gap_top: f32,
    /// Set once the trailing edge crosses the bird's x. A pipe can only be
    /// scored after it has been passed.
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            gap_top,
            passed: false,
        }
    }

    pub fn right_edge(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + PIPE_GAP
    }

    /// Fully past the left edge of the playfield
    pub fn is_offscreen(&self) -> bool {
        self.right_edge() <= 0.0
    }
}

/// Uniform integer gap-top in [margin, ground - margin - gap]. A playfield
/// too short for that range degenerates to the minimum instead of
/// inverting the bounds.
fn sample_gap_top(ground_y: f32, rng: &mut Pcg32) -> f32 {
    let min = GAP_MARGIN as i32;
    let max = (ground_y - GAP_MARGIN - PIPE_GAP) as i32;
    if max <= min {
        return min as f32;
    }
    rng.random_range(min..=max) as f32
}

/// FIFO stream of live pipes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeStream {
    pipes: VecDeque<Pipe>,
}

impl PipeStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn cadence is frame-counted: one pipe every fixed interval,
    /// including the very first playing frame.
    pub fn should_spawn(frame: u64) -> bool {
        frame.is_multiple_of(PIPE_SPAWN_INTERVAL)
    }

    /// Append one pipe at the right edge with a freshly sampled gap
    pub fn spawn(&mut self, width: f32, ground_y: f32, rng: &mut Pcg32) {
        let gap_top = sample_gap_top(ground_y, rng);
        self.pipes.push_back(Pipe::new(width, gap_top));
    }

    /// Move every pipe left by the shared speed and mark the ones whose
    /// trailing edge has crossed the bird. Speed comes from the progression
    /// each frame, so a level-up reaches live pipes immediately.
    pub fn advance(&mut self, speed: f32) {
        for pipe in &mut self.pipes {
            pipe.x -= speed;
            if !pipe.passed && pipe.right_edge() < BIRD_X {
                pipe.passed = true;
            }
        }
    }

    /// Remove head pipes that have fully left the playfield, scoring one
    /// point each. Returns one entry per removed pipe: the new score and
    /// the level reached if that pass crossed a threshold.
    pub fn cull(&mut self, progress: &mut Progression) -> Vec<(u32, Option<u8>)> {
        let mut scored = Vec::new();
        while self.pipes.front().is_some_and(Pipe::is_offscreen) {
            let pipe = self.pipes.pop_front();
            debug_assert!(pipe.as_ref().is_some_and(|p| p.passed));
            let promoted = progress.record_pass();
            scored.push((progress.score, promoted));
        }
        scored
    }

    /// Scan pipes oldest-first and stop at the first terminal overlap
    pub fn collides(&self, bird: &Bird) -> bool {
        self.pipes.iter().any(|pipe| bird_hits_pipe(bird, pipe))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pipe> {
        self.pipes.iter()
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    pub fn clear(&mut self) {
        self.pipes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    const WIDTH: f32 = 800.0;
    const GROUND_Y: f32 = 580.0;

    fn seeded(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    #[test]
    fn test_spawn_cadence_is_frame_counted() {
        let mut rng = seeded(1);
        let mut stream = PipeStream::new();
        for frame in 0..=210u64 {
            if PipeStream::should_spawn(frame) {
                stream.spawn(WIDTH, GROUND_Y, &mut rng);
            }
        }
        // Frames 0, 70, 140, 210
        assert_eq!(stream.len(), 4);
        assert!(stream.iter().all(|p| p.x == WIDTH));
    }

    #[test]
    fn test_degenerate_playfield_clamps_gap_to_minimum() {
        let mut rng = seeded(2);
        // ground at 300: max would be 300-100-160 = 40, below the margin
        let gap = sample_gap_top(300.0, &mut rng);
        assert_eq!(gap, GAP_MARGIN);
    }

    #[test]
    fn test_offscreen_cull_scores_exactly_once() {
        let mut rng = seeded(3);
        let mut progress = Progression::new();
        let mut stream = PipeStream::new();
        stream.spawn(WIDTH, GROUND_Y, &mut rng);

        // (width + pipe width) / speed frames until fully off-screen
        let frames_to_clear = ((WIDTH + PIPE_WIDTH) / PIPE_SPEED_BASE) as u32;
        assert_eq!(frames_to_clear, 174);

        for frame in 1..=frames_to_clear {
            stream.advance(progress.speed());
            let scored = stream.cull(&mut progress);
            if frame < frames_to_clear {
                assert!(scored.is_empty(), "scored early at frame {frame}");
            } else {
                assert_eq!(scored, vec![(1, None)]);
            }
        }
        assert_eq!(progress.score, 1);
        assert!(stream.is_empty());
    }

    #[test]
    fn test_passed_flag_set_when_trailing_edge_crosses_bird() {
        let mut rng = seeded(4);
        let mut stream = PipeStream::new();
        stream.spawn(WIDTH, GROUND_Y, &mut rng);

        // right edge 870 -> needs 155 advances at speed 5 to drop below 100
        for _ in 0..154 {
            stream.advance(PIPE_SPEED_BASE);
        }
        assert!(stream.iter().all(|p| !p.passed));
        stream.advance(PIPE_SPEED_BASE);
        assert!(stream.iter().all(|p| p.passed));
    }

    #[test]
    fn test_cull_preserves_fifo_order() {
        let mut progress = Progression::new();
        let mut stream = PipeStream::new();
        // Hand-placed: two already off-screen, one still visible
        stream.pipes.push_back(Pipe {
            x: -200.0,
            gap_top: 150.0,
            passed: true,
        });
        stream.pipes.push_back(Pipe {
            x: -90.0,
            gap_top: 180.0,
            passed: true,
        });
        stream.pipes.push_back(Pipe::new(400.0, 210.0));

        let scored = stream.cull(&mut progress);
        assert_eq!(scored, vec![(1, None), (2, None)]);
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.iter().next().map(|p| p.x), Some(400.0));
    }

    #[test]
    fn test_level_up_speed_reaches_live_pipes() {
        let mut progress = Progression::new();
        for _ in 0..19 {
            progress.record_pass();
        }
        let mut stream = PipeStream::new();
        stream.pipes.push_back(Pipe {
            x: -80.0,
            gap_top: 150.0,
            passed: true,
        });
        let survivor = Pipe::new(500.0, 200.0);
        stream.pipes.push_back(survivor);

        // Culling the head crosses the level-2 threshold...
        let scored = stream.cull(&mut progress);
        assert_eq!(scored, vec![(20, Some(2))]);

        // ...and the surviving pipe moves at the new speed next frame
        stream.advance(progress.speed());
        assert_eq!(stream.iter().next().map(|p| p.x), Some(500.0 - 6.0));
    }

    proptest! {
        #[test]
        fn prop_gap_top_always_within_margins(seed in any::<u64>(), height in 320.0f32..2000.0) {
            let mut rng = seeded(seed);
            let ground_y = height - GROUND_HEIGHT;
            let gap_top = sample_gap_top(ground_y, &mut rng);

            let min = GAP_MARGIN;
            let max = (ground_y - GAP_MARGIN - PIPE_GAP).max(min);
            prop_assert!(gap_top >= min);
            prop_assert!(gap_top <= max);
            // The whole gap stays above the ground band
            prop_assert!(gap_top + PIPE_GAP <= ground_y.max(min + PIPE_GAP));
        }
    }
}
