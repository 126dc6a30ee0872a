//! Collision detection between the bird and pipes
//!
//! Axis-aligned tests only: the bird collides as an inset box, a pipe as two
//! rectangles above and below its gap.

use super::pipes::Pipe;
use super::state::Bird;
use crate::consts::HITBOX_INSET;

/// The bird's collision rectangle, inset from the drawn sprite on all four
/// sides so near-misses against the chunky pipe art stay fair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Hitbox {
    pub fn of(bird: &Bird) -> Self {
        Self {
            left: bird.pos.x - bird.radius + HITBOX_INSET,
            right: bird.pos.x + bird.radius - HITBOX_INSET,
            top: bird.pos.y - bird.radius + HITBOX_INSET,
            bottom: bird.pos.y + bird.radius - HITBOX_INSET,
        }
    }

    /// True while any part of the box lies within the pipe's horizontal span
    #[inline]
    pub fn overlaps_span(&self, pipe: &Pipe) -> bool {
        self.right > pipe.x && self.left < pipe.right_edge()
    }

    /// True while the whole box sits inside the gap. Touching either gap
    /// edge exactly still counts as inside.
    #[inline]
    pub fn inside_gap(&self, pipe: &Pipe) -> bool {
        self.top >= pipe.gap_top && self.bottom <= pipe.gap_bottom()
    }
}

/// Terminal overlap test for one pipe: horizontally inside the pipe's span
/// while any part of the hitbox pokes outside the gap.
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    let hitbox = Hitbox::of(bird);
    hitbox.overlaps_span(pipe) && !hitbox.inside_gap(pipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BIRD_RADIUS, BIRD_X, PIPE_GAP};

    fn bird_at(y: f32) -> Bird {
        Bird::new(y)
    }

    #[test]
    fn test_centered_in_gap_is_safe() {
        let pipe = Pipe::new(BIRD_X - 10.0, 200.0);
        // Gap spans 200..360; bird centered at 280
        let bird = bird_at(280.0);
        assert!(!bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_hits_top_pipe() {
        let pipe = Pipe::new(BIRD_X - 10.0, 200.0);
        // Hitbox top at 150-20+5 = 135, above the gap
        let bird = bird_at(150.0);
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_hits_bottom_pipe() {
        let pipe = Pipe::new(BIRD_X - 10.0, 200.0);
        // Hitbox bottom at 400+20-5 = 415, below gap bottom at 360
        let bird = bird_at(400.0);
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_no_horizontal_overlap_is_safe() {
        // Pipe far to the right of the bird; altitude would be fatal
        let pipe = Pipe::new(BIRD_X + 300.0, 200.0);
        let bird = bird_at(50.0);
        assert!(!bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_inset_forgives_a_graze() {
        // Sprite edge reaches x=120 but the hitbox stops at 115, so a pipe
        // starting at 117 never overlaps
        let pipe = Pipe::new(BIRD_X + BIRD_RADIUS - 3.0, 200.0);
        let bird = bird_at(50.0);
        assert!(!bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_touching_gap_edges_is_safe() {
        let pipe = Pipe::new(BIRD_X - 10.0, 200.0);

        // Hitbox top exactly on the gap top
        let bird = bird_at(200.0 + BIRD_RADIUS - HITBOX_INSET);
        assert!(!bird_hits_pipe(&bird, &pipe));

        // Hitbox bottom exactly on the gap bottom
        let bird = bird_at(200.0 + PIPE_GAP - BIRD_RADIUS + HITBOX_INSET);
        assert!(!bird_hits_pipe(&bird, &pipe));
    }
}
