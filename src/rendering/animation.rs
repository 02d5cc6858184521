//! # Sprite Animation
//!
//! Timed playback of a walk cycle. Frames are spaced evenly over the cycle
//! duration and the animation finishes once the last frame has had its slot.

use crate::game::{SheetCell, WalkCycle};
use std::time::Duration;

/// Playback state of one walk cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAnimation {
    frames: Vec<SheetCell>,
    interval: Duration,
    elapsed: Duration,
}

impl SpriteAnimation {
    pub fn new(cycle: &WalkCycle) -> Self {
        Self {
            frames: cycle.frames.clone(),
            interval: cycle.frame_interval(),
            elapsed: Duration::ZERO,
        }
    }

    /// Advances playback by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
    }

    /// Index of the frame on screen, or `None` once finished.
    pub fn frame_index(&self) -> Option<usize> {
        if self.frames.is_empty() {
            return None;
        }
        if self.interval.is_zero() {
            return None;
        }

        let index = (self.elapsed.as_nanos() / self.interval.as_nanos()) as usize;
        (index < self.frames.len()).then_some(index)
    }

    /// Sheet cell to draw right now, or `None` once finished.
    pub fn current_frame(&self) -> Option<SheetCell> {
        self.frame_index().map(|index| self.frames[index])
    }

    pub fn is_finished(&self) -> bool {
        self.frame_index().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk_down() -> WalkCycle {
        WalkCycle {
            frames: vec![SheetCell::new(0, 1), SheetCell::new(0, 2), SheetCell::new(0, 3)],
            duration: Duration::from_millis(150),
        }
    }

    #[test]
    fn test_frames_play_in_order() {
        let mut animation = SpriteAnimation::new(&walk_down());
        assert_eq!(animation.current_frame(), Some(SheetCell::new(0, 1)));

        animation.advance(Duration::from_millis(50));
        assert_eq!(animation.current_frame(), Some(SheetCell::new(0, 2)));

        animation.advance(Duration::from_millis(60));
        assert_eq!(animation.current_frame(), Some(SheetCell::new(0, 3)));
        assert!(!animation.is_finished());
    }

    #[test]
    fn test_finishes_after_full_duration() {
        let mut animation = SpriteAnimation::new(&walk_down());
        animation.advance(Duration::from_millis(149));
        assert!(!animation.is_finished());
        animation.advance(Duration::from_millis(1));
        assert!(animation.is_finished());
        assert_eq!(animation.current_frame(), None);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let cycle = WalkCycle {
            frames: vec![SheetCell::new(1, 1)],
            duration: Duration::ZERO,
        };
        assert!(SpriteAnimation::new(&cycle).is_finished());
    }
}
