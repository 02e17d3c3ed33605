//! Sparks: pulses that travel along one edge and burst into a ripple.

use glam::Vec2;

use super::ripple::Ripple;
use crate::extensions::easing::{ease_vec2, Easing};

/// A pulse bound to the edge it was spawned on.
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    /// Pool index the spark leaves from.
    pub start: usize,
    /// Pool index the spark travels to.
    pub end: usize,
    /// Travel progress in [0, 1].
    pub progress: f32,
    /// Per-spark speed multiplier (progress per second).
    pub speed: f32,
    /// Edge length when the spark was spawned.
    pub distance: f32,
}

impl Spark {
    /// Largest time step a spark advances by in one frame.
    pub const MAX_STEP: f32 = 0.05;
    pub const MIN_SPEED: f32 = 0.54;
    pub const SPEED_SPREAD: f32 = 0.3;
    /// Edge length that maps to a distance factor of 1.
    pub const REFERENCE_DISTANCE: f32 = 130.0;

    pub fn new(start: usize, end: usize, speed: f32, distance: f32) -> Self {
        Self { start, end, progress: 0.0, speed, distance }
    }

    /// Advance by `speed * min(dt, MAX_STEP)`. Returns true once the spark has
    /// arrived (`progress >= 1`).
    pub fn tick(&mut self, dt: f32) -> bool {
        self.progress += self.speed * dt.min(Self::MAX_STEP);
        self.progress >= 1.0
    }

    /// Current position between the two endpoint positions, eased along the
    /// travel curve.
    pub fn position(&self, start: Vec2, end: Vec2) -> Vec2 {
        ease_vec2(start, end, self.progress.min(1.0), Easing::SPARK)
    }

    /// Edge length normalised to the reference distance, clamped to [0.2, 1.3].
    pub fn distance_factor(&self) -> f32 {
        (self.distance / Self::REFERENCE_DISTANCE).clamp(0.2, 1.3)
    }

    /// The ripple left behind at `at` when this spark arrives.
    pub fn into_ripple(self, at: Vec2) -> Ripple {
        Ripple::new(at, self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_strictly_increases_until_arrival() {
        let mut spark = Spark::new(0, 1, 0.54, 100.0);
        let mut prev = spark.progress;
        let mut frames = 0;
        loop {
            let arrived = spark.tick(1.0 / 60.0);
            frames += 1;
            if arrived {
                break;
            }
            assert!(spark.progress > prev);
            assert!(spark.progress < 1.0);
            prev = spark.progress;
        }
        assert!(spark.progress >= 1.0);
        // 0.54 * (1/60) per frame
        assert!((110..=112).contains(&frames), "took {} frames", frames);
    }

    #[test]
    fn long_frames_are_capped() {
        let mut spark = Spark::new(0, 1, 0.8, 100.0);
        spark.tick(2.0);
        assert!((spark.progress - 0.04).abs() < 1e-6);
    }

    #[test]
    fn position_follows_easing_curve() {
        let mut spark = Spark::new(0, 1, 1.0, 100.0);
        spark.progress = 0.5;
        let pos = spark.position(Vec2::ZERO, Vec2::new(100.0, 0.0));
        assert!((pos.x - 24.125).abs() < 1e-3, "got {}", pos.x);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn position_at_overshoot_is_the_end() {
        let mut spark = Spark::new(0, 1, 1.0, 100.0);
        spark.progress = 1.3;
        let pos = spark.position(Vec2::ZERO, Vec2::new(100.0, 50.0));
        assert!((pos - Vec2::new(100.0, 50.0)).length() < 1e-3);
    }

    #[test]
    fn distance_factor_is_clamped() {
        assert_eq!(Spark::new(0, 1, 1.0, 1.0).distance_factor(), 0.2);
        assert_eq!(Spark::new(0, 1, 1.0, 1000.0).distance_factor(), 1.3);
        assert!((Spark::new(0, 1, 1.0, 65.0).distance_factor() - 0.5).abs() < 1e-6);
    }
}
