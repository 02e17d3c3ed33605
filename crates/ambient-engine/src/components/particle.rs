use glam::Vec2;

use crate::systems::effects::Rng;

/// Glow below this is drawn as a plain dot.
pub const GLOW_EPSILON: f32 = 0.01;

/// A single point of the field. Plain data: all time-dependent updates take
/// explicit timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in CSS pixel space.
    pub pos: Vec2,
    /// Displacement per frame.
    pub vel: Vec2,
    /// Pinned to the pointer instead of integrated.
    pub is_anchor: bool,
    /// Smoothed pointer response in [0, 1].
    pub glow: f32,
    /// Value `glow` is easing toward.
    pub target_glow: f32,
    /// Timestamp (ms) of the last glow update.
    pub glow_updated_at: f64,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, now_ms: f64) -> Self {
        Self {
            pos,
            vel,
            is_anchor: false,
            glow: 0.0,
            target_glow: 0.0,
            glow_updated_at: now_ms,
        }
    }

    /// Anchor particle: zero velocity, excluded from integration.
    pub fn anchor(pos: Vec2, now_ms: f64) -> Self {
        Self {
            is_anchor: true,
            ..Self::new(pos, Vec2::ZERO, now_ms)
        }
    }

    /// Uniform position in `[0, bounds)` with velocity in `±base / 2` per axis.
    pub fn random(bounds: Vec2, base_velocity: f32, rng: &mut Rng, now_ms: f64) -> Self {
        let pos = Vec2::new(rng.next_f32() * bounds.x, rng.next_f32() * bounds.y);
        Self::new(pos, random_velocity(base_velocity, rng), now_ms)
    }

    pub fn is_glowing(&self) -> bool {
        self.glow > GLOW_EPSILON
    }

    /// Recompute the glow target from the pointer and ease toward it.
    pub fn update_glow(&mut self, pointer: Vec2, max_distance: f32, rate: f32, now_ms: f64) {
        self.target_glow = glow_target(self.pos.distance(pointer), max_distance);
        let dt = ((now_ms - self.glow_updated_at) / 1000.0).max(0.0) as f32;
        self.glow_updated_at = now_ms;
        self.glow = smooth_glow(self.glow, self.target_glow, rate, dt);
    }
}

/// `(u - 0.5) * base` on each axis.
pub fn random_velocity(base_velocity: f32, rng: &mut Rng) -> Vec2 {
    Vec2::new(
        (rng.next_f32() - 0.5) * base_velocity,
        (rng.next_f32() - 0.5) * base_velocity,
    )
}

/// Linear falloff from 1 at the pointer to 0 at `max_distance`.
pub fn glow_target(distance: f32, max_distance: f32) -> f32 {
    if distance <= max_distance {
        (1.0 - distance / max_distance).max(0.0)
    } else {
        0.0
    }
}

/// Exponential approach: `glow + (target - glow) * min(1, rate * dt)`.
pub fn smooth_glow(glow: f32, target: f32, rate: f32, dt: f32) -> f32 {
    glow + (target - glow) * (rate * dt).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f32 = 1.0 / 0.3;

    #[test]
    fn glow_target_falls_off_linearly() {
        assert_eq!(glow_target(0.0, 120.0), 1.0);
        assert!((glow_target(60.0, 120.0) - 0.5).abs() < 1e-6);
        assert_eq!(glow_target(120.0, 120.0), 0.0);
        assert_eq!(glow_target(500.0, 120.0), 0.0);
    }

    #[test]
    fn smooth_glow_snaps_after_full_window() {
        assert_eq!(smooth_glow(0.0, 1.0, RATE, 0.4), 1.0);
        assert_eq!(smooth_glow(0.8, 0.0, RATE, 1.0), 0.0);
    }

    #[test]
    fn smooth_glow_partial_step() {
        let g = smooth_glow(0.0, 1.0, RATE, 0.15);
        assert!((g - 0.5).abs() < 1e-5, "got {}", g);
    }

    #[test]
    fn update_glow_uses_elapsed_time() {
        let mut p = Particle::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 0.0);
        p.update_glow(Vec2::new(100.0, 100.0), 120.0, RATE, 150.0);
        assert_eq!(p.target_glow, 1.0);
        assert!((p.glow - 0.5).abs() < 1e-5);
        assert_eq!(p.glow_updated_at, 150.0);
    }

    #[test]
    fn zero_elapsed_time_leaves_glow_unchanged() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 1000.0);
        p.update_glow(Vec2::ZERO, 120.0, RATE, 1000.0);
        assert_eq!(p.glow, 0.0);
        assert_eq!(p.target_glow, 1.0);
    }

    #[test]
    fn random_particle_within_bounds() {
        let mut rng = Rng::new(5);
        for _ in 0..200 {
            let p = Particle::random(Vec2::new(300.0, 200.0), 0.18, &mut rng, 0.0);
            assert!(p.pos.x >= 0.0 && p.pos.x <= 300.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= 200.0);
            assert!(p.vel.x.abs() <= 0.09 && p.vel.y.abs() <= 0.09);
            assert!(!p.is_anchor);
        }
    }

    #[test]
    fn anchor_has_zero_velocity() {
        let a = Particle::anchor(Vec2::new(5.0, 5.0), 0.0);
        assert!(a.is_anchor);
        assert_eq!(a.vel, Vec2::ZERO);
    }
}
