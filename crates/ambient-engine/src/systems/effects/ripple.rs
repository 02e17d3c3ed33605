//! Ripples: expanding, fading rings left where a spark lands.

use glam::Vec2;

use crate::extensions::easing::Easing;

#[derive(Debug, Clone, PartialEq)]
pub struct Ripple {
    pub origin: Vec2,
    /// Seconds since spawn.
    pub age: f32,
    /// Lifetime in seconds.
    pub duration: f32,
    pub max_radius: f32,
    /// Alpha at age 0.
    pub alpha: f32,
}

impl Ripple {
    pub const DURATION: f32 = 0.45;
    pub const BASE_ALPHA: f32 = 0.9;
    pub const BASE_RADIUS: f32 = 2.4;
    pub const MAX_EXTRA_RADIUS: f32 = 2.0;

    /// Ring for an edge of length `edge_distance`.
    pub fn new(origin: Vec2, edge_distance: f32) -> Self {
        Self {
            origin,
            age: 0.0,
            duration: Self::DURATION,
            max_radius: Self::BASE_RADIUS + (edge_distance * 100.0).min(Self::MAX_EXTRA_RADIUS),
            alpha: Self::BASE_ALPHA,
        }
    }

    /// Age the ripple. Returns false once it has expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.t() < 1.0
    }

    /// Normalised age in [0, 1+).
    pub fn t(&self) -> f32 {
        self.age / self.duration
    }

    pub fn radius(&self) -> f32 {
        self.max_radius * Easing::CubicOut.apply(self.t())
    }

    pub fn current_alpha(&self) -> f32 {
        self.alpha * (1.0 - self.t().min(1.0))
    }

    pub fn line_width(&self) -> f32 {
        1.0 + (1.0 - self.t().min(1.0)) * 1.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_radius_from_edge_length() {
        assert!((Ripple::new(Vec2::ZERO, 0.005).max_radius - 2.9).abs() < 1e-5);
        assert!((Ripple::new(Vec2::ZERO, 100.0).max_radius - 4.4).abs() < 1e-5);
    }

    #[test]
    fn alpha_strictly_decreases_to_zero() {
        let mut ripple = Ripple::new(Vec2::ZERO, 100.0);
        let mut prev = ripple.current_alpha();
        assert_eq!(prev, 0.9);
        while ripple.tick(1.0 / 60.0) {
            let alpha = ripple.current_alpha();
            assert!(alpha < prev);
            prev = alpha;
        }
        assert_eq!(ripple.current_alpha(), 0.0);
    }

    #[test]
    fn expires_at_duration() {
        let mut ripple = Ripple::new(Vec2::ZERO, 100.0);
        assert!(ripple.tick(0.2));
        assert!(!ripple.tick(0.3));
    }

    #[test]
    fn radius_eases_out() {
        let mut ripple = Ripple::new(Vec2::ZERO, 100.0);
        assert_eq!(ripple.radius(), 0.0);
        ripple.age = ripple.duration * 0.5;
        assert!((ripple.radius() - 4.4 * 0.875).abs() < 1e-5);
    }
}
