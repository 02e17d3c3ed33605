// extensions/easing.rs
//
// Pure easing curves for spark travel and ripple growth.
// Pure math, no dependencies on the field or pool.

use glam::Vec2;

/// Control points of the spark travel curve.
pub const SPARK_P1: f32 = 0.01;
pub const SPARK_P2: f32 = 0.3;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Fast start, slow end. Used for ripple radius.
    CubicOut,
    /// One-dimensional cubic Bezier from 0 to 1 with inner control values
    /// `p1` and `p2`. Slow start, accelerating finish for small `p1`.
    Bezier { p1: f32, p2: f32 },
}

impl Easing {
    /// Curve used by sparks travelling along an edge.
    pub const SPARK: Easing = Easing::Bezier { p1: SPARK_P1, p2: SPARK_P2 };

    /// Apply the easing function to a normalized time value `t` in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicOut => ease_out_cubic(t),
            Easing::Bezier { p1, p2 } => cubic_bezier(t, p1, p2),
        }
    }
}

/// `B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³`, endpoints fixed at 0 and 1.
#[inline]
pub fn cubic_bezier(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Interpolate Vec2 with easing.
#[inline]
pub fn ease_vec2(a: Vec2, b: Vec2, t: f32, easing: Easing) -> Vec2 {
    lerp_vec2(a, b, easing.apply(t))
}
