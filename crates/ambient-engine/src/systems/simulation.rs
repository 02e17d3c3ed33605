//! Per-frame simulation step: wall reflection, integration and glow easing.

use glam::Vec2;

use crate::api::config::SimParams;
use crate::components::particle::Particle;

/// Advance every non-anchor particle by one frame.
///
/// A particle that has drifted more than `margin` past an edge and is still
/// heading outward has that velocity component negated before moving. The
/// position is never clamped, so particles briefly overshoot the margin.
pub fn integrate(particles: &mut [Particle], bounds: Vec2, margin: f32) {
    for p in particles.iter_mut().filter(|p| !p.is_anchor) {
        if (p.pos.x > bounds.x + margin && p.vel.x > 0.0) || (p.pos.x < -margin && p.vel.x < 0.0) {
            p.vel.x = -p.vel.x;
        }
        if (p.pos.y > bounds.y + margin && p.vel.y > 0.0) || (p.pos.y < -margin && p.vel.y < 0.0) {
            p.vel.y = -p.vel.y;
        }
        p.pos += p.vel;
    }
}

/// Ease every particle's glow toward its pointer-distance target.
/// `pointer` is the snapshot taken at the start of the frame.
pub fn update_glow(particles: &mut [Particle], pointer: Vec2, params: &SimParams, now_ms: f64) {
    for p in particles.iter_mut() {
        p.update_glow(pointer, params.max_glow_distance, params.glow_rate, now_ms);
    }
}

/// Run the whole step for one frame.
pub fn step(particles: &mut [Particle], bounds: Vec2, pointer: Option<Vec2>, params: &SimParams, now_ms: f64) {
    integrate(particles, bounds, params.wall_margin);
    if let Some(pointer) = pointer {
        update_glow(particles, pointer, params, now_ms);
    }
}
