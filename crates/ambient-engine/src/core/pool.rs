use glam::Vec2;

use crate::api::config::{particle_count, SimParams};
use crate::components::particle::{random_velocity, Particle};
use crate::systems::effects::Rng;

/// Flat storage for every live particle.
/// Sized for hundreds of particles; indices stay stable until the next reseed,
/// which is what sparks and connections refer to.
pub struct EntityPool {
    particles: Vec<Particle>,
    anchor: Option<usize>,
}

impl EntityPool {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(256),
            anchor: None,
        }
    }

    /// Replace every particle with `floor(area / divisor)` fresh ones, plus one
    /// anchor when `interactive`.
    pub fn reseed(&mut self, bounds: Vec2, params: &SimParams, interactive: bool, rng: &mut Rng, now_ms: f64) {
        self.particles.clear();
        self.anchor = None;

        let count = particle_count(bounds.x * bounds.y, params.density_divisor);
        for _ in 0..count {
            self.particles.push(Particle::random(bounds, params.base_velocity, rng, now_ms));
        }

        if interactive {
            let pos = Vec2::new(rng.next_f32() * bounds.x, rng.next_f32() * bounds.y);
            self.anchor = Some(self.particles.len());
            self.particles.push(Particle::anchor(pos, now_ms));
        }

        log::info!(
            "seeded {} particles over {}x{} (anchor: {})",
            count,
            bounds.x,
            bounds.y,
            interactive
        );
    }

    /// Append an ordinary particle at the anchor with a fresh velocity.
    /// Returns its index, or `None` when there is no anchor.
    pub fn spawn_at_anchor(&mut self, params: &SimParams, rng: &mut Rng, now_ms: f64) -> Option<usize> {
        let pos = self.anchor()?.pos;
        let idx = self.particles.len();
        self.particles.push(Particle::new(pos, random_velocity(params.base_velocity, rng), now_ms));
        Some(idx)
    }

    /// Pin the anchor to `pos`. No-op without an anchor.
    pub fn move_anchor(&mut self, pos: Vec2) {
        if let Some(anchor) = self.anchor.and_then(|i| self.particles.get_mut(i)) {
            anchor.pos = pos;
        }
    }

    pub fn anchor(&self) -> Option<&Particle> {
        self.anchor.and_then(|i| self.particles.get(i))
    }

    pub fn anchor_index(&self) -> Option<usize> {
        self.anchor
    }

    pub fn get(&self, idx: usize) -> Option<&Particle> {
        self.particles.get(idx)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Default for EntityPool {
    fn default() -> Self {
        Self::new()
    }
}
