//! Transient visual effects: sparks travelling along edges and the ripples
//! they leave behind.
//!
//! This module provides the `EffectsState` facade that owns both pools, plus
//! the individual effect types.

mod rng;
mod ripple;
mod spark;

pub use rng::Rng;
pub use ripple::Ripple;
pub use spark::Spark;

use crate::components::particle::Particle;
use crate::systems::proximity::Connection;

/// Container for all live sparks and ripples.
/// Both persist across frames until their own termination condition fires.
pub struct EffectsState {
    pub sparks: Vec<Spark>,
    pub ripples: Vec<Ripple>,
    pub rng: Rng,
}

impl EffectsState {
    /// Sparks are topped up to this count whenever any edge exists.
    pub const MIN_SPARKS: usize = 1;
    /// Random spawns stop at this count.
    pub const MAX_SPARKS: usize = 4;
    /// Per-frame probability of an extra spark below `MAX_SPARKS`.
    pub const SPAWN_CHANCE: f32 = 0.025;

    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        EffectsState {
            sparks: Vec::with_capacity(Self::MAX_SPARKS),
            ripples: Vec::with_capacity(16),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Spawn a spark on a random edge, in a random direction.
    pub fn spawn_spark(&mut self, connections: &[Connection]) {
        if connections.is_empty() {
            return;
        }
        let edge = connections[self.rng.index(connections.len())];
        let (start, end) = if self.rng.chance(0.5) { (edge.b, edge.a) } else { (edge.a, edge.b) };
        let speed = self.rng.range(Spark::MIN_SPEED, Spark::MIN_SPEED + Spark::SPEED_SPREAD);
        self.sparks.push(Spark::new(start, end, speed, edge.distance));
    }

    /// Advance effects by `dt` seconds: top up and advance sparks, turn
    /// arrivals into ripples, then age ripples.
    pub fn tick(&mut self, connections: &[Connection], particles: &[Particle], dt: f32) {
        self.tick_sparks(connections, particles, dt);
        self.ripples.retain_mut(|r| r.tick(dt));
    }

    fn tick_sparks(&mut self, connections: &[Connection], particles: &[Particle], dt: f32) {
        if connections.is_empty() {
            self.sparks.clear();
            return;
        }

        while self.sparks.len() < Self::MIN_SPARKS {
            self.spawn_spark(connections);
        }
        if self.sparks.len() < Self::MAX_SPARKS && self.rng.chance(Self::SPAWN_CHANCE) {
            self.spawn_spark(connections);
        }

        let mut i = 0;
        while i < self.sparks.len() {
            if !self.sparks[i].tick(dt) {
                i += 1;
                continue;
            }
            let spark = self.sparks.swap_remove(i);
            match particles.get(spark.end) {
                Some(end) => {
                    let at = end.pos;
                    self.ripples.push(spark.into_ripple(at));
                }
                None => log::warn!("spark ended on missing particle {}", spark.end),
            }
        }
    }

    /// Clear all effects.
    pub fn clear(&mut self) {
        self.sparks.clear();
        self.ripples.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty() && self.ripples.is_empty()
    }
}
