//! Per-frame working state of one background: the pool, pointer, graph,
//! effects and the draw list they produce.

use crate::api::config::{BackgroundConfig, SimParams};
use crate::components::particle::{Particle, GLOW_EPSILON};
use crate::core::pool::EntityPool;
use crate::core::time::FrameClock;
use crate::input::pointer::PointerState;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::traits::DrawList;
use crate::renderer::viewport::Viewport;
use crate::systems::effects::{EffectsState, Rng};
use crate::systems::proximity::{build_connections, Connection};
use crate::systems::render::{build_draw_list, FrameView};
use crate::systems::simulation;

pub struct ParticleField {
    params: SimParams,
    interactive: bool,
    effects_enabled: bool,
    viewport: Viewport,
    pool: EntityPool,
    pointer: PointerState,
    input: InputQueue,
    connections: Vec<Connection>,
    effects: EffectsState,
    clock: FrameClock,
    rng: Rng,
    draw_list: DrawList,
}

impl ParticleField {
    pub fn new(config: &BackgroundConfig, seed: u64) -> Self {
        Self {
            params: config.params(),
            interactive: config.interactive,
            effects_enabled: config.effects,
            viewport: Viewport::default(),
            pool: EntityPool::new(),
            pointer: PointerState::new(),
            input: InputQueue::new(),
            connections: Vec::with_capacity(1024),
            effects: EffectsState::new(seed),
            clock: FrameClock::new(),
            rng: Rng::new(seed),
            draw_list: DrawList::new(config.particle_color.clone()),
        }
    }

    /// Repopulate for `viewport`. Sparks and ripples refer to pool indices,
    /// so they are discarded along with the old particles.
    pub fn reseed(&mut self, viewport: Viewport, now_ms: f64) {
        self.viewport = viewport;
        self.pool.reseed(viewport.bounds(), &self.params, self.interactive, &mut self.rng, now_ms);
        self.connections.clear();
        self.effects.clear();
        self.clock.reset();
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Record where the pointer is while no frames run. Moves and leaves
    /// collapse to the latest; releases are dropped. The pool is untouched
    /// until the next frame drains the queue.
    pub fn track_pointer(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { .. } | InputEvent::PointerLeave => self.input.replace_position(event),
            InputEvent::PointerUp => {}
        }
    }

    /// Simulate and draw one frame at `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> &DrawList {
        let dt = self.clock.tick(now_ms);

        for event in self.input.drain() {
            self.pointer.apply(event, &mut self.pool, self.interactive, &self.params, &mut self.rng, now_ms);
        }

        let pointer = self.interactive.then_some(self.pointer.pos);
        simulation::step(self.pool.particles_mut(), self.viewport.bounds(), pointer, &self.params, now_ms);
        build_connections(self.pool.particles(), self.params.connection_distance, &mut self.connections);

        if self.effects_enabled {
            self.effects.tick(&self.connections, self.pool.particles(), dt);
        }

        let view = FrameView {
            particles: self.pool.particles(),
            connections: &self.connections,
            sparks: &self.effects.sparks,
            ripples: &self.effects.ripples,
            width: self.viewport.css_width,
            threshold: self.params.connection_distance,
            hue_drift: self.effects_enabled,
        };
        build_draw_list(&view, &mut self.draw_list);
        &self.draw_list
    }

    /// Nothing would change if another frame ran: no motion, no effects, no
    /// pending input, every glow at its target.
    pub fn is_settled(&self) -> bool {
        !self.effects_enabled
            && self.params.base_velocity == 0.0
            && self.input.is_empty()
            && self.effects.is_empty()
            && self
                .pool
                .particles()
                .iter()
                .all(|p| (p.glow - p.target_glow).abs() <= GLOW_EPSILON)
    }

    pub fn particle_count(&self) -> usize {
        self.pool.len()
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.particles()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn effects(&self) -> &EffectsState {
        &self.effects
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }
}
