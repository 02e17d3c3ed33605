//! Interaction handler: turns queued pointer events into the pointer snapshot
//! and the anchor/spawn side effects on the pool.

use glam::Vec2;

use super::queue::InputEvent;
use crate::api::config::SimParams;
use crate::core::pool::EntityPool;
use crate::systems::effects::Rng;

/// Where the pointer "is" when it has never entered or has left the surface.
/// Far enough out that no particle is within glow range.
pub const OFF_SURFACE: Vec2 = Vec2::new(-1000.0, -1000.0);

/// Tracked pointer position in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub pos: Vec2,
}

impl PointerState {
    pub fn new() -> Self {
        Self { pos: OFF_SURFACE }
    }

    pub fn is_on_surface(&self) -> bool {
        self.pos != OFF_SURFACE
    }

    /// Apply one event. With `interactive`, moves drag the anchor and
    /// releases spawn a particle at it.
    pub fn apply(
        &mut self,
        event: InputEvent,
        pool: &mut EntityPool,
        interactive: bool,
        params: &SimParams,
        rng: &mut Rng,
        now_ms: f64,
    ) {
        match event {
            InputEvent::PointerMove { x, y } => {
                self.pos = Vec2::new(x, y);
                if interactive {
                    pool.move_anchor(self.pos);
                }
            }
            InputEvent::PointerUp => {
                if interactive {
                    if let Some(idx) = pool.spawn_at_anchor(params, rng, now_ms) {
                        log::debug!("spawned particle {} at anchor", idx);
                    }
                }
            }
            InputEvent::PointerLeave => {
                self.pos = OFF_SURFACE;
            }
        }
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_pool(interactive: bool) -> (EntityPool, Rng) {
        let mut pool = EntityPool::new();
        let mut rng = Rng::new(8);
        pool.reseed(Vec2::new(400.0, 400.0), &SimParams::default(), interactive, &mut rng, 0.0);
        (pool, rng)
    }

    #[test]
    fn defaults_off_surface() {
        let pointer = PointerState::new();
        assert_eq!(pointer.pos, OFF_SURFACE);
        assert!(!pointer.is_on_surface());
    }

    #[test]
    fn move_drags_anchor() {
        let (mut pool, mut rng) = seeded_pool(true);
        let mut pointer = PointerState::new();
        let params = SimParams::default();
        pointer.apply(InputEvent::PointerMove { x: 12.0, y: 34.0 }, &mut pool, true, &params, &mut rng, 0.0);
        assert_eq!(pointer.pos, Vec2::new(12.0, 34.0));
        assert_eq!(pool.anchor().unwrap().pos, Vec2::new(12.0, 34.0));
    }

    #[test]
    fn release_spawns_at_anchor() {
        let (mut pool, mut rng) = seeded_pool(true);
        let before = pool.len();
        let mut pointer = PointerState::new();
        let params = SimParams::default();
        pointer.apply(InputEvent::PointerMove { x: 50.0, y: 60.0 }, &mut pool, true, &params, &mut rng, 0.0);
        pointer.apply(InputEvent::PointerUp, &mut pool, true, &params, &mut rng, 0.0);
        assert_eq!(pool.len(), before + 1);
        assert_eq!(pool.particles()[before].pos, Vec2::new(50.0, 60.0));
    }

    #[test]
    fn non_interactive_tracks_pointer_only() {
        let (mut pool, mut rng) = seeded_pool(false);
        let before = pool.len();
        let mut pointer = PointerState::new();
        let params = SimParams::default();
        pointer.apply(InputEvent::PointerMove { x: 5.0, y: 5.0 }, &mut pool, false, &params, &mut rng, 0.0);
        pointer.apply(InputEvent::PointerUp, &mut pool, false, &params, &mut rng, 0.0);
        assert_eq!(pointer.pos, Vec2::new(5.0, 5.0));
        assert_eq!(pool.len(), before);
    }

    #[test]
    fn leave_resets_to_sentinel() {
        let (mut pool, mut rng) = seeded_pool(true);
        let mut pointer = PointerState::new();
        let params = SimParams::default();
        pointer.apply(InputEvent::PointerMove { x: 5.0, y: 5.0 }, &mut pool, true, &params, &mut rng, 0.0);
        pointer.apply(InputEvent::PointerLeave, &mut pool, true, &params, &mut rng, 0.0);
        assert_eq!(pointer.pos, OFF_SURFACE);
        // The anchor stays where it was last dragged.
        assert_eq!(pool.anchor().unwrap().pos, Vec2::new(5.0, 5.0));
    }
}
