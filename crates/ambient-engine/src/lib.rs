pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{BackgroundConfig, DensitySetting, SimParams, SpeedSetting};
pub use components::particle::Particle;
pub use crate::core::field::ParticleField;
pub use crate::core::lifecycle::{Lifecycle, LifecycleCommand, LifecycleState, FADE_FALLBACK_MS};
pub use crate::core::pool::EntityPool;
pub use crate::core::time::FrameClock;
pub use input::pointer::{PointerState, OFF_SURFACE};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::{BlendMode, Color, DrawCommand, DrawList, Shadow, Surface, Viewport};
pub use systems::effects::{EffectsState, Ripple, Rng, Spark};
pub use systems::proximity::Connection;

// Extensions
pub use extensions::{ease_out_cubic, ease_vec2, lerp, lerp_vec2, Easing};
