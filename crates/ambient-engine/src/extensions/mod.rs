// extensions/mod.rs
//
// Optional extension modules for the ambient engine.
// Pure helpers the systems opt into, independent of the pool and field.

pub mod easing;

pub use easing::{Easing, cubic_bezier, ease_out_cubic, ease_vec2, lerp, lerp_vec2};
