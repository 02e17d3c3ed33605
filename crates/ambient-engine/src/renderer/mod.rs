pub mod traits;
pub mod viewport;

// Re-export key types for convenient access
pub use traits::{BlendMode, Color, DrawCommand, DrawList, Shadow, Surface};
pub use viewport::Viewport;
