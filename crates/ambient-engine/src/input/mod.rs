pub mod pointer;
pub mod queue;

pub use pointer::{PointerState, OFF_SURFACE};
pub use queue::{InputEvent, InputQueue};
