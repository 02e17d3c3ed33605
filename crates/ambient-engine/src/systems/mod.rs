pub mod effects;
pub mod proximity;
pub mod render;
pub mod simulation;
