pub mod field;
pub mod lifecycle;
pub mod pool;
pub mod time;
