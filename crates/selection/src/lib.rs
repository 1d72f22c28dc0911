pub mod engine;
pub mod selection;

pub use engine::*;
pub use selection::*;
