pub mod config;
pub mod context;
pub mod fetch;
pub mod interaction;
pub mod loader;

pub use config::*;
pub use context::*;
pub use fetch::*;
pub use interaction::*;
pub use loader::*;
