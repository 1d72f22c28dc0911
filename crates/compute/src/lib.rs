pub mod analysis;
pub mod labels;

pub use analysis::*;
pub use labels::*;
