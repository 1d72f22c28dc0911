pub mod boundary;
pub mod ordered;
pub mod policy;
pub mod sanitize;

pub use boundary::*;
pub use ordered::*;
pub use policy::*;
pub use sanitize::*;
