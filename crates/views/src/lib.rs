//! Pure projections from records (or one record) to display structures.
//!
//! Nothing here keeps state about the data; the only stateful piece is the
//! open/closed state of the modal overlay.

pub mod caption;
pub mod kpi;
pub mod modal;
pub mod table;
pub mod text;

pub use caption::*;
pub use kpi::*;
pub use modal::*;
pub use table::*;
pub use text::*;
