//! Read-only projections of a [`formats::Dataset`] into the shapes the KPI
//! slots, the choropleth and the two charts consume.

pub mod kpi;
pub mod ranking;
pub mod series;
pub mod statistics;

pub use kpi::*;
pub use ranking::*;
pub use series::*;
pub use statistics::*;
