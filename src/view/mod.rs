//! View Transform
//!
//! Turns a user selection into a chart-ready series. The transform is a
//! pure function of the base table and the selection: it never mutates the
//! table and two identical calls yield identical series.
//!
//! ```text
//!   country filter → inclusive date filter → daily | cumulative → Series
//! ```

mod series;
mod transform;

pub use series::{Series, SeriesPoint};
pub use transform::{render, RenderRequest};
