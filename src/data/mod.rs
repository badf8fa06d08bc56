//! COVID-19 Data Store
//!
//! Loads the country-level dataset once and keeps it as an immutable
//! in-memory base table:
//!
//! - **types**: Core data structures (Observation, Metric, ViewMode, AxisScale)
//! - **loader**: CSV parsing with day-first date handling
//! - **table**: The base table and its derived option lists
//! - **error**: Error types
//!
//! # Load Path
//!
//! ```text
//!   CSV → parse header → parse rows → drop aggregate rows → BaseTable
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use covid_dashboard::data::{load, Metric};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = load("owid-covid-data.csv")?;
//!
//!     println!("{} countries", table.countries().len());
//!     for metric in Metric::all() {
//!         println!("{} => {}", metric.key(), metric.label());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod table;
pub mod types;

pub use error::{LoadError, LoadResult, UnknownMetric};
pub use loader::{load, load_from_reader, parse_day_first};
pub use table::{BaseTable, TableStats};
pub use types::{AxisScale, Metric, Observation, ViewMode};
