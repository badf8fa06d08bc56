//! # COVID-19 Dashboard
//!
//! Loads a country-level COVID-19 dataset once and serves chart-ready series
//! filtered by country, metric and date range, as daily values or running
//! totals on a linear or log axis.
//!
//! ## Modules
//!
//! - [`data`]: CSV loading and the immutable base table
//! - [`view`]: The pure selection → series transform
//! - [`api`]: HTTP server with Axum
//! - [`websocket`]: Selection-change channel for the dashboard page
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covid_dashboard::data::{load, Metric, ViewMode};
//! use covid_dashboard::view::{render, RenderRequest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = load("owid-covid-data.csv")?;
//!     let (start, end) = table.date_bounds().ok_or("empty dataset")?;
//!
//!     let request = RenderRequest::new("India", Metric::NewCases, start, end)
//!         .view_mode(ViewMode::Cumulative)
//!         .log_scale(true);
//!     let series = render(&table, &request);
//!
//!     println!("{}: {} points", series.title, series.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod data;
pub mod view;
pub mod websocket;

// Re-export top-level types for convenience
pub use data::{
    load, AxisScale, BaseTable, LoadError, LoadResult, Metric, Observation, TableStats,
    UnknownMetric, ViewMode,
};

pub use view::{render, RenderRequest, Series, SeriesPoint};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DashboardConfig, DataConfig, LoggingConfig};

pub use websocket::{websocket_handler, ClientMessage, ServerMessage};
