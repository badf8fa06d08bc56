//! Application State
//!
//! Shared state accessible by all handlers. The base table is loaded once
//! before the server starts and only ever read afterwards, so it is shared
//! through an `Arc` without any locking.

use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{ApiConfig, DashboardConfig};
use crate::data::BaseTable;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable base table
    pub table: Arc<BaseTable>,
    /// Initial selection settings
    pub dashboard: Arc<DashboardConfig>,
    /// Server settings
    pub api: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(table: BaseTable, dashboard: DashboardConfig, api: ApiConfig) -> Self {
        Self {
            table: Arc::new(table),
            dashboard: Arc::new(dashboard),
            api: Arc::new(api),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Configured default country if present in the table, else the first one
    pub fn default_country(&self) -> String {
        let configured = &self.dashboard.default_country;
        if self.table.has_country(configured) {
            return configured.clone();
        }
        self.table
            .countries()
            .first()
            .cloned()
            .unwrap_or_else(|| configured.clone())
    }

    /// Full date range of the table; unbounded for an empty table
    pub fn default_range(&self) -> (NaiveDate, NaiveDate) {
        self.table
            .date_bounds()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX))
    }
}
