//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::data::{parse_day_first, Metric, TableStats, ViewMode};
use crate::view::RenderRequest;

// ============================================
// SELECTION DTOs
// ============================================

/// Dashboard control values as sent by a client
///
/// Every field is optional; missing ones fall back to the configured
/// defaults and the table's date bounds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionDto {
    #[serde(default)]
    pub country: Option<String>,
    /// Metric key, e.g. "new_cases"
    #[serde(default)]
    pub metric: Option<String>,
    /// ISO or day-first date
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub log_scale: Option<bool>,
    /// "daily" or "cumulative"
    #[serde(default)]
    pub view: Option<String>,
}

impl SelectionDto {
    /// Resolve into a render request, filling gaps from the app defaults
    pub fn resolve(&self, state: &AppState) -> ApiResult<RenderRequest> {
        let country = match self.country.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => state.default_country(),
        };

        let metric = match self.metric.as_deref() {
            Some(key) => key.parse::<Metric>()?,
            None => state.dashboard.default_metric,
        };

        let (min, max) = state.default_range();
        let start_date = match self.start_date.as_deref() {
            Some(s) => parse_date(s)?,
            None => min,
        };
        let end_date = match self.end_date.as_deref() {
            Some(s) => parse_date(s)?,
            None => max,
        };

        let view_mode = match self.view.as_deref() {
            Some(v) => v.parse::<ViewMode>().map_err(ApiError::Validation)?,
            None => ViewMode::Daily,
        };

        Ok(RenderRequest::new(country, metric, start_date, end_date)
            .log_scale(self.log_scale.unwrap_or(false))
            .view_mode(view_mode))
    }
}

/// Output format for the series endpoint
#[derive(Debug, Deserialize)]
pub struct FormatParams {
    /// Output format: json, csv
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "json".to_string()
}

/// Parse a date control value; date pickers may append a time part
fn parse_date(s: &str) -> ApiResult<NaiveDate> {
    let trimmed = s.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);

    parse_day_first(date_part)
        .ok_or_else(|| ApiError::Validation(format!("Cannot parse date: {}", s)))
}

// ============================================
// OPTIONS DTOs
// ============================================

/// One entry of the metric selector
#[derive(Debug, Serialize)]
pub struct MetricOption {
    pub key: Metric,
    pub label: String,
}

/// Date range of the dataset
#[derive(Debug, Serialize)]
pub struct DateBoundsDto {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Selection shown on first load
#[derive(Debug, Serialize)]
pub struct DefaultsDto {
    pub country: String,
    pub metric: Metric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub log_scale: bool,
    pub view: ViewMode,
}

/// Everything needed to populate the dashboard controls
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub countries: Vec<String>,
    pub metrics: Vec<MetricOption>,
    pub date_bounds: Option<DateBoundsDto>,
    pub defaults: DefaultsDto,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Base table summary
    pub table: TableStats,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}
