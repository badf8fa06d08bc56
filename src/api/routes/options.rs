//! Options Routes
//!
//! Values for the dashboard selectors, derived once from the base table.
//!
//! - GET /api/v1/options - Countries, metrics, date bounds and defaults

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{DateBoundsDto, DefaultsDto, MetricOption, OptionsResponse};
use crate::api::state::AppState;
use crate::data::{Metric, ViewMode};

/// GET /api/v1/options
pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    Json(build_options(&state))
}

fn build_options(state: &AppState) -> OptionsResponse {
    let bounds = state.table.date_bounds();

    let metrics = Metric::all()
        .iter()
        .map(|m| MetricOption {
            key: *m,
            label: m.label().to_string(),
        })
        .collect();

    OptionsResponse {
        countries: state.table.countries().to_vec(),
        metrics,
        date_bounds: bounds.map(|(start, end)| DateBoundsDto { start, end }),
        defaults: DefaultsDto {
            country: state.default_country(),
            metric: state.dashboard.default_metric,
            start_date: bounds.map(|(start, _)| start),
            end_date: bounds.map(|(_, end)| end),
            log_scale: false,
            view: ViewMode::Daily,
        },
    }
}
