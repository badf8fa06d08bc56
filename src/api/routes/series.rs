//! Series Routes
//!
//! Runs the view transform for one dashboard selection.
//!
//! - GET /api/v1/series - Render a series (JSON or CSV)

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{FormatParams, SelectionDto};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::view::{render, Series};

/// GET /api/v1/series
///
/// Query parameters: `country`, `metric`, `start_date`, `end_date`,
/// `log_scale`, `view`, `format`. An empty selection is a 200 with no points.
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Query(selection): Query<SelectionDto>,
    Query(params): Query<FormatParams>,
) -> ApiResult<Response> {
    let request = selection.resolve(&state)?;
    let series = render(&state.table, &request);

    match params.format.to_lowercase().as_str() {
        "json" => Ok((StatusCode::OK, Json(series)).into_response()),
        "csv" => format_csv_response(&series),
        other => Err(ApiError::Validation(format!(
            "Invalid format: {}. Use json or csv",
            other
        ))),
    }
}

/// Format response as CSV
fn format_csv_response(series: &Series) -> ApiResult<Response> {
    let body = series
        .to_csv()
        .map_err(|e| ApiError::Internal(format!("CSV encoding failed: {}", e)))?;

    let disposition = format!(
        "attachment; filename=\"{}_{}.csv\"",
        series.metric,
        series.country.replace(|c: char| !c.is_ascii_alphanumeric(), "_")
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
