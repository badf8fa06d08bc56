//! Dashboard HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Single-page dashboard
//!
//! ## Data
//! - `GET /api/v1/options` - Countries, metric catalog, date bounds, defaults
//! - `GET /api/v1/series` - Render a series for a selection (json or csv)
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Selection-change channel
//!
//! # Example
//!
//! ```rust,ignore
//! use covid_dashboard::api::{serve, AppState};
//! use covid_dashboard::config::Config;
//! use covid_dashboard::data::load;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (config, _) = Config::load_default();
//!     let table = load(&config.data.path)?;
//!
//!     let state = AppState::new(table, config.dashboard, config.api);
//!     serve(state).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::websocket::websocket_handler;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/options", get(routes::options::get_options))
        .route("/series", get(routes::series::get_series));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.api.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::index))
        .route("/ws", get(websocket_handler))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Any origin when none are configured, otherwise only the listed ones
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET])
}

/// Start the dashboard server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.api.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, DashboardConfig};
    use crate::data::load_from_reader;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::util::ServiceExt;

    const CSV: &str = "\
iso_code,continent,location,date,total_cases,new_cases,total_deaths,new_deaths,people_vaccinated,people_fully_vaccinated
IND,Asia,India,01/03/2020,1,1,0,0,,
IND,Asia,India,02/03/2020,3,2,0,,,
IND,Asia,India,03/03/2020,6,3,1,1,,
OWID_WRL,,World,01/03/2020,90000,1500,3000,70,,
BRA,South America,Brazil,02/03/2020,1,1,0,0,,
";

    fn create_test_app() -> Router {
        let table = load_from_reader(CSV.as_bytes()).unwrap();
        let state = AppState::new(table, DashboardConfig::default(), ApiConfig::default());
        build_router(state)
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(create_test_app(), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = get(create_test_app(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get(create_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["table"]["rows"], 4);
        assert_eq!(json["table"]["dropped_aggregates"], 1);
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = get(create_test_app(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_options() {
        let response = get(create_test_app(), "/api/v1/options").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["countries"], serde_json::json!(["Brazil", "India"]));
        assert_eq!(json["metrics"][0]["key"], "new_cases");
        assert_eq!(json["metrics"][5]["label"], "Fully Vaccinated");
        assert_eq!(json["date_bounds"]["start"], "2020-03-01");
        assert_eq!(json["date_bounds"]["end"], "2020-03-03");
        assert_eq!(json["defaults"]["country"], "India");
        assert_eq!(json["defaults"]["view"], "daily");
    }

    #[tokio::test]
    async fn test_series_defaults() {
        let response = get(create_test_app(), "/api/v1/series").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["title"], "New Cases in India");
        assert_eq!(json["y_axis"], "linear");
        assert_eq!(json["points"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_series_cumulative_log() {
        let response = get(
            create_test_app(),
            "/api/v1/series?country=India&metric=new_deaths&view=cumulative&log_scale=true",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["title"], "New Deaths in India");
        assert_eq!(json["y_axis"], "log");
        let values: Vec<f64> = json["points"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["value"].as_f64().unwrap())
            .collect();
        assert_eq!(values, vec![0.0, 0.0, 1.0]);
    }

    #[tokio::test]
    async fn test_series_inverted_range_is_empty() {
        let response = get(
            create_test_app(),
            "/api/v1/series?country=India&start_date=2020-03-03&end_date=2020-03-01",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(json["points"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_series_unknown_metric() {
        let response = get(create_test_app(), "/api/v1/series?metric=icu_patients").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(json["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_series_csv() {
        let response = get(
            create_test_app(),
            "/api/v1/series?country=India&metric=new_deaths&format=csv",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            "date,new_deaths\n2020-03-01,0\n2020-03-02,\n2020-03-03,1\n"
        );
    }

    #[tokio::test]
    async fn test_series_invalid_format() {
        let response = get(create_test_app(), "/api/v1/series?format=xml").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
