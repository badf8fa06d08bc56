//! Dashboard Page
//!
//! - GET / - Single-page dashboard (controls + chart)
//!
//! The page only draws; every selection change goes back to the server,
//! which runs the view transform and returns the series.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
