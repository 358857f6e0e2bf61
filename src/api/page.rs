//! The web form

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET / - Prompt form with text and image output regions
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
