//! The embedded single-page UI.

use axum::response::Html;

/// `GET /` — the analyzer page: upload and camera tabs, a preview, per-phase
/// status, and one report section per completed phase.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}
