use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Readiness probe.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "OK",
    )
}
