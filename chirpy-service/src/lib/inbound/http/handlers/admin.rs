use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;

use super::ApiError;
use crate::inbound::http::router::AppState;

pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>"#,
        state.metrics.fileserver_hits()
    ))
}

/// Clear the hit counter and every user. Only available on the `dev` platform.
pub async fn reset(State(state): State<AppState>) -> Result<Response, ApiError> {
    if !state.platform.is_dev() {
        tracing::warn!("Reset refused outside dev platform");
        return Ok((
            StatusCode::FORBIDDEN,
            "Reset is only allowed in dev environment",
        )
            .into_response());
    }

    state.user_service.reset().await?;
    state.metrics.reset();

    Ok(Html(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been reset to 0</p>
  </body>
</html>"#,
    )
    .into_response())
}
