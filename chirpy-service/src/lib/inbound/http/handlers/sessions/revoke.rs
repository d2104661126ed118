use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = auth::extract_bearer(&headers).map_err(|e| {
        tracing::warn!(error = %e, "Rejected Authorization header");
        ApiError::unauthorized()
    })?;

    state.session_service.revoke(refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}
