use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

const USER_UPGRADED: &str = "user.upgraded";

#[derive(Debug, Clone, Deserialize)]
pub struct PolkaWebhookRequest {
    event: String,
    data: PolkaWebhookData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolkaWebhookData {
    user_id: String,
}

/// Payment provider callback. Only `user.upgraded` has an effect.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<PolkaWebhookRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let api_key = auth::extract_api_key(&headers).map_err(|e| {
        tracing::warn!(error = %e, "Rejected webhook Authorization header");
        ApiError::unauthorized()
    })?;

    if api_key != state.polka_api_key.as_ref() {
        tracing::warn!("Webhook called with wrong API key");
        return Err(ApiError::unauthorized());
    }

    let Json(body) = body?;

    if body.event != USER_UPGRADED {
        tracing::debug!(event = %body.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = UserId::from_string(&body.data.user_id).map_err(UserError::from)?;

    state.user_service.upgrade_user(&user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
