use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::chirp::models::ListChirpsQuery;
use crate::domain::chirp::models::SortDirection;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ChirpData;
use crate::inbound::http::router::AppState;

/// Query string of `GET /api/chirps`.
#[derive(Debug, Default, Deserialize)]
pub struct ListChirpsParams {
    author_id: Option<String>,
    sort: Option<String>,
}

impl ListChirpsParams {
    fn try_into_query(self) -> Result<ListChirpsQuery, ApiError> {
        let author_id = self
            .author_id
            .filter(|id| !id.is_empty())
            .map(|id| UserId::from_string(&id))
            .transpose()
            .map_err(|e| ApiError::BadRequest(format!("Invalid author_id: {e}")))?;

        let sort = match self.sort.as_deref() {
            None | Some("") | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => {
                return Err(ApiError::BadRequest(format!(
                    "Invalid sort '{other}', expected 'asc' or 'desc'"
                )))
            }
        };

        Ok(ListChirpsQuery { author_id, sort })
    }
}

pub async fn list_chirps(
    State(state): State<AppState>,
    params: Result<Query<ListChirpsParams>, QueryRejection>,
) -> Result<ApiSuccess<Vec<ChirpData>>, ApiError> {
    let Query(params) = params?;

    state
        .chirp_service
        .list_chirps(params.try_into_query()?)
        .await
        .map_err(ApiError::from)
        .map(|chirps| {
            ApiSuccess::new(
                StatusCode::OK,
                chirps.iter().map(ChirpData::from).collect(),
            )
        })
}
