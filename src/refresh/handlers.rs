use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{auth::jwt::AuthUser, error::AppResult, refresh::services, state::AppState};

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub count: u64,
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/refresh-coins", post(refresh_coins))
}

#[instrument(skip(state))]
pub async fn refresh_coins(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<RefreshResponse>> {
    info!(%user_id, "catalogue refresh requested");
    let count = services::refresh_catalogue(&state).await?;
    Ok(Json(RefreshResponse { count }))
}
