use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{dto::OwnerParam, jwt::AuthUser},
    error::AppResult,
    extract::AppQuery,
    state::AppState,
    stats::{dto::Stats, services::compute_stats},
};

pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/collection/stats", get(get_stats))
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(param): AppQuery<OwnerParam>,
) -> AppResult<Json<Stats>> {
    let owner = auth.owner(&param)?;
    Ok(Json(compute_stats(&state, owner).await?))
}
