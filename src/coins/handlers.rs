use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::{
    coins::{dto::CoinQuery, query::CoinFilter, repo_types::CoinRecord},
    error::{AppError, AppResult},
    extract::AppQuery,
    state::AppState,
};

pub fn catalogue_routes() -> Router<AppState> {
    Router::new()
        .route("/coins", get(list_coins))
        .route("/coins/:id", get(get_coin))
}

pub fn facet_routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(list_countries))
        .route("/years", get(list_years))
}

#[instrument(skip(state))]
pub async fn list_coins(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<CoinQuery>,
) -> AppResult<Json<Vec<CoinRecord>>> {
    let filter = CoinFilter::try_from(q)?;
    let coins = state.catalogue.list(&filter).await?;
    debug!(filtered = !filter.is_empty(), count = coins.len(), "catalogue listed");
    Ok(Json(coins))
}

#[instrument(skip(state))]
pub async fn get_coin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CoinRecord>> {
    let Ok(coin_id) = id.parse::<Uuid>() else {
        warn!(%id, "malformed coin id");
        return Err(AppError::NotFound("Coin not found".into()));
    };
    state
        .catalogue
        .get(coin_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Coin not found".into()))
}

#[instrument(skip(state))]
pub async fn list_countries(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.catalogue.distinct_countries().await?))
}

#[instrument(skip(state))]
pub async fn list_years(State(state): State<AppState>) -> AppResult<Json<Vec<i32>>> {
    Ok(Json(state.catalogue.distinct_years().await?))
}
