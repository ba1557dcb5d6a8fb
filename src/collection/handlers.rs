use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{dto::OwnerParam, jwt::AuthUser},
    collection::{
        dto::{ActionResponse, AddToCollectionRequest, CollectionEntry},
        repo_types::CollectionItem,
        services,
    },
    error::AppResult,
    extract::{AppJson, AppQuery},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/collection", get(list_collection))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/collection/add", post(add_to_collection))
        .route("/collection/:id", delete(remove_from_collection))
}

#[instrument(skip(state))]
pub async fn list_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(param): AppQuery<OwnerParam>,
) -> AppResult<Json<Vec<CollectionEntry>>> {
    let owner = auth.owner(&param)?;
    let entries = services::list_with_coins(&state, owner)
        .await?
        .into_iter()
        .map(|(item, coin)| CollectionEntry { item, coin })
        .collect();
    Ok(Json(entries))
}

#[instrument(skip(state, body))]
pub async fn add_to_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(param): AppQuery<OwnerParam>,
    AppJson(body): AppJson<AddToCollectionRequest>,
) -> AppResult<(StatusCode, Json<CollectionItem>)> {
    let owner = auth.owner(&param)?;
    let item =
        services::add_to_collection(&state, owner, &body.coin_id, &body.condition, body.notes).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state))]
pub async fn remove_from_collection(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    AppQuery(param): AppQuery<OwnerParam>,
) -> AppResult<Json<ActionResponse>> {
    let owner = auth.owner(&param)?;
    services::remove_from_collection(&state, owner, &id).await?;
    Ok(Json(ActionResponse {
        success: true,
        message: "Coin removed from collection".into(),
    }))
}
