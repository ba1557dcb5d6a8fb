use serde::{Deserialize, Serialize};

use crate::{coins::repo_types::CoinRecord, collection::repo_types::CollectionItem};

/// Body of `POST /collection/add`.
#[derive(Debug, Deserialize)]
pub struct AddToCollectionRequest {
    pub coin_id: String,
    pub condition: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A collection item resolved against the catalogue.
#[derive(Debug, Serialize)]
pub struct CollectionEntry {
    #[serde(flatten)]
    pub item: CollectionItem,
    pub coin: CoinRecord,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}
