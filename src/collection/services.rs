use std::collections::HashMap;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    coins::{query::CoinFilter, repo_types::CoinRecord},
    collection::{
        repo::StoreError,
        repo_types::{CollectionItem, Condition},
    },
    error::{AppError, AppResult},
    state::AppState,
};

/// Adds a catalogue coin to the owner's collection.
///
/// The coin is resolved before the condition is looked at, so an unknown
/// coin is always reported as not found.
pub async fn add_to_collection(
    st: &AppState,
    owner: Uuid,
    coin_id: &str,
    condition: &str,
    notes: Option<String>,
) -> AppResult<CollectionItem> {
    let coin = match coin_id.trim().parse::<Uuid>() {
        Ok(id) => st.catalogue.get(id).await?,
        Err(_) => None,
    };
    let Some(coin) = coin else {
        warn!(%owner, coin_id, "add to collection: unknown coin");
        return Err(AppError::NotFound("Coin not found".into()));
    };

    let condition: Condition = condition.parse().map_err(AppError::InvalidArgument)?;
    let notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

    match st
        .collection
        .insert(CollectionItem::new(owner, coin.id, condition, notes))
        .await
    {
        Ok(item) => {
            info!(%owner, coin_id = %coin.id, item_id = %item.id, %condition, "coin added to collection");
            Ok(item)
        }
        Err(StoreError::Duplicate { coin_id }) => {
            warn!(%owner, %coin_id, "coin already in collection");
            Err(AppError::DuplicateEntry("Coin already in collection".into()))
        }
        Err(StoreError::Other(e)) => Err(AppError::Internal(e)),
    }
}

pub async fn remove_from_collection(st: &AppState, owner: Uuid, item_id: &str) -> AppResult<()> {
    let removed = match item_id.trim().parse::<Uuid>() {
        Ok(id) => st.collection.delete(owner, id).await?,
        Err(_) => false,
    };
    if !removed {
        warn!(%owner, item_id, "remove from collection: item not found");
        return Err(AppError::NotFound("Item not found".into()));
    }
    info!(%owner, item_id, "coin removed from collection");
    Ok(())
}

/// Owner's items joined with their catalogue coins.
///
/// Items whose coin has disappeared from the catalogue are logged and skipped.
pub async fn list_with_coins(
    st: &AppState,
    owner: Uuid,
) -> anyhow::Result<Vec<(CollectionItem, CoinRecord)>> {
    let items = st.collection.list_by_owner(owner).await?;
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let mut coins: HashMap<Uuid, CoinRecord> = st
        .catalogue
        .list(&CoinFilter::default())
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        // a coin is referenced at most once per owner, so it can be moved out
        match coins.remove(&item.coin_id) {
            Some(coin) => out.push((item, coin)),
            None => warn!(
                %owner,
                item_id = %item.id,
                coin_id = %item.coin_id,
                "data integrity: collection item references a missing coin, skipping"
            ),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::repo_types::fixtures::coin;

    async fn seeded() -> (AppState, Vec<CoinRecord>) {
        let st = AppState::fake();
        let coins = vec![
            coin("France", 2024, "Paris 2024", 5.0, 8.0, 15.0),
            coin("Italie", 2024, "Marconi", 10.0, 12.0, 20.0),
            coin("Espagne", 2023, "Avila", 15.0, 18.0, 30.0),
        ];
        st.catalogue.replace_all(coins.clone()).await.unwrap();
        (st, coins)
    }

    #[tokio::test]
    async fn add_then_list_contains_item_once() {
        let (st, coins) = seeded().await;
        let owner = Uuid::new_v4();
        let item = add_to_collection(&st, owner, &coins[0].id.to_string(), "fdc", Some("  gift ".into()))
            .await
            .unwrap();
        assert_eq!(item.condition, Condition::Fdc);
        assert_eq!(item.notes.as_deref(), Some("gift"));

        let listed = list_with_coins(&st, owner).await.unwrap();
        assert_eq!(listed.iter().filter(|(i, _)| i.id == item.id).count(), 1);
        assert_eq!(listed[0].1, coins[0]);
    }

    #[tokio::test]
    async fn duplicate_add_fails_and_leaves_store_unchanged() {
        let (st, coins) = seeded().await;
        let owner = Uuid::new_v4();
        let id = coins[1].id.to_string();
        add_to_collection(&st, owner, &id, "BU", None).await.unwrap();
        let before = st.collection.list_by_owner(owner).await.unwrap();

        let err = add_to_collection(&st, owner, &id, "BE", None).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateEntry(_)));
        assert_eq!(st.collection.list_by_owner(owner).await.unwrap(), before);
    }

    #[tokio::test]
    async fn unknown_coin_is_not_found_whatever_the_condition() {
        let (st, _) = seeded().await;
        let owner = Uuid::new_v4();
        for condition in ["FDC", "nonsense", ""] {
            let err = add_to_collection(&st, owner, "nonexistent", condition, None)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
            let err = add_to_collection(&st, owner, &Uuid::new_v4().to_string(), condition, None)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
        }
    }

    #[tokio::test]
    async fn bad_condition_is_invalid_argument() {
        let (st, coins) = seeded().await;
        let owner = Uuid::new_v4();
        let err = add_to_collection(&st, owner, &coins[0].id.to_string(), "UNC", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
        assert!(st.collection.list_by_owner(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn removing_missing_item_is_not_found_and_keeps_rows() {
        let (st, coins) = seeded().await;
        let owner = Uuid::new_v4();
        let item = add_to_collection(&st, owner, &coins[0].id.to_string(), "FDC", None)
            .await
            .unwrap();

        for bogus in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
            let err = remove_from_collection(&st, owner, &bogus).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
        }
        // someone else's item
        let err = remove_from_collection(&st, Uuid::new_v4(), &item.id.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(st.collection.list_by_owner(owner).await.unwrap().len(), 1);

        remove_from_collection(&st, owner, &item.id.to_string()).await.unwrap();
        assert!(st.collection.list_by_owner(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orphaned_items_are_skipped() {
        let (st, coins) = seeded().await;
        let owner = Uuid::new_v4();
        for c in &coins[..2] {
            add_to_collection(&st, owner, &c.id.to_string(), "FDC", None).await.unwrap();
        }
        // refresh drops the first coin
        st.catalogue.replace_all(coins[1..].to_vec()).await.unwrap();

        let listed = list_with_coins(&st, owner).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].1.id, coins[1].id);
        assert_eq!(st.collection.list_by_owner(owner).await.unwrap().len(), 2);
    }
}
