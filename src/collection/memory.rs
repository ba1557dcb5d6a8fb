use std::cmp::Reverse;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::collection::{
    repo::{CollectionStore, StoreError},
    repo_types::CollectionItem,
};

#[derive(Default)]
pub struct MemoryCollection {
    items: RwLock<Vec<CollectionItem>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for MemoryCollection {
    async fn insert(&self, item: CollectionItem) -> Result<CollectionItem, StoreError> {
        let mut items = self.items.write().await;
        if items
            .iter()
            .any(|i| i.user_id == item.user_id && i.coin_id == item.coin_id)
        {
            return Err(StoreError::Duplicate { coin_id: item.coin_id });
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn delete(&self, user_id: Uuid, item_id: Uuid) -> anyhow::Result<bool> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| !(i.id == item_id && i.user_id == user_id));
        Ok(items.len() < before)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> anyhow::Result<Vec<CollectionItem>> {
        let items = self.items.read().await;
        let mut out: Vec<CollectionItem> = items.iter().filter(|i| i.user_id == user_id).cloned().collect();
        out.sort_by_key(|i| (Reverse(i.added_date), i.id));
        Ok(out)
    }
}
