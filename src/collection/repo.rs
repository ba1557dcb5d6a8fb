use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::collection::repo_types::{CollectionItem, CollectionRow};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("coin {coin_id} is already in the collection")]
    Duplicate { coin_id: Uuid },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Per-user owned items. At most one item per `(user_id, coin_id)`.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Atomic check-and-insert on `(user_id, coin_id)`.
    async fn insert(&self, item: CollectionItem) -> Result<CollectionItem, StoreError>;
    /// Returns false when the item does not exist or belongs to someone else.
    async fn delete(&self, user_id: Uuid, item_id: Uuid) -> anyhow::Result<bool>;
    /// Newest first.
    async fn list_by_owner(&self, user_id: Uuid) -> anyhow::Result<Vec<CollectionItem>>;
}

#[derive(Clone)]
pub struct PgCollection {
    db: PgPool,
}

impl PgCollection {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CollectionStore for PgCollection {
    async fn insert(&self, item: CollectionItem) -> Result<CollectionItem, StoreError> {
        let row = sqlx::query_as::<_, CollectionRow>(
            r#"
            INSERT INTO collection_items (id, user_id, coin_id, condition, notes, added_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, coin_id) DO NOTHING
            RETURNING id, user_id, coin_id, condition, notes, added_date
            "#,
        )
        .bind(item.id)
        .bind(item.user_id)
        .bind(item.coin_id)
        .bind(item.condition.as_str())
        .bind(item.notes.as_deref())
        .bind(item.added_date)
        .fetch_optional(&self.db)
        .await
        .context("insert collection item")?;

        match row {
            Some(r) => Ok(CollectionItem::try_from(r)?),
            None => Err(StoreError::Duplicate { coin_id: item.coin_id }),
        }
    }

    async fn delete(&self, user_id: Uuid, item_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM collection_items WHERE id = $1 AND user_id = $2"#)
            .bind(item_id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .context("delete collection item")?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> anyhow::Result<Vec<CollectionItem>> {
        let rows = sqlx::query_as::<_, CollectionRow>(
            r#"
            SELECT id, user_id, coin_id, condition, notes, added_date
              FROM collection_items
             WHERE user_id = $1
             ORDER BY added_date DESC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list collection items")?;

        rows.into_iter().map(CollectionItem::try_from).collect()
    }
}
