use std::collections::HashSet;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::coins::{query::CoinFilter, repo_types::CoinRecord};

/// Reference catalogue of coins.
///
/// Read-only for end users; `replace_all` is the refresh job's single
/// write path and must be all-or-nothing.
#[async_trait]
pub trait CatalogueStore: Send + Sync {
    async fn list(&self, filter: &CoinFilter) -> anyhow::Result<Vec<CoinRecord>>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<CoinRecord>>;
    /// Sorted ascending.
    async fn distinct_countries(&self) -> anyhow::Result<Vec<String>>;
    /// Sorted newest first.
    async fn distinct_years(&self) -> anyhow::Result<Vec<i32>>;
    async fn count(&self) -> anyhow::Result<u64>;
    /// Replaces the whole catalogue and returns the number of coins stored.
    async fn replace_all(&self, records: Vec<CoinRecord>) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgCatalogue {
    db: PgPool,
}

impl PgCatalogue {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogueStore for PgCatalogue {
    async fn list(&self, filter: &CoinFilter) -> anyhow::Result<Vec<CoinRecord>> {
        let rows = sqlx::query_as::<_, CoinRecord>(
            r#"
            SELECT id, country, year, description, mintage, image_url,
                   value_fdc, value_bu, value_be
              FROM coins
             WHERE ($1::text IS NULL
                    OR strpos(lower(description), lower($1)) > 0
                    OR strpos(lower(country), lower($1)) > 0)
               AND ($2::text IS NULL OR country = $2)
               AND ($3::int4 IS NULL OR year = $3)
             ORDER BY year DESC, country ASC, description ASC, id ASC
            "#,
        )
        .bind(filter.text.as_deref())
        .bind(filter.country.as_deref())
        .bind(filter.year)
        .fetch_all(&self.db)
        .await
        .context("list coins")?;
        debug!(count = rows.len(), "coins listed");
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<CoinRecord>> {
        let coin = sqlx::query_as::<_, CoinRecord>(
            r#"
            SELECT id, country, year, description, mintage, image_url,
                   value_fdc, value_bu, value_be
              FROM coins
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get coin")?;
        Ok(coin)
    }

    async fn distinct_countries(&self) -> anyhow::Result<Vec<String>> {
        let rows = sqlx::query_scalar::<_, String>(
            r#"SELECT DISTINCT country FROM coins ORDER BY country ASC"#,
        )
        .fetch_all(&self.db)
        .await
        .context("list countries")?;
        Ok(rows)
    }

    async fn distinct_years(&self) -> anyhow::Result<Vec<i32>> {
        let rows = sqlx::query_scalar::<_, i32>(
            r#"SELECT DISTINCT year FROM coins ORDER BY year DESC"#,
        )
        .fetch_all(&self.db)
        .await
        .context("list years")?;
        Ok(rows)
    }

    async fn count(&self) -> anyhow::Result<u64> {
        let n = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM coins"#)
            .fetch_one(&self.db)
            .await
            .context("count coins")?;
        Ok(n.max(0) as u64)
    }

    async fn replace_all(&self, records: Vec<CoinRecord>) -> anyhow::Result<u64> {
        let mut tx = self.db.begin().await.context("begin tx")?;

        for c in &records {
            sqlx::query(
                r#"
                INSERT INTO coins (id, country, year, description, mintage, image_url,
                                   value_fdc, value_bu, value_be)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (id) DO UPDATE
                   SET country = EXCLUDED.country,
                       year = EXCLUDED.year,
                       description = EXCLUDED.description,
                       mintage = EXCLUDED.mintage,
                       image_url = EXCLUDED.image_url,
                       value_fdc = EXCLUDED.value_fdc,
                       value_bu = EXCLUDED.value_bu,
                       value_be = EXCLUDED.value_be
                "#,
            )
            .bind(c.id)
            .bind(&c.country)
            .bind(c.year)
            .bind(&c.description)
            .bind(c.mintage)
            .bind(&c.image_url)
            .bind(c.value_fdc)
            .bind(c.value_bu)
            .bind(c.value_be)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("upsert coin {}", c.id))?;
        }

        let ids: Vec<Uuid> = records
            .iter()
            .map(|c| c.id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let removed = sqlx::query(r#"DELETE FROM coins WHERE NOT (id = ANY($1))"#)
            .bind(&ids[..])
            .execute(&mut *tx)
            .await
            .context("delete stale coins")?
            .rows_affected();

        tx.commit().await.context("commit tx")?;

        info!(stored = ids.len(), removed, "catalogue replaced");
        Ok(ids.len() as u64)
    }
}
