use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::coins::{
    query::{sort_catalogue, CoinFilter},
    repo::CatalogueStore,
    repo_types::CoinRecord,
};

/// In-process catalogue, used by tests and `STORAGE_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryCatalogue {
    coins: RwLock<HashMap<Uuid, CoinRecord>>,
}

impl MemoryCatalogue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogueStore for MemoryCatalogue {
    async fn list(&self, filter: &CoinFilter) -> anyhow::Result<Vec<CoinRecord>> {
        let coins = self.coins.read().await;
        let mut out: Vec<CoinRecord> = coins.values().filter(|c| filter.matches(c)).cloned().collect();
        sort_catalogue(&mut out);
        Ok(out)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<CoinRecord>> {
        Ok(self.coins.read().await.get(&id).cloned())
    }

    async fn distinct_countries(&self) -> anyhow::Result<Vec<String>> {
        let coins = self.coins.read().await;
        let set: BTreeSet<&str> = coins.values().map(|c| c.country.as_str()).collect();
        Ok(set.into_iter().map(str::to_owned).collect())
    }

    async fn distinct_years(&self) -> anyhow::Result<Vec<i32>> {
        let coins = self.coins.read().await;
        let set: BTreeSet<i32> = coins.values().map(|c| c.year).collect();
        Ok(set.into_iter().rev().collect())
    }

    async fn count(&self) -> anyhow::Result<u64> {
        Ok(self.coins.read().await.len() as u64)
    }

    async fn replace_all(&self, records: Vec<CoinRecord>) -> anyhow::Result<u64> {
        let next: HashMap<Uuid, CoinRecord> = records.into_iter().map(|c| (c.id, c)).collect();
        let n = next.len() as u64;
        *self.coins.write().await = next;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::repo_types::fixtures::coin;

    async fn store() -> MemoryCatalogue {
        let store = MemoryCatalogue::new();
        store
            .replace_all(vec![
                coin("France", 2024, "Paris 2024", 5.0, 8.0, 15.0),
                coin("Allemagne", 2023, "Mecklembourg", 3.5, 6.0, 12.0),
                coin("France", 2023, "Louis Pasteur", 4.5, 7.5, 14.0),
                coin("Espagne", 2023, "Avila", 5.0, 9.0, 16.0),
            ])
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn facets_are_distinct_and_sorted() {
        let s = store().await;
        assert_eq!(s.distinct_countries().await.unwrap(), vec!["Allemagne", "Espagne", "France"]);
        assert_eq!(s.distinct_years().await.unwrap(), vec![2024, 2023]);
    }

    #[tokio::test]
    async fn search_is_subset_of_full_listing() {
        let s = store().await;
        let all = s.list(&CoinFilter::default()).await.unwrap();
        assert_eq!(all.len(), 4);

        let filters = [
            CoinFilter { text: Some("a".into()), ..Default::default() },
            CoinFilter { country: Some("France".into()), ..Default::default() },
            CoinFilter { year: Some(2023), ..Default::default() },
            CoinFilter { text: Some("pasteur".into()), year: Some(2023), country: Some("France".into()) },
        ];
        for f in &filters {
            let hits = s.list(f).await.unwrap();
            for h in &hits {
                assert!(all.contains(h));
                assert!(f.matches(h));
            }
        }
    }

    #[tokio::test]
    async fn listing_order_is_stable() {
        let s = store().await;
        let a = s.list(&CoinFilter::default()).await.unwrap();
        let b = s.list(&CoinFilter::default()).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].year, 2024);
    }

    #[tokio::test]
    async fn replace_all_swaps_the_whole_catalogue() {
        let s = store().await;
        let kept = coin("France", 2024, "Paris 2024", 6.0, 9.0, 16.0);
        let n = s.replace_all(vec![kept.clone()]).await.unwrap();
        assert_eq!(n, 1);
        assert_eq!(s.count().await.unwrap(), 1);
        assert_eq!(s.get(kept.id).await.unwrap().unwrap().value_fdc, 6.0);
        assert_eq!(s.distinct_countries().await.unwrap(), vec!["France"]);
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let s = store().await;
        assert!(s.get(Uuid::new_v4()).await.unwrap().is_none());
    }
}
