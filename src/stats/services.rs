use std::collections::{BTreeMap, HashSet};

use tracing::debug;
use uuid::Uuid;

use crate::{
    coins::repo_types::CoinRecord, collection::repo_types::CollectionItem,
    collection::services::list_with_coins, state::AppState, stats::dto::Stats,
};

pub async fn compute_stats(st: &AppState, owner: Uuid) -> anyhow::Result<Stats> {
    let total = st.catalogue.count().await?;
    let owned = list_with_coins(st, owner).await?;
    let stats = aggregate(total, &owned);
    debug!(%owner, owned = stats.owned_coins, total, "stats computed");
    Ok(stats)
}

/// Reduces an owner's resolved items against the catalogue size.
pub fn aggregate(total_coins: u64, owned: &[(CollectionItem, CoinRecord)]) -> Stats {
    let mut seen = HashSet::new();
    let mut by_country: BTreeMap<String, u64> = BTreeMap::new();
    let mut total_value = 0.0;

    for (item, coin) in owned {
        total_value += coin.value_for(item.condition);
        if seen.insert(coin.id) {
            *by_country.entry(coin.country.clone()).or_default() += 1;
        }
    }

    let owned_coins = seen.len() as u64;
    Stats {
        total_coins,
        owned_coins,
        completion_percentage: completion_percentage(owned_coins, total_coins),
        total_value: (total_value * 100.0).round() / 100.0,
        by_country,
    }
}

pub fn completion_percentage(owned: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    // round half up
    ((owned * 200 + total) / (2 * total)) as u32
}
