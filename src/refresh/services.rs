use std::collections::HashSet;

use anyhow::Context;
use tracing::{error, info, warn};

use crate::{coins::repo_types::CoinRecord, refresh::source::CoinDraft, state::AppState};

/// Pulls a full replacement set from the configured source and swaps it in.
///
/// Any fetch or validation failure aborts before the catalogue is touched.
pub async fn refresh_catalogue(st: &AppState) -> anyhow::Result<u64> {
    let source = st.source.name().to_string();
    info!(%source, "catalogue refresh started");

    let result = async {
        let drafts = st.source.fetch().await.context("fetch catalogue source")?;
        let records = build_records(drafts)?;
        st.catalogue
            .replace_all(records)
            .await
            .context("replace catalogue")
    }
    .await;

    match result {
        Ok(count) => {
            info!(%source, count, "catalogue refresh finished");
            Ok(count)
        }
        Err(e) => {
            error!(%source, error = %format!("{e:#}"), "catalogue refresh aborted");
            Err(e)
        }
    }
}

/// Seeds the catalogue when it is empty. Returns the number of coins loaded.
pub async fn seed_if_empty(st: &AppState) -> anyhow::Result<Option<u64>> {
    if st.catalogue.count().await? > 0 {
        return Ok(None);
    }
    info!("catalogue is empty, seeding");
    refresh_catalogue(st).await.map(Some)
}

/// Validates every draft. Repeated coins keep their first occurrence.
pub fn build_records(drafts: Vec<CoinDraft>) -> anyhow::Result<Vec<CoinRecord>> {
    anyhow::ensure!(!drafts.is_empty(), "catalogue source returned no coins");

    let mut seen = HashSet::with_capacity(drafts.len());
    let mut records = Vec::with_capacity(drafts.len());
    for (idx, draft) in drafts.into_iter().enumerate() {
        let label = format!("{} {} {:?}", draft.country, draft.year, draft.description);
        let record = draft
            .into_record()
            .map_err(|e| anyhow::anyhow!("entry #{idx} ({label}): {e}"))?;
        if !seen.insert(record.id) {
            warn!(entry = idx, coin = %label, "duplicate catalogue entry skipped");
            continue;
        }
        records.push(record);
    }
    Ok(records)
}
