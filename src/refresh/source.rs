use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::{coins::repo_types::CoinRecord, collection::repo_types::Condition};

const SEED_CATALOGUE: &str = include_str!("../../data/seed_catalogue.json");

/// Mintage assumed when a source does not report one.
const DEFAULT_MINTAGE: i64 = 1_000_000;

/// Where catalogue refreshes pull their records from.
#[async_trait]
pub trait CoinSource: Send + Sync {
    fn name(&self) -> &str;
    /// Full replacement set for the catalogue.
    async fn fetch(&self) -> anyhow::Result<Vec<CoinDraft>>;
}

/// A catalogue entry as delivered by a source, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoinDraft {
    pub country: String,
    pub year: i32,
    pub description: String,
    #[serde(default = "default_mintage")]
    pub mintage: i64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub value_fdc: Option<f64>,
    #[serde(default)]
    pub value_bu: Option<f64>,
    #[serde(default)]
    pub value_be: Option<f64>,
}

fn default_mintage() -> i64 {
    DEFAULT_MINTAGE
}

impl CoinDraft {
    /// Builds a validated record; missing values are estimated from mintage.
    pub fn into_record(self) -> Result<CoinRecord, String> {
        let country = self.country.trim().to_string();
        let description = self.description.trim().to_string();
        let record = CoinRecord {
            id: CoinRecord::stable_id(&country, self.year, &description),
            value_fdc: self
                .value_fdc
                .unwrap_or_else(|| estimate_value(self.mintage, Condition::Fdc)),
            value_bu: self
                .value_bu
                .unwrap_or_else(|| estimate_value(self.mintage, Condition::Bu)),
            value_be: self
                .value_be
                .unwrap_or_else(|| estimate_value(self.mintage, Condition::Be)),
            country,
            year: self.year,
            description,
            mintage: self.mintage,
            image_url: self.image_url.trim().to_string(),
        };
        record.validate()?;
        Ok(record)
    }
}

/// Rough market value by rarity tier.
pub fn estimate_value(mintage: i64, condition: Condition) -> f64 {
    let (fdc, bu, be) = match mintage {
        m if m < 100_000 => (15.0, 30.0, 60.0),
        m if m < 500_000 => (8.0, 15.0, 30.0),
        m if m < 1_000_000 => (5.0, 10.0, 20.0),
        m if m < 5_000_000 => (4.0, 7.0, 14.0),
        _ => (3.0, 5.0, 10.0),
    };
    match condition {
        Condition::Fdc => fdc,
        Condition::Bu => bu,
        Condition::Be => be,
    }
}

/// Catalogue shipped with the binary.
#[derive(Debug, Default, Clone)]
pub struct SeedSource;

#[async_trait]
impl CoinSource for SeedSource {
    fn name(&self) -> &str {
        "seed"
    }

    async fn fetch(&self) -> anyhow::Result<Vec<CoinDraft>> {
        serde_json::from_str(SEED_CATALOGUE).context("parse embedded seed catalogue")
    }
}

/// JSON array of drafts on disk, re-read on every refresh.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CoinSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> anyhow::Result<Vec<CoinDraft>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("read catalogue source {}", self.path.display()))?;
        let drafts: Vec<CoinDraft> = serde_json::from_str(&raw)
            .with_context(|| format!("parse catalogue source {}", self.path.display()))?;
        debug!(path = %self.path.display(), count = drafts.len(), "catalogue source read");
        Ok(drafts)
    }
}
