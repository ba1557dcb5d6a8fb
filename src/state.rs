use std::sync::Arc;

use tracing::info;

use crate::coins::{memory::MemoryCatalogue, repo::CatalogueStore, repo::PgCatalogue};
use crate::collection::{memory::MemoryCollection, repo::CollectionStore, repo::PgCollection};
use crate::config::{AppConfig, StorageBackend};
use crate::db;
use crate::refresh::source::{CoinSource, FileSource, SeedSource};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalogue: Arc<dyn CatalogueStore>,
    pub collection: Arc<dyn CollectionStore>,
    pub source: Arc<dyn CoinSource>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        let (catalogue, collection) = match config.storage {
            StorageBackend::Postgres => {
                let pool = db::connect(&config).await?;
                (
                    Arc::new(PgCatalogue::new(pool.clone())) as Arc<dyn CatalogueStore>,
                    Arc::new(PgCollection::new(pool)) as Arc<dyn CollectionStore>,
                )
            }
            StorageBackend::Memory => {
                info!("using in-memory storage; data is lost on restart");
                (
                    Arc::new(MemoryCatalogue::new()) as Arc<dyn CatalogueStore>,
                    Arc::new(MemoryCollection::new()) as Arc<dyn CollectionStore>,
                )
            }
        };

        let source = match &config.catalogue_source_path {
            Some(path) => Arc::new(FileSource::new(path.clone())) as Arc<dyn CoinSource>,
            None => Arc::new(SeedSource) as Arc<dyn CoinSource>,
        };

        Ok(Self {
            config,
            catalogue,
            collection,
            source,
        })
    }

    /// In-memory state for tests.
    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::config::{AccountConfig, JwtConfig, DEFAULT_USER_ID};

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            storage: StorageBackend::Memory,
            database_url: None,
            max_connections: 1,
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
            },
            account: AccountConfig {
                user_id: DEFAULT_USER_ID,
                username: "collector".into(),
                password: "secret".into(),
            },
            catalogue_source_path: None,
            seed_on_startup: false,
        });

        Self {
            config,
            catalogue: Arc::new(MemoryCatalogue::new()),
            collection: Arc::new(MemoryCollection::new()),
            source: Arc::new(SeedSource),
        }
    }
}
