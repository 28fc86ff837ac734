use crate::application::ports::{LocalCacheStore, ReadyFlagStore, RemoteApi};
use crate::application::services::{
    HydrationSource, LiveQueryService, MutationService, SyncService,
};
use crate::domain::entities::Dataset;
use crate::infrastructure::cache::SqliteCacheStore;
use crate::infrastructure::database::{Database, DbPool};
use crate::infrastructure::remote::HttpRemoteApi;
use crate::infrastructure::storage::FileReadyFlag;
use crate::shared::config::AppConfig;
use crate::shared::error::{AppError, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// The assembled local-first stack: one per client session, never torn
/// down, injected rather than reached for as a global so tests can
/// substitute any port.
pub struct SyncStack {
    config: AppConfig,
    pool: DbPool,
    cache: Arc<dyn LocalCacheStore>,
    remote: Arc<dyn RemoteApi>,
    sync: Arc<SyncService>,
    mutations: Arc<MutationService>,
    queries: Arc<LiveQueryService>,
}

impl SyncStack {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let remote: Arc<dyn RemoteApi> = Arc::new(HttpRemoteApi::new(&config.remote)?);
        Self::with_remote(config, remote).await
    }

    /// Same wiring with a substituted remote; the seam tests use.
    pub async fn with_remote(config: AppConfig, remote: Arc<dyn RemoteApi>) -> Result<Self> {
        config.validate().map_err(AppError::ConfigurationError)?;

        let pool = Database::initialize(&config.database).await?;
        let cache: Arc<dyn LocalCacheStore> = Arc::new(SqliteCacheStore::new(pool.clone()));
        let ready_flag: Arc<dyn ReadyFlagStore> =
            Arc::new(FileReadyFlag::new(Path::new(&config.storage.data_dir)));

        let sync = Arc::new(SyncService::new(
            Arc::clone(&cache),
            Arc::clone(&remote),
            ready_flag,
        ));
        let mutations = Arc::new(MutationService::new(
            Arc::clone(&cache),
            Arc::clone(&remote),
        ));
        let queries = Arc::new(LiveQueryService::new(Arc::clone(&cache)));

        Ok(Self {
            config,
            pool,
            cache,
            remote,
            sync,
            mutations,
            queries,
        })
    }

    /// Hydrates and, when configured, starts the background sync loop.
    pub async fn start(&self, initial: Option<Vec<Dataset>>) -> Result<HydrationSource> {
        let source = self.sync.hydrate(initial).await?;
        info!("Hydration complete via {:?}", source);
        if self.config.sync.auto_sync {
            // Detached on purpose; it lives as long as the process.
            let _ = self.sync.spawn_background(self.config.sync.sync_interval);
        }
        Ok(source)
    }

    pub fn sync(&self) -> &Arc<SyncService> {
        &self.sync
    }

    pub fn mutations(&self) -> &Arc<MutationService> {
        &self.mutations
    }

    pub fn queries(&self) -> &Arc<LiveQueryService> {
        &self.queries
    }

    pub fn cache(&self) -> &Arc<dyn LocalCacheStore> {
        &self.cache
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Connectivity probe against the remote.
    pub async fn hello_roundtrip(&self, name: Option<&str>) -> Result<String> {
        self.remote.hello(name).await
    }
}
