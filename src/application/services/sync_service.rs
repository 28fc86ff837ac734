use crate::application::ports::cache_store::LocalCacheStore;
use crate::application::ports::ready_flag::ReadyFlagStore;
use crate::application::ports::remote_api::RemoteApi;
use crate::domain::entities::Dataset;
use crate::shared::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Which source satisfied hydration for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    /// A server-rendered payload was written straight into the cache.
    ServerRender,
    /// Cold start: a blocking remote fetch filled the cache.
    RemoteFetch,
    /// The durable ready flag was set; rendered straight from the cache.
    LocalCache,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SyncStatus {
    pub is_syncing: bool,
    pub last_sync: Option<i64>,
    pub sync_errors: u32,
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self {
            is_syncing: false,
            last_sync: None,
            sync_errors: 0,
        }
    }
}

/// Coordinates hydration, background refresh and the durable ready flag.
///
/// Background replaces and user mutations are deliberately not serialized
/// against each other: the last write to the cache wins. That window is the
/// documented price of favoring availability over strict ordering.
pub struct SyncService {
    cache: Arc<dyn LocalCacheStore>,
    remote: Arc<dyn RemoteApi>,
    ready_flag: Arc<dyn ReadyFlagStore>,
    status: Arc<RwLock<SyncStatus>>,
}

impl SyncService {
    pub fn new(
        cache: Arc<dyn LocalCacheStore>,
        remote: Arc<dyn RemoteApi>,
        ready_flag: Arc<dyn ReadyFlagStore>,
    ) -> Self {
        Self {
            cache,
            remote,
            ready_flag,
            status: Arc::new(RwLock::new(SyncStatus::default())),
        }
    }

    /// Brings the cache to a renderable state. A blocking remote fetch
    /// happens only on a true cold start: no initial payload, ready flag
    /// unset, cache empty.
    pub async fn hydrate(
        &self,
        initial: Option<Vec<Dataset>>,
    ) -> Result<HydrationSource, AppError> {
        if let Some(datasets) = initial.filter(|d| !d.is_empty()) {
            self.cache.replace_all(datasets).await?;
            self.mark_ready().await;
            info!("Hydrated from server-rendered payload");
            return Ok(HydrationSource::ServerRender);
        }

        if self.is_ready().await {
            debug!("Ready flag set, rendering from local cache");
            return Ok(HydrationSource::LocalCache);
        }

        if self.cache.dataset_count().await? > 0 {
            // The flag got lost but the cache has data; treat as warm.
            self.mark_ready().await;
            return Ok(HydrationSource::LocalCache);
        }

        let datasets = self.remote.get_datasets().await?;
        self.cache.replace_all(datasets).await?;
        self.mark_ready().await;
        info!("Hydrated from remote fetch");
        Ok(HydrationSource::RemoteFetch)
    }

    /// One background refresh pass: fetch the authoritative snapshot and
    /// bulk-replace the cache. A failure leaves the cache untouched; the
    /// next pass is the retry.
    pub async fn sync_once(&self) -> Result<usize, AppError> {
        {
            let mut status = self.status.write().await;
            if status.is_syncing {
                debug!("Sync already in flight, skipping");
                return Ok(0);
            }
            status.is_syncing = true;
        }

        let outcome = self.refresh_from_remote().await;

        let mut status = self.status.write().await;
        status.is_syncing = false;
        match outcome {
            Ok(count) => {
                status.last_sync = Some(Utc::now().timestamp());
                Ok(count)
            }
            Err(err) => {
                status.sync_errors += 1;
                Err(err)
            }
        }
    }

    async fn refresh_from_remote(&self) -> Result<usize, AppError> {
        let datasets = self.remote.get_datasets().await?;
        let count = datasets.len();
        self.cache.replace_all(datasets).await?;
        debug!("Background sync replaced {} datasets", count);
        Ok(count)
    }

    /// Runs `sync_once` on an interval. The first tick fires immediately,
    /// which is the "background sync is always entered after hydration"
    /// rule.
    pub fn spawn_background(&self, interval_secs: u64) -> tokio::task::JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(interval_secs.max(1)));
            loop {
                interval.tick().await;
                if let Err(err) = service.sync_once().await {
                    warn!("Background sync failed: {}", err);
                }
            }
        })
    }

    pub async fn status(&self) -> SyncStatus {
        self.status.read().await.clone()
    }

    /// Explicit app-level reset; nothing clears the ready flag otherwise.
    pub async fn reset(&self) -> Result<(), AppError> {
        self.ready_flag.clear().await?;
        let mut status = self.status.write().await;
        *status = SyncStatus::default();
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        match self.ready_flag.is_ready().await {
            Ok(ready) => ready,
            Err(err) => {
                warn!("Ready flag read failed, assuming cold start: {}", err);
                false
            }
        }
    }

    async fn mark_ready(&self) {
        if let Err(err) = self.ready_flag.mark_ready().await {
            warn!("Ready flag write failed: {}", err);
        }
    }
}

impl Clone for SyncService {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            remote: self.remote.clone(),
            ready_flag: self.ready_flag.clone(),
            status: self.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::shared::tests::fixtures::{
        dataset, dataset_with_measurements, temp_cache_store,
    };
    use crate::application::shared::tests::mocks::{TestReadyFlag, TestRemoteApi};

    async fn service(
        remote_datasets: Vec<Dataset>,
        ready: bool,
    ) -> (
        Arc<SyncService>,
        Arc<dyn LocalCacheStore>,
        Arc<TestRemoteApi>,
        tempfile::TempDir,
    ) {
        let (cache, dir) = temp_cache_store().await;
        let cache: Arc<dyn LocalCacheStore> = cache;
        let remote = Arc::new(TestRemoteApi::with_datasets(remote_datasets));
        let ready_flag = Arc::new(TestReadyFlag::new(ready));
        let service = Arc::new(SyncService::new(
            Arc::clone(&cache),
            remote.clone() as Arc<dyn RemoteApi>,
            ready_flag as Arc<dyn ReadyFlagStore>,
        ));
        (service, cache, remote, dir)
    }

    #[tokio::test]
    async fn cold_start_fetches_and_fills_the_cache() {
        let (service, cache, remote, _dir) =
            service(vec![dataset_with_measurements("Steps", &[("2024-01-01T00:00:00Z", 1.0)])], false)
                .await;

        let source = service.hydrate(None).await.unwrap();

        assert_eq!(source, HydrationSource::RemoteFetch);
        assert_eq!(remote.get_call_count(), 1);
        let listed = cache.list_datasets().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].measurements.len(), 1);
    }

    #[tokio::test]
    async fn server_render_payload_skips_the_blocking_fetch() {
        let (service, cache, remote, _dir) = service(vec![dataset("Remote Only")], false).await;

        let payload = vec![dataset("From The Server Render")];
        let source = service.hydrate(Some(payload)).await.unwrap();

        assert_eq!(source, HydrationSource::ServerRender);
        assert_eq!(remote.get_call_count(), 0);
        let listed = cache.list_datasets().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "From The Server Render");
    }

    #[tokio::test]
    async fn ready_flag_skips_the_blocking_fetch() {
        let (service, _cache, remote, _dir) = service(vec![dataset("Remote")], true).await;

        let source = service.hydrate(None).await.unwrap();

        assert_eq!(source, HydrationSource::LocalCache);
        assert_eq!(remote.get_call_count(), 0);
    }

    #[tokio::test]
    async fn empty_initial_payload_counts_as_absent() {
        let (service, _cache, remote, _dir) = service(vec![], false).await;

        let source = service.hydrate(Some(vec![])).await.unwrap();

        // Falls through to the cold path.
        assert_eq!(source, HydrationSource::RemoteFetch);
        assert_eq!(remote.get_call_count(), 1);
    }

    #[tokio::test]
    async fn populated_cache_without_flag_is_treated_as_warm() {
        let (service, cache, remote, _dir) = service(vec![dataset("Remote")], false).await;
        cache.upsert_dataset(dataset("Cached")).await.unwrap();

        let source = service.hydrate(None).await.unwrap();

        assert_eq!(source, HydrationSource::LocalCache);
        assert_eq!(remote.get_call_count(), 0);
        // Next session sees the flag.
        assert_eq!(
            service.hydrate(None).await.unwrap(),
            HydrationSource::LocalCache
        );
    }

    #[tokio::test]
    async fn sync_once_bulk_replaces_the_cache() {
        let (service, cache, remote, _dir) = service(vec![], true).await;
        cache.upsert_dataset(dataset("Stale Local")).await.unwrap();
        remote.seed(vec![dataset("Fresh Remote")]).await;

        let count = service.sync_once().await.unwrap();

        assert_eq!(count, 1);
        let listed = cache.list_datasets().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Fresh Remote");
        assert!(service.status().await.last_sync.is_some());
    }

    #[tokio::test]
    async fn failed_sync_leaves_cache_untouched_and_counts_the_error() {
        let (service, cache, remote, _dir) = service(vec![], true).await;
        cache.upsert_dataset(dataset("Kept")).await.unwrap();
        remote.set_fail_fetch(true);

        let err = service.sync_once().await.unwrap_err();
        assert!(matches!(err, AppError::Network(_)));

        let listed = cache.list_datasets().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Kept");

        let status = service.status().await;
        assert_eq!(status.sync_errors, 1);
        assert!(!status.is_syncing);
        assert!(status.last_sync.is_none());
    }

    #[tokio::test]
    async fn reset_clears_flag_and_status() {
        let (service, _cache, _remote, _dir) = service(vec![], false).await;
        service.hydrate(None).await.unwrap();
        service.sync_once().await.unwrap();

        service.reset().await.unwrap();

        assert!(service.status().await.last_sync.is_none());
        // With the flag cleared and the cache empty, the next hydrate goes
        // cold again.
        let source = service.hydrate(None).await.unwrap();
        assert_eq!(source, HydrationSource::RemoteFetch);
    }
}
