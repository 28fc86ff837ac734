use crate::application::ports::cache_store::LocalCacheStore;
use crate::application::ports::remote_api::RemoteApi;
use crate::domain::entities::{Dataset, Measurement, MeasurementDraft};
use crate::domain::value_objects::{DatasetId, MeasurementId};
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Local-first mutations: apply to the cache immediately, replicate to the
/// remote, compensate the local write when the remote refuses. The
/// snapshot/attempt/restore steps stay explicit rather than hidden in
/// callbacks.
pub struct MutationService {
    cache: Arc<dyn LocalCacheStore>,
    remote: Arc<dyn RemoteApi>,
}

impl MutationService {
    pub fn new(cache: Arc<dyn LocalCacheStore>, remote: Arc<dyn RemoteApi>) -> Self {
        Self { cache, remote }
    }

    /// Full-record replace of a dataset, children included, local cache
    /// first. A cache failure is logged and does not stop the remote write;
    /// a remote failure rolls the cache back to the pre-mutation family.
    pub async fn upsert_dataset(&self, dataset: Dataset) -> Result<(), AppError> {
        let prior = match self.cache.find_by_slug(&dataset.slug).await {
            Ok(prior) => prior,
            Err(err) => {
                warn!("Snapshot read before upsert failed: {}", err);
                None
            }
        };

        if let Err(err) = self.cache.upsert_dataset(dataset.clone()).await {
            warn!("Optimistic local upsert failed: {}", err);
        }

        match self.remote.upsert_dataset(&dataset).await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(
                    "Remote upsert of '{}' failed, rolling back local state: {}",
                    dataset.slug, err
                );
                self.restore_family(prior, &dataset.id).await;
                Err(err)
            }
        }
    }

    /// Appends one measurement. The dataset is resolved by slug against the
    /// local cache; when it is not known locally the optimistic write is
    /// silently skipped and the record appears with the next background
    /// sync. The remote call proceeds either way.
    pub async fn add_measurement(&self, draft: MeasurementDraft) -> Result<(), AppError> {
        let optimistic = self.apply_optimistic_measurement(&draft).await;

        match self.remote.add_measurement(&draft).await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(
                    "Remote append to '{}' failed, rolling back local state: {}",
                    draft.dataset_slug, err
                );
                if let Some(id) = optimistic {
                    if let Err(rollback_err) = self.cache.delete_measurement(&id).await {
                        error!("Rollback of optimistic measurement failed: {}", rollback_err);
                    }
                }
                Err(err)
            }
        }
    }

    async fn apply_optimistic_measurement(
        &self,
        draft: &MeasurementDraft,
    ) -> Option<MeasurementId> {
        let dataset = match self.cache.find_by_slug(&draft.dataset_slug).await {
            Ok(Some(dataset)) => dataset,
            Ok(None) => {
                debug!(
                    "No local dataset for slug '{}', deferring to background sync",
                    draft.dataset_slug
                );
                return None;
            }
            Err(err) => {
                warn!("Slug lookup before append failed: {}", err);
                return None;
            }
        };

        let measurement = Measurement::optimistic(draft.timestamp, draft.value);
        let id = measurement.id.clone();
        match self.cache.insert_measurement(&dataset.id, measurement).await {
            Ok(()) => Some(id),
            Err(err) => {
                warn!("Optimistic measurement write failed: {}", err);
                None
            }
        }
    }

    async fn restore_family(&self, prior: Option<Dataset>, created_id: &DatasetId) {
        let outcome = match prior {
            Some(prior) => self.cache.upsert_dataset(prior).await,
            None => self.cache.delete_dataset(created_id).await,
        };
        if let Err(err) = outcome {
            error!("Rollback of local dataset state failed: {}", err);
        }
    }
}
