use crate::domain::entities::{Dataset, Measurement};
use crate::domain::value_objects::{DatasetId, MeasurementId, Slug};
use crate::shared::error::AppError;
use async_trait::async_trait;
use tokio::sync::watch;

/// Client-side durable store for dataset families. Multi-row writes are
/// atomic: a reader never observes a family with some children from the old
/// set and some from the new one.
#[async_trait]
pub trait LocalCacheStore: Send + Sync {
    /// Full bulk-replace of all three tables with the given snapshot, in one
    /// transaction. This is the reconciliation pass: the incoming snapshot
    /// wins wholesale.
    async fn replace_all(&self, datasets: Vec<Dataset>) -> Result<(), AppError>;

    /// Upserts one dataset and bulk-replaces its measurement and view
    /// children. Any cached dataset carrying the same slug under a different
    /// id is removed, mirroring the remote's replace-by-slug semantics.
    /// Idempotent.
    async fn upsert_dataset(&self, dataset: Dataset) -> Result<(), AppError>;

    /// Single idempotent measurement put under an existing dataset.
    async fn insert_measurement(
        &self,
        dataset_id: &DatasetId,
        measurement: Measurement,
    ) -> Result<(), AppError>;

    /// Removes one measurement (compensation for a failed optimistic append).
    async fn delete_measurement(&self, id: &MeasurementId) -> Result<(), AppError>;

    /// Removes a dataset and its children (compensation for a failed
    /// optimistic create).
    async fn delete_dataset(&self, id: &DatasetId) -> Result<(), AppError>;

    /// All cached datasets, fully assembled, measurements ascending by
    /// timestamp.
    async fn list_datasets(&self) -> Result<Vec<Dataset>, AppError>;

    /// One dataset addressed by its slug, fully assembled.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Dataset>, AppError>;

    async fn dataset_count(&self) -> Result<u64, AppError>;

    /// Change feed: the revision bumps after every committed write. Live
    /// queries subscribe and recompute on each bump.
    fn watch_revision(&self) -> watch::Receiver<u64>;
}
