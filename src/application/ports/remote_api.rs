use crate::domain::entities::{Dataset, MeasurementDraft};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Typed wrapper over the remote API. No local state, no retries; retry
/// policy belongs to the orchestrator's natural triggers.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Every dataset, fully populated: measurements ascending by timestamp,
    /// views as a flat tag list.
    async fn get_datasets(&self) -> Result<Vec<Dataset>, AppError>;

    /// Idempotent replace-by-slug of the full payload, children included.
    async fn upsert_dataset(&self, dataset: &Dataset) -> Result<(), AppError>;

    /// Append-only; the server resolves the dataset by slug and assigns the
    /// permanent measurement id. Fails when the slug is unknown remotely.
    async fn add_measurement(&self, draft: &MeasurementDraft) -> Result<(), AppError>;

    /// Liveness probe; not part of the data model.
    async fn hello(&self, name: Option<&str>) -> Result<String, AppError>;
}
