use async_trait::async_trait;
use scales_sync::{AppError, Dataset, Measurement, MeasurementDraft, RemoteApi};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Remote stand-in with replace-by-slug and server-issued measurement ids,
/// mirroring the real API's contracts.
pub struct TestRemoteApi {
    datasets: RwLock<Vec<Dataset>>,
    get_calls: AtomicUsize,
    fail_mutations: AtomicBool,
}

impl TestRemoteApi {
    pub fn new() -> Self {
        Self::with_datasets(Vec::new())
    }

    pub fn with_datasets(datasets: Vec<Dataset>) -> Self {
        Self {
            datasets: RwLock::new(datasets),
            get_calls: AtomicUsize::new(0),
            fail_mutations: AtomicBool::new(false),
        }
    }

    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    pub fn get_call_count(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub async fn stored(&self) -> Vec<Dataset> {
        self.datasets.read().await.clone()
    }
}

impl Default for TestRemoteApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteApi for TestRemoteApi {
    async fn get_datasets(&self) -> Result<Vec<Dataset>, AppError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.datasets.read().await.clone())
    }

    async fn upsert_dataset(&self, dataset: &Dataset) -> Result<(), AppError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(AppError::RemoteRejected("upsert refused".into()));
        }
        let mut confirmed = dataset.clone();
        confirmed.is_optimistic = false;
        let mut stored = self.datasets.write().await;
        stored.retain(|d| d.slug != dataset.slug);
        stored.push(confirmed);
        Ok(())
    }

    async fn add_measurement(&self, draft: &MeasurementDraft) -> Result<(), AppError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(AppError::RemoteRejected("append refused".into()));
        }
        let mut stored = self.datasets.write().await;
        let dataset = stored
            .iter_mut()
            .find(|d| d.slug == draft.dataset_slug)
            .ok_or_else(|| {
                AppError::RemoteRejected(format!("unknown dataset slug: {}", draft.dataset_slug))
            })?;
        dataset
            .measurements
            .push(Measurement::optimistic(draft.timestamp, draft.value));
        dataset.sort_measurements();
        Ok(())
    }

    async fn hello(&self, name: Option<&str>) -> Result<String, AppError> {
        Ok(format!("Hello {}", name.unwrap_or("world")))
    }
}
