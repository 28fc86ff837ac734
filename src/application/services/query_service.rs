use crate::application::ports::cache_store::LocalCacheStore;
use crate::domain::entities::Dataset;
use crate::domain::value_objects::Slug;
use crate::shared::error::AppError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

/// Result shape of a live query. `is_loading` is true only until the first
/// local resolution; leaving loading never requires network success.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
}

impl<T> QueryState<T> {
    fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
        }
    }
}

/// Handle on a live, auto-updating read view. The backing task re-runs the
/// query on every cache revision and publishes the result; dropping the
/// handle tears the subscription down.
pub struct LiveQuery<T> {
    rx: watch::Receiver<QueryState<T>>,
    task: JoinHandle<()>,
}

impl<T: Clone> LiveQuery<T> {
    /// Latest published state, synchronously.
    pub fn current(&self) -> QueryState<T> {
        self.rx.borrow().clone()
    }

    /// Waits for the next re-emission. Returns false when the publisher is
    /// gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

impl<T> Drop for LiveQuery<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Read façade over the cache: live values that recompute whenever any
/// underlying record changes.
pub struct LiveQueryService {
    cache: Arc<dyn LocalCacheStore>,
}

impl LiveQueryService {
    pub fn new(cache: Arc<dyn LocalCacheStore>) -> Self {
        Self { cache }
    }

    /// All datasets, re-delivered on every cache change.
    pub fn live_datasets(&self) -> LiveQuery<Vec<Dataset>> {
        spawn_query(Arc::clone(&self.cache), |cache| async move {
            cache.list_datasets().await.map(Some)
        })
    }

    /// One dataset by slug; `data` stays `None` while no such dataset is
    /// cached.
    pub fn live_dataset(&self, slug: Slug) -> LiveQuery<Dataset> {
        spawn_query(Arc::clone(&self.cache), move |cache| {
            let slug = slug.clone();
            async move { cache.find_by_slug(&slug).await }
        })
    }
}

fn spawn_query<T, F, Fut>(cache: Arc<dyn LocalCacheStore>, query: F) -> LiveQuery<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(Arc<dyn LocalCacheStore>) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Option<T>, AppError>> + Send + 'static,
{
    let (tx, rx) = watch::channel(QueryState::loading());
    let mut revision = cache.watch_revision();

    let task = tokio::spawn(async move {
        loop {
            match query(Arc::clone(&cache)).await {
                Ok(data) => {
                    let _ = tx.send(QueryState {
                        data,
                        is_loading: false,
                    });
                }
                Err(err) => {
                    // Keep the previous value; stale beats broken.
                    warn!("Live query refresh failed: {}", err);
                }
            }
            if revision.changed().await.is_err() {
                break;
            }
        }
    });

    LiveQuery { rx, task }
}
