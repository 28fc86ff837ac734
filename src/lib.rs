pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

mod state;

pub use application::ports::{LocalCacheStore, ReadyFlagStore, RemoteApi};
pub use application::services::{
    HydrationSource, LiveQuery, LiveQueryService, MutationService, QueryState, SyncService,
    SyncStatus,
};
pub use domain::entities::{Dataset, Measurement, MeasurementDraft};
pub use domain::value_objects::{DatasetId, MeasurementId, Slug, Unit, ViewType};
pub use shared::config::AppConfig;
pub use shared::error::{AppError, Result};
pub use state::SyncStack;

pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scales_sync=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
