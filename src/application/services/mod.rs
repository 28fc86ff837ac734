pub mod mutation_service;
pub mod query_service;
pub mod sync_service;

pub use mutation_service::MutationService;
pub use query_service::{LiveQuery, LiveQueryService, QueryState};
pub use sync_service::{HydrationSource, SyncService, SyncStatus};
