use crate::shared::error::AppError;
use async_trait::async_trait;

/// Durable marker recording that local hydration has completed at least
/// once. Lives outside the cache database so it survives reloads
/// independently and gates the blocking fetch on startup. Once set it is
/// cleared only by an explicit app-level reset.
#[async_trait]
pub trait ReadyFlagStore: Send + Sync {
    async fn is_ready(&self) -> Result<bool, AppError>;
    async fn mark_ready(&self) -> Result<(), AppError>;
    async fn clear(&self) -> Result<(), AppError>;
}
