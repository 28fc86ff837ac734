pub mod cache_store;
pub mod ready_flag;
pub mod remote_api;

pub use cache_store::LocalCacheStore;
pub use ready_flag::ReadyFlagStore;
pub use remote_api::RemoteApi;
