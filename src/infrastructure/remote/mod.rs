pub mod dto;
pub mod error;
pub mod http_client;

pub use http_client::HttpRemoteApi;
