// assetdesk-api: Async Rust client for the asset-inventory REST backend

mod assets;
pub mod client;
mod customers;
pub mod error;
mod infrastructure;
mod sites;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use transport::TransportConfig;
