// indexa-api: Async Rust client for the Indexa portal REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

mod domain_services;
mod events;
mod providers;
mod reindex_jobs;

pub use auth::{ApiCredentials, Environment};
pub use client::PortalClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::ListParams;
