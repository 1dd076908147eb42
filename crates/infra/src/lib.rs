//! # Storefront Infrastructure
//!
//! Infrastructure implementations of the ports defined in `storefront-core`.
//!
//! This crate contains:
//! - The reqwest-backed HTTP transport
//! - In-memory and file-backed credential stores
//! - Configuration loading from files and `STOREFRONT_*` variables
//! - Tracing subscriber setup
//! - [`StorefrontClient`], which wires all of the above together
//!
//! ## Architecture
//! - Implements traits defined in `storefront-core`
//! - Depends on `storefront-domain` and `storefront-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod http;
pub mod logout;
pub mod observability;

// Re-export commonly used items
pub use api::{StorefrontClient, StorefrontClientBuilder};
pub use credentials::{open_store, FileCredentialStore, MemoryCredentialStore};
pub use errors::{InfraError, IntoTransportError};
pub use http::{HttpClient, HttpClientBuilder, ReqwestTransport};
pub use logout::{ChannelLogoutSignal, LoggingLogoutSignal};
pub use observability::init_tracing;
