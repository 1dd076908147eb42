//! # Storefront Core
//!
//! Request/refresh logic for the storefront client - no HTTP library code.
//!
//! This crate contains:
//! - Port interfaces (traits) for transport, credential storage and logout
//! - The session client: bearer injection, single-flight token refresh and
//!   FIFO replay of requests queued behind it
//! - Token-shape normalisation for login and refresh responses
//! - Typed endpoint services built on the session client
//!
//! ## Architecture Principles
//! - Only depends on `storefront-domain`
//! - All I/O goes through the ports in [`session::ports`]
//! - Refresh state is owned per client, never global

pub mod errors;
pub mod http;
pub mod services;
pub mod session;
pub mod tokens;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used items
pub use errors::{ClientError, ErrorCategory, HttpFailure, RefreshFailure, TransportError};
pub use http::{ApiRequest, ApiResponse, FormPart, HttpMethod, RequestBody};
pub use services::{
    AuthService, BasketService, CatalogService, OrderService, ProductService, ProfileService,
    Services, UploadService,
};
pub use session::{CredentialStore, HttpTransport, LogoutSignal, SessionClient, SessionConfig};
pub use tokens::{normalize_auth_response, AuthPayload, TokenShape};
