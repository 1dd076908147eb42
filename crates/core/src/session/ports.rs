//! Port interfaces for the session client
//!
//! These traits define the boundaries between the refresh coordination in
//! core and the HTTP library, credential persistence and navigation layer
//! supplied by infrastructure.

use async_trait::async_trait;
use storefront_domain::{Result, StoredSession, TokenPair, UserProfile};

use crate::errors::{RefreshFailure, TransportError};
use crate::http::{ApiRequest, ApiResponse};

/// Trait for sending a single request over the wire
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request exactly as given and buffer the full response.
    ///
    /// Any status code is a successful send; only failures to obtain a
    /// response are errors.
    async fn send(&self, request: ApiRequest) -> std::result::Result<ApiResponse, TransportError>;
}

/// Trait for the current token pair and cached user profile
pub trait CredentialStore: Send + Sync {
    /// Current access token
    fn access_token(&self) -> Option<String>;

    /// Current refresh token
    fn refresh_token(&self) -> Option<String>;

    /// Replace the token pair, keeping any cached profile
    fn set_tokens(&self, tokens: TokenPair) -> Result<()>;

    /// Remove tokens and profile
    fn clear(&self) -> Result<()>;

    /// Cached profile of the signed-in user
    fn user(&self) -> Option<UserProfile>;

    /// Replace the cached profile; fails with `InvalidInput` when no session
    /// is stored
    fn set_user(&self, user: Option<UserProfile>) -> Result<()>;

    /// Snapshot of the stored session
    fn session(&self) -> Option<StoredSession>;

    fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

/// Trait for telling the navigation layer that the session ended
pub trait LogoutSignal: Send + Sync {
    /// Called once per forced logout, after credentials were cleared.
    /// Must not block.
    fn forced_logout(&self, reason: &RefreshFailure);
}
