//! Credential and auth request types

use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::UserProfile;

/// Access/refresh token pair.
///
/// Both tokens are always present and non-empty; a half-populated pair cannot
/// be built or deserialized. `Debug` redacts both values.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTokenPair")]
pub struct TokenPair {
    access_token: String,
    refresh_token: String,
}

impl TokenPair {
    /// Build a pair, rejecting empty or whitespace-only tokens.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Option<Self> {
        let access_token = access_token.into();
        let refresh_token = refresh_token.into();
        if access_token.trim().is_empty() || refresh_token.trim().is_empty() {
            return None;
        }
        Some(Self { access_token, refresh_token })
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .finish()
    }
}

#[derive(Deserialize)]
struct RawTokenPair {
    access_token: String,
    refresh_token: String,
}

impl TryFrom<RawTokenPair> for TokenPair {
    type Error = String;

    fn try_from(raw: RawTokenPair) -> Result<Self, Self::Error> {
        TokenPair::new(raw.access_token, raw.refresh_token)
            .ok_or_else(|| "token pair requires non-empty access and refresh tokens".to_string())
    }
}

/// What a credential store persists between launches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub tokens: TokenPair,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub phone: String,
    pub password: String,
}

/// Body of the refresh call
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

impl fmt::Debug for RefreshTokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshTokenRequest").field("refresh_token", &"[redacted]").finish()
    }
}
