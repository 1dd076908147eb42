//! Client error taxonomy
//!
//! Callers branch on [`ClientError::category`] rather than matching every
//! variant. A [`RefreshFailure`] is fatal for the session and is cloned to
//! every request that was waiting on the failed refresh.

use std::time::Duration;

use serde_json::Value;
use storefront_domain::StorefrontError;
use thiserror::Error;

use crate::http::HttpMethod;

/// Failures below HTTP semantics: no status code was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Why a token refresh did not produce a usable token pair
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshFailure {
    #[error("no refresh token stored")]
    MissingRefreshToken,

    #[error("refresh rejected with status {status}")]
    Rejected { status: u16, body: String },

    #[error("refresh transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("refresh response did not contain a token pair")]
    MissingTokens,

    #[error("failed to store refreshed tokens: {0}")]
    Storage(String),
}

/// A non-2xx response passed through to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFailure {
    pub method: HttpMethod,
    pub path: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpFailure {
    /// The backend's `message` field, for presentation.
    ///
    /// Validation errors arrive as an array of strings; those are joined with
    /// `", "`.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        let value: Value = serde_json::from_slice(&self.body).ok()?;
        match value.get("message")? {
            Value::String(message) => Some(message.clone()),
            Value::Array(parts) => {
                let parts: Vec<&str> = parts.iter().filter_map(Value::as_str).collect();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} returned {}", self.method, self.path, self.status)?;
        if let Some(message) = self.server_message() {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

/// Coarse grouping of [`ClientError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No response was received
    Transport,
    /// The session ended; credentials were cleared and logout signalled
    SessionExpired,
    /// The server answered with a non-2xx status
    Http,
    /// A 2xx body did not match the expected shape
    Decode,
    /// The request body could not be serialized; nothing was sent
    Request,
    /// Reading or writing the credential store failed
    Credentials,
}

/// Errors returned by the session client and endpoint services
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Session expired: {0}")]
    SessionExpired(RefreshFailure),

    #[error("{0}")]
    Http(HttpFailure),

    #[error("Failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Failed to encode request body: {0}")]
    Encode(String),

    #[error("Response from {0} did not contain a token pair")]
    MissingTokens(String),

    #[error("Credential store error: {0}")]
    Credentials(#[from] StorefrontError),
}

impl ClientError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) => ErrorCategory::Transport,
            Self::SessionExpired(_) => ErrorCategory::SessionExpired,
            Self::Http(_) => ErrorCategory::Http,
            Self::Decode { .. } | Self::MissingTokens(_) => ErrorCategory::Decode,
            Self::Encode(_) => ErrorCategory::Request,
            Self::Credentials(_) => ErrorCategory::Credentials,
        }
    }

    /// HTTP status of a pass-through failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(failure) => Some(failure.status),
            Self::SessionExpired(RefreshFailure::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired(_))
    }

    /// Message suitable for a toast: the backend's message when present,
    /// otherwise the error's display text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(failure) => failure.server_message().unwrap_or_else(|| self.to_string()),
            _ => self.to_string(),
        }
    }
}

impl From<RefreshFailure> for ClientError {
    fn from(failure: RefreshFailure) -> Self {
        Self::SessionExpired(failure)
    }
}
