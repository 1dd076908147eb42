//! Conversions from external infrastructure errors into workspace errors.

use std::io::Error as IoError;

use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use storefront_core::TransportError;
use storefront_domain::StorefrontError;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub StorefrontError);

impl From<InfraError> for StorefrontError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<StorefrontError> for InfraError {
    fn from(value: StorefrontError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoStorefrontError {
    fn into_storefront(self) -> StorefrontError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → StorefrontError */
/* -------------------------------------------------------------------------- */

impl IntoStorefrontError for IoError {
    fn into_storefront(self) -> StorefrontError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::PermissionDenied => {
                StorefrontError::Storage(format!("permission denied: {self}"))
            }
            ErrorKind::NotFound => StorefrontError::Storage(format!("file not found: {self}")),
            _ => StorefrontError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_storefront())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error / toml::de::Error → StorefrontError */
/* -------------------------------------------------------------------------- */

impl IntoStorefrontError for JsonError {
    fn into_storefront(self) -> StorefrontError {
        if self.is_io() {
            return StorefrontError::Storage(self.to_string());
        }
        StorefrontError::Storage(format!(
            "invalid JSON at line {} column {}: {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_storefront())
    }
}

impl IntoStorefrontError for TomlError {
    fn into_storefront(self) -> StorefrontError {
        StorefrontError::Config(format!("Invalid TOML format: {}", self.message()))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        InfraError(value.into_storefront())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError / StorefrontError */
/* -------------------------------------------------------------------------- */

/// Classify a reqwest failure for the session client.
pub trait IntoTransportError {
    fn into_transport(self) -> TransportError;
}

impl IntoTransportError for HttpError {
    fn into_transport(self) -> TransportError {
        if self.is_timeout() {
            return TransportError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return TransportError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return TransportError::InvalidRequest(self.to_string());
        }

        if self.is_body() || self.is_decode() {
            return TransportError::InvalidResponse(self.to_string());
        }

        TransportError::Network(self.to_string())
    }
}

impl IntoStorefrontError for HttpError {
    fn into_storefront(self) -> StorefrontError {
        if self.is_builder() {
            return StorefrontError::Config(format!("invalid HTTP client settings: {self}"));
        }
        StorefrontError::Internal(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_storefront())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
