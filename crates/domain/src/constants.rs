//! Application constants
//!
//! Defaults shared by configuration, the endpoint table and the loader.

// API defaults
pub const DEFAULT_BASE_URL: &str = "https://api.sarkhanrahimli.dev";
pub const DEFAULT_ROUTE_PREFIX: &str = "/api/tiktak";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_ATTEMPTS: usize = 1;

// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Environment variable prefix used by the config loader
pub const ENV_PREFIX: &str = "STOREFRONT_";

// Multipart field the upload endpoint reads the image from
pub const UPLOAD_FIELD_NAME: &str = "file";
