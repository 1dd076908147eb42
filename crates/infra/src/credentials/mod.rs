//! Credential store implementations

pub mod file;
pub mod memory;

use std::sync::Arc;

use storefront_core::CredentialStore;
use storefront_domain::{CredentialsConfig, Result};

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

/// File-backed store when a path is configured, in-memory otherwise.
///
/// # Errors
/// Returns `StorefrontError::Storage` when the file store cannot be opened.
pub fn open_store(config: &CredentialsConfig) -> Result<Arc<dyn CredentialStore>> {
    match &config.path {
        Some(path) => Ok(Arc::new(FileCredentialStore::open(path)?)),
        None => Ok(Arc::new(MemoryCredentialStore::new())),
    }
}
