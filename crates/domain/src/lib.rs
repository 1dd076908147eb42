//! # Storefront Domain
//!
//! Plain data for the storefront client.
//!
//! This crate contains:
//! - Backend resource types (products, basket, orders, profile, ...)
//! - The credential pair and persisted session
//! - Configuration structures and endpoint paths
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other storefront crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod endpoints;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use endpoints::Endpoints;
pub use errors::*;
pub use types::*;
