//! Ready-to-use storefront client
//!
//! Wires configuration into the reqwest transport, a credential store, a
//! logout signal and the session client, and exposes the typed services.

pub mod client;

pub use client::{StorefrontClient, StorefrontClientBuilder};
