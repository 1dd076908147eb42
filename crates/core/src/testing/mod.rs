//! Testing utilities and helpers
//!
//! - **[`mocks`]**: in-process implementations of the session ports
//!
//! Compiled for this crate's unit tests and, behind the `test-utils`
//! feature, for downstream integration tests.

pub mod mocks;

pub use mocks::{MockCredentialStore, MockTransport, RecordingLogout, Scripted};
