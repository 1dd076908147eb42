//! Session management: bearer injection and token refresh coordination

pub mod client;
pub mod ports;
mod state;

pub use client::{SessionClient, SessionConfig};
pub use ports::{CredentialStore, HttpTransport, LogoutSignal};
