//! Process-local credential store

use parking_lot::RwLock;
use storefront_core::CredentialStore;
use storefront_domain::{Result, StoredSession, StorefrontError, TokenPair, UserProfile};
use tracing::debug;

/// Holds the session for the life of the process only
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    session: RwLock<Option<StoredSession>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self { session: RwLock::new(Some(session)) }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.tokens.access_token().to_string())
    }

    fn refresh_token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.tokens.refresh_token().to_string())
    }

    fn set_tokens(&self, tokens: TokenPair) -> Result<()> {
        let mut session = self.session.write();
        let user = session.take().and_then(|s| s.user);
        *session = Some(StoredSession { tokens, user });
        debug!("tokens stored in memory");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.write() = None;
        debug!("in-memory credentials cleared");
        Ok(())
    }

    fn user(&self) -> Option<UserProfile> {
        self.session.read().as_ref().and_then(|s| s.user.clone())
    }

    fn set_user(&self, user: Option<UserProfile>) -> Result<()> {
        let mut session = self.session.write();
        let session = session
            .as_mut()
            .ok_or_else(|| StorefrontError::InvalidInput("no stored session".into()))?;
        session.user = user;
        Ok(())
    }

    fn session(&self) -> Option<StoredSession> {
        self.session.read().clone()
    }
}
