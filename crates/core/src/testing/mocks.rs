//! Mock implementations of the session ports

#![allow(clippy::missing_panics_doc)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use storefront_domain::{Result, StoredSession, StorefrontError, TokenPair, UserProfile};

use crate::errors::{RefreshFailure, TransportError};
use crate::http::{ApiRequest, ApiResponse};
use crate::session::{CredentialStore, HttpTransport, LogoutSignal};

type Handler = Box<dyn Fn(&ApiRequest) -> Scripted + Send + Sync>;

/// One scripted reply, optionally delayed
#[derive(Debug)]
pub struct Scripted {
    pub delay: Duration,
    pub response: std::result::Result<ApiResponse, TransportError>,
}

impl Scripted {
    pub fn now(response: ApiResponse) -> Self {
        Self { delay: Duration::ZERO, response: Ok(response) }
    }

    pub fn after(delay: Duration, response: ApiResponse) -> Self {
        Self { delay, response: Ok(response) }
    }

    pub fn fail(error: TransportError) -> Self {
        Self { delay: Duration::ZERO, response: Err(error) }
    }
}

/// Transport answering from a closure and recording every request it sees
pub struct MockTransport {
    handler: Handler,
    log: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new(handler: impl Fn(&ApiRequest) -> Scripted + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self { handler: Box::new(handler), log: Mutex::new(Vec::new()) })
    }

    /// Requests in the order they were sent.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.log.lock().iter().filter(|r| r.path == path).count()
    }

    pub fn last(&self) -> Option<ApiRequest> {
        self.log.lock().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(
        &self,
        request: ApiRequest,
    ) -> std::result::Result<ApiResponse, TransportError> {
        self.log.lock().push(request.clone());
        let scripted = (self.handler)(&request);
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.response
    }
}

/// Credential store held in memory
#[derive(Debug, Default)]
pub struct MockCredentialStore {
    session: Mutex<Option<StoredSession>>,
    fail_profile_writes: AtomicBool,
}

impl MockCredentialStore {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_tokens(access: &str, refresh: &str) -> Arc<Self> {
        let pair = TokenPair::new(access, refresh).expect("non-empty test tokens");
        Arc::new(Self {
            session: Mutex::new(Some(StoredSession { tokens: pair, user: None })),
            fail_profile_writes: AtomicBool::new(false),
        })
    }

    /// Make every later `set_user` call fail with a storage error.
    pub fn fail_profile_writes(&self) {
        self.fail_profile_writes.store(true, Ordering::SeqCst);
    }
}

impl CredentialStore for MockCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.session.lock().as_ref().map(|s| s.tokens.access_token().to_string())
    }

    fn refresh_token(&self) -> Option<String> {
        self.session.lock().as_ref().map(|s| s.tokens.refresh_token().to_string())
    }

    fn set_tokens(&self, tokens: TokenPair) -> Result<()> {
        let mut session = self.session.lock();
        let user = session.take().and_then(|s| s.user);
        *session = Some(StoredSession { tokens, user });
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.lock() = None;
        Ok(())
    }

    fn user(&self) -> Option<UserProfile> {
        self.session.lock().as_ref().and_then(|s| s.user.clone())
    }

    fn set_user(&self, user: Option<UserProfile>) -> Result<()> {
        if self.fail_profile_writes.load(Ordering::SeqCst) {
            return Err(StorefrontError::Storage("profile write rejected".into()));
        }
        match self.session.lock().as_mut() {
            Some(session) => {
                session.user = user;
                Ok(())
            }
            None => Err(StorefrontError::InvalidInput("no stored session".into())),
        }
    }

    fn session(&self) -> Option<StoredSession> {
        self.session.lock().clone()
    }
}

/// Logout signal that records every forced logout
#[derive(Debug, Default)]
pub struct RecordingLogout {
    reasons: Mutex<Vec<RefreshFailure>>,
}

impl RecordingLogout {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.reasons.lock().len()
    }

    pub fn reasons(&self) -> Vec<RefreshFailure> {
        self.reasons.lock().clone()
    }
}

impl LogoutSignal for RecordingLogout {
    fn forced_logout(&self, reason: &RefreshFailure) {
        self.reasons.lock().push(reason.clone());
    }
}
