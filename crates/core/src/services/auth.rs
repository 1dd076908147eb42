//! Sign-in, sign-up and sign-out

use std::sync::Arc;

use serde_json::Value;
use storefront_domain::{Endpoints, LoginRequest, SignupRequest, StoredSession};
use tracing::{debug, info, warn};

use crate::errors::ClientError;
use crate::http::ApiRequest;
use crate::session::SessionClient;
use crate::tokens::normalize_auth_response;

#[derive(Clone)]
pub struct AuthService {
    client: Arc<SessionClient>,
    endpoints: Arc<Endpoints>,
}

impl AuthService {
    pub fn new(client: Arc<SessionClient>, endpoints: Arc<Endpoints>) -> Self {
        Self { client, endpoints }
    }

    /// Exchange credentials for a token pair and store the new session.
    ///
    /// # Errors
    /// `Http` when the backend rejects the credentials (a 401 here is never
    /// recovered), `MissingTokens` when the response carries no complete
    /// token pair (the store is left untouched), `Credentials` when the
    /// tokens cannot be stored. A failure to cache the profile is logged
    /// and does not fail the sign-in.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<StoredSession, ClientError> {
        let path = self.endpoints.login();
        let body: Value =
            self.client.fetch(ApiRequest::post(path).with_json(credentials)?).await?;
        let payload =
            normalize_auth_response(&body).ok_or_else(|| ClientError::MissingTokens(path.into()))?;

        let store = self.client.credentials();
        store.set_tokens(payload.tokens.clone())?;
        if let Err(error) = store.set_user(payload.user.clone()) {
            warn!(%error, "signed in, but failed to cache profile");
        }
        info!(shape = ?payload.shape, has_profile = payload.user.is_some(), "signed in");
        Ok(StoredSession { tokens: payload.tokens, user: payload.user })
    }

    /// Register a new account. The caller signs in separately.
    ///
    /// # Errors
    /// `Http` with the backend's validation message on rejection.
    pub async fn signup(&self, account: &SignupRequest) -> Result<(), ClientError> {
        let request = ApiRequest::post(self.endpoints.signup()).with_json(account)?;
        self.client.request(request).await?;
        info!("account created");
        Ok(())
    }

    /// Tell the backend the session ended, then clear local credentials.
    ///
    /// Failures of the backend call are ignored; local credentials are
    /// cleared regardless.
    ///
    /// # Errors
    /// `Credentials` only when the local store cannot be cleared.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Err(error) = self.client.request(ApiRequest::post(self.endpoints.logout())).await {
            debug!(%error, "backend logout failed, clearing local session anyway");
        }
        self.client.credentials().clear()?;
        info!("signed out");
        Ok(())
    }

    /// Whether a stored session exists, e.g. after an app restart.
    pub fn restore(&self) -> bool {
        let restored = self.client.credentials().is_authenticated();
        debug!(restored, "session restore");
        restored
    }
}
