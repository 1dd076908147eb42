//! Authenticated request client with single-flight token refresh
//!
//! Every dispatched request carries the stored access token. A 401 on any
//! path other than login/refresh starts one refresh; requests that hit 401
//! while it runs wait in a FIFO queue and are replayed with the new token
//! once it settles.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use storefront_domain::{ApiConfig, RefreshTokenRequest, TokenPair};
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};

use super::ports::{CredentialStore, HttpTransport, LogoutSignal};
use super::state::{PendingRequest, RefreshLease, RefreshState};
use crate::errors::{ClientError, HttpFailure, RefreshFailure, TransportError};
use crate::http::{ApiRequest, ApiResponse, AUTHORIZATION};
use crate::tokens::normalize_auth_response;

/// Settings the session client needs from [`ApiConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Bound on every individual call, including the refresh call
    pub timeout: Duration,
    pub login_path: String,
    pub refresh_path: String,
}

impl SessionConfig {
    #[must_use]
    pub fn from_api(api: &ApiConfig) -> Self {
        Self {
            timeout: api.timeout(),
            login_path: api.login_path(),
            refresh_path: api.refresh_path(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_api(&ApiConfig::default())
    }
}

/// What to do with a request that just received 401
enum Admission<'a> {
    /// A refresh is running; wait for its outcome. A closed channel means
    /// the driving caller was dropped before answering this request.
    Queued(oneshot::Receiver<Result<ApiResponse, ClientError>>),
    /// The token was rotated while this request was in flight
    Rotated(ApiRequest),
    /// Credentials were cleared while this request was in flight
    Expired,
    /// This request drives the refresh
    Leader(ApiRequest, RefreshLease<'a>),
}

/// HTTP client that attaches bearer tokens and recovers from 401s
pub struct SessionClient {
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<dyn CredentialStore>,
    logout: Arc<dyn LogoutSignal>,
    config: SessionConfig,
    state: Mutex<RefreshState>,
}

impl SessionClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<dyn CredentialStore>,
        logout: Arc<dyn LogoutSignal>,
        config: SessionConfig,
    ) -> Self {
        Self { transport, credentials, logout, config, state: Mutex::new(RefreshState::default()) }
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// True while a refresh call is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().refreshing
    }

    /// Number of requests waiting on the in-flight refresh.
    pub fn queued_len(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Send a request, recovering once from an expired access token.
    ///
    /// 2xx responses are returned unchanged. Any other status becomes
    /// [`ClientError::Http`], except a 401 on a non-auth path which triggers
    /// (or waits on) a token refresh and a single retry.
    ///
    /// # Errors
    /// - `Transport` when no response was received
    /// - `SessionExpired` when the refresh failed; credentials are cleared and
    ///   the logout signal has fired
    /// - `Http` for non-2xx responses that are not recovered
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let (response, sent_with) = self.send_authorized(request.clone()).await?;
        if !response.is_unauthorized() || self.is_exempt(&request.path) {
            return settle(&request, response);
        }

        debug!("received 401, recovering session");
        loop {
            match self.admit(request.clone(), sent_with.as_deref()) {
                Admission::Queued(reply) => match reply.await {
                    Ok(result) => return result,
                    // The caller driving the refresh was dropped; admit again.
                    Err(_) => debug!("refresh driver went away, re-admitting request"),
                },
                Admission::Rotated(request) => {
                    debug!("access token rotated in flight, retrying without refresh");
                    return self.retry(request).await;
                }
                Admission::Expired => {
                    debug!("credentials cleared while request was in flight");
                    return Err(ClientError::SessionExpired(RefreshFailure::MissingRefreshToken));
                }
                Admission::Leader(request, lease) => {
                    return self.lead_refresh(request, lease).await;
                }
            }
        }
    }

    /// Send a request and deserialize a 2xx JSON body.
    ///
    /// # Errors
    /// Everything [`Self::request`] returns, plus `Decode` when the body does
    /// not match `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let path = request.path.clone();
        let response = self.request(request).await?;
        response.decode(&path)
    }

    fn is_exempt(&self, path: &str) -> bool {
        let path = path.trim_end_matches('/');
        path == self.config.login_path.trim_end_matches('/')
            || path == self.config.refresh_path.trim_end_matches('/')
    }

    /// Decide, atomically with respect to other 401s, how to recover.
    fn admit(&self, request: ApiRequest, sent_with: Option<&str>) -> Admission<'_> {
        let mut state = self.state.lock();
        if state.refreshing {
            let (reply, receiver) = oneshot::channel();
            state.queue.push_back(PendingRequest { request, reply });
            debug!(queued = state.queue.len(), "refresh in flight, request queued");
            return Admission::Queued(receiver);
        }

        match (self.credentials.access_token(), sent_with) {
            (Some(current), sent) if sent != Some(current.as_str()) => Admission::Rotated(request),
            (None, Some(_)) => Admission::Expired,
            _ => Admission::Leader(request, RefreshLease::acquire(&self.state, &mut state)),
        }
    }

    async fn lead_refresh(
        &self,
        request: ApiRequest,
        lease: RefreshLease<'_>,
    ) -> Result<ApiResponse, ClientError> {
        match self.refresh_tokens().await {
            Ok(_) => {
                let queued = lease.release();
                info!(queued = queued.len(), "access token refreshed");
                for pending in queued {
                    let result = self.retry(pending.request).await;
                    // The waiting caller may have gone away.
                    let _ = pending.reply.send(result);
                }
                self.retry(request).await
            }
            Err(failure) => {
                if let Err(error) = self.credentials.clear() {
                    warn!(%error, "failed to clear credentials after refresh failure");
                }
                let queued = lease.release();
                warn!(%failure, queued = queued.len(), "token refresh failed, forcing logout");
                self.logout.forced_logout(&failure);
                for pending in queued {
                    let _ = pending.reply.send(Err(ClientError::SessionExpired(failure.clone())));
                }
                Err(ClientError::SessionExpired(failure))
            }
        }
    }

    /// Exchange the stored refresh token for a new pair and store it.
    async fn refresh_tokens(&self) -> Result<TokenPair, RefreshFailure> {
        let refresh_token =
            self.credentials.refresh_token().ok_or(RefreshFailure::MissingRefreshToken)?;
        let request = ApiRequest::post(self.config.refresh_path.clone())
            .with_json(&RefreshTokenRequest { refresh_token })
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let (response, _) = self.send_authorized(request).await?;
        if !response.is_success() {
            return Err(RefreshFailure::Rejected {
                status: response.status,
                body: response.text().into_owned(),
            });
        }

        let body: Value =
            serde_json::from_slice(&response.body).map_err(|_| RefreshFailure::MissingTokens)?;
        let payload = normalize_auth_response(&body).ok_or(RefreshFailure::MissingTokens)?;
        self.credentials
            .set_tokens(payload.tokens.clone())
            .map_err(|e| RefreshFailure::Storage(e.to_string()))?;
        if let Some(user) = payload.user {
            if let Err(error) = self.credentials.set_user(Some(user)) {
                warn!(%error, "failed to cache profile from refresh response");
            }
        }
        debug!(shape = ?payload.shape, "refresh response normalised");
        Ok(payload.tokens)
    }

    /// Re-issue a request once with whatever token is stored now. A second
    /// 401 is surfaced as an HTTP failure.
    async fn retry(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let (response, _) = self.send_authorized(request.clone()).await?;
        settle(&request, response)
    }

    /// Attach the current bearer token and dispatch. Returns the response and
    /// the token the request carried.
    async fn send_authorized(
        &self,
        mut request: ApiRequest,
    ) -> Result<(ApiResponse, Option<String>), TransportError> {
        let token = self.credentials.access_token();
        if let Some(token) = &token {
            request.set_header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = self.dispatch(request).await?;
        Ok((response, token))
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = request.method;
        let path = request.path.clone();
        let timeout = self.config.timeout;
        let response = tokio::time::timeout(timeout, self.transport.send(request))
            .await
            .map_err(|_| TransportError::Timeout(timeout))??;
        debug!(%method, %path, status = response.status, "response received");
        Ok(response)
    }
}

fn settle(request: &ApiRequest, response: ApiResponse) -> Result<ApiResponse, ClientError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ClientError::Http(HttpFailure {
        method: request.method,
        path: request.path.clone(),
        status: response.status,
        headers: response.headers,
        body: response.body,
    }))
}
