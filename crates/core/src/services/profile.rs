//! Signed-in user's profile

use std::sync::Arc;

use serde::Deserialize;
use storefront_domain::{DataEnvelope, Endpoints, ProfileUpdate, StorefrontError, UserProfile};
use tracing::debug;

use crate::errors::ClientError;
use crate::http::ApiRequest;
use crate::session::SessionClient;

/// Profile updates come back either wrapped in `data` or bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileReply {
    Enveloped(DataEnvelope<UserProfile>),
    Bare(UserProfile),
}

impl ProfileReply {
    fn into_profile(self) -> UserProfile {
        match self {
            Self::Enveloped(envelope) => envelope.data,
            Self::Bare(profile) => profile,
        }
    }
}

#[derive(Clone)]
pub struct ProfileService {
    client: Arc<SessionClient>,
    endpoints: Arc<Endpoints>,
}

impl ProfileService {
    pub fn new(client: Arc<SessionClient>, endpoints: Arc<Endpoints>) -> Self {
        Self { client, endpoints }
    }

    /// Fetch the profile and cache it in the stored session.
    ///
    /// # Errors
    /// Any [`ClientError`] from the request or from updating the store.
    pub async fn get_profile(&self) -> Result<UserProfile, ClientError> {
        let envelope: DataEnvelope<UserProfile> =
            self.client.fetch(ApiRequest::get(self.endpoints.profile())).await?;
        self.remember(&envelope.data)?;
        Ok(envelope.data)
    }

    /// Send a partial update and cache the profile the backend returns.
    ///
    /// # Errors
    /// `Credentials` with `InvalidInput` when `update` sets no field, else any
    /// [`ClientError`] from the request or from updating the store.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ClientError> {
        if update.is_empty() {
            return Err(StorefrontError::InvalidInput("profile update has no fields".into()).into());
        }
        let request = ApiRequest::put(self.endpoints.profile()).with_json(update)?;
        let profile = self.client.fetch::<ProfileReply>(request).await?.into_profile();
        self.remember(&profile)?;
        Ok(profile)
    }

    fn remember(&self, profile: &UserProfile) -> Result<(), ClientError> {
        let store = self.client.credentials();
        if store.session().is_none() {
            debug!("no stored session, profile not cached");
            return Ok(());
        }
        store.set_user(Some(profile.clone()))?;
        Ok(())
    }
}
