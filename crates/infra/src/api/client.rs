//! Storefront client and its builder

use std::sync::Arc;

use storefront_core::{
    AuthService, BasketService, CatalogService, CredentialStore, HttpTransport, LogoutSignal,
    OrderService, ProductService, ProfileService, Services, SessionClient, SessionConfig,
    UploadService,
};
use storefront_domain::{Config, Endpoints, Result};
use tracing::{debug, info};

use crate::credentials::open_store;
use crate::http::ReqwestTransport;
use crate::logout::LoggingLogoutSignal;

/// Authenticated client for the storefront backend
///
/// Cheap to clone; clones share the session client, so concurrent 401s from
/// any clone still trigger a single refresh.
#[derive(Clone)]
pub struct StorefrontClient {
    session: Arc<SessionClient>,
    endpoints: Arc<Endpoints>,
    services: Services,
}

impl StorefrontClient {
    /// Create a builder for fluent configuration
    pub fn builder() -> StorefrontClientBuilder {
        StorefrontClientBuilder::default()
    }

    /// Build a client with the reqwest transport and the configured store.
    ///
    /// # Errors
    /// Returns `StorefrontError::Config` for invalid settings and
    /// `StorefrontError::Storage` when the credential file cannot be opened.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::builder().config(config.clone()).build()
    }

    pub fn session(&self) -> &Arc<SessionClient> {
        &self.session
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        self.session.credentials()
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn auth(&self) -> &AuthService {
        &self.services.auth
    }

    pub fn profile(&self) -> &ProfileService {
        &self.services.profile
    }

    pub fn products(&self) -> &ProductService {
        &self.services.products
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.services.catalog
    }

    pub fn basket(&self) -> &BasketService {
        &self.services.basket
    }

    pub fn orders(&self) -> &OrderService {
        &self.services.orders
    }

    pub fn upload(&self) -> &UploadService {
        &self.services.upload
    }
}

/// Builder for [`StorefrontClient`]
///
/// Every collaborator defaults from the [`Config`]: a [`ReqwestTransport`],
/// the store chosen by `credentials.path`, and a signal that only logs.
#[derive(Default)]
pub struct StorefrontClientBuilder {
    config: Option<Config>,
    transport: Option<Arc<dyn HttpTransport>>,
    credentials: Option<Arc<dyn CredentialStore>>,
    logout: Option<Arc<dyn LogoutSignal>>,
}

impl StorefrontClientBuilder {
    /// Set the configuration
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the reqwest transport
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the credential store chosen from configuration
    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the forced-logout listener
    pub fn logout_signal(mut self, logout: Arc<dyn LogoutSignal>) -> Self {
        self.logout = Some(logout);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or a default
    /// collaborator cannot be created
    pub fn build(self) -> Result<StorefrontClient> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::from_config(&config.api)?),
        };
        let credentials = match self.credentials {
            Some(credentials) => credentials,
            None => open_store(&config.credentials)?,
        };
        let logout = self.logout.unwrap_or_else(|| Arc::new(LoggingLogoutSignal));

        let session_config = SessionConfig::from_api(&config.api);
        debug!(
            login = %session_config.login_path,
            refresh = %session_config.refresh_path,
            "Session client configured"
        );

        let session =
            Arc::new(SessionClient::new(transport, credentials, logout, session_config));
        let endpoints = Arc::new(Endpoints::new(&config.api));
        let services = Services::new(session.clone(), endpoints.clone());

        info!(
            base_url = %config.api.base_url,
            authenticated = session.credentials().is_authenticated(),
            "Storefront client ready"
        );
        Ok(StorefrontClient { session, endpoints, services })
    }
}
