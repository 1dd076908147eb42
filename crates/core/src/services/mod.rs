//! Typed endpoint services
//!
//! Each service is a thin wrapper over [`SessionClient::fetch`]: it builds the
//! request for one backend resource and decodes the response. Token refresh,
//! retries and forced logout all happen inside the session client.

pub mod auth;
pub mod basket;
pub mod catalog;
pub mod orders;
pub mod products;
pub mod profile;
pub mod upload;

use std::sync::Arc;

use storefront_domain::Endpoints;

pub use auth::AuthService;
pub use basket::BasketService;
pub use catalog::CatalogService;
pub use orders::OrderService;
pub use products::ProductService;
pub use profile::ProfileService;
pub use upload::UploadService;

use crate::session::SessionClient;

/// Every endpoint service, sharing one session client
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub profile: ProfileService,
    pub products: ProductService,
    pub catalog: CatalogService,
    pub basket: BasketService,
    pub orders: OrderService,
    pub upload: UploadService,
}

impl Services {
    pub fn new(client: Arc<SessionClient>, endpoints: Arc<Endpoints>) -> Self {
        Self {
            auth: AuthService::new(client.clone(), endpoints.clone()),
            profile: ProfileService::new(client.clone(), endpoints.clone()),
            products: ProductService::new(client.clone(), endpoints.clone()),
            catalog: CatalogService::new(client.clone(), endpoints.clone()),
            basket: BasketService::new(client.clone(), endpoints.clone()),
            orders: OrderService::new(client.clone(), endpoints.clone()),
            upload: UploadService::new(client, endpoints),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use storefront_domain::Endpoints;

    use crate::session::{SessionClient, SessionConfig};
    use crate::testing::{MockCredentialStore, MockTransport, RecordingLogout};

    pub(crate) struct Harness {
        pub client: Arc<SessionClient>,
        pub endpoints: Arc<Endpoints>,
        pub transport: Arc<MockTransport>,
        pub store: Arc<MockCredentialStore>,
        pub logout: Arc<RecordingLogout>,
    }

    pub(crate) fn harness(
        transport: Arc<MockTransport>,
        store: Arc<MockCredentialStore>,
    ) -> Harness {
        let logout = RecordingLogout::new();
        let client = Arc::new(SessionClient::new(
            transport.clone(),
            store.clone(),
            logout.clone(),
            SessionConfig::default(),
        ));
        Harness { client, endpoints: Arc::new(Endpoints::default()), transport, store, logout }
    }
}
